//! Instanced drawable model.
//!
//! A `Model` bundles a pipeline, a template vertex buffer, one growable
//! vertex buffer per instanced attribute and a uniform buffer. Layers
//! write attribute data by name and call [`Model::render`] from their
//! draw hook.

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use super::{
    geometry::{Geometry, RibbonVertex},
    pipeline_util,
};
use crate::{
    error::GeolineError,
    gpu::{
        dynamic_buffer::TypedBuffer, render_context::RenderContext,
        shader_composer::ShaderComposer,
    },
};

/// First shader location used by instance attributes; 0 and 1 belong to
/// the template vertex.
const FIRST_INSTANCE_LOCATION: u32 = 2;

/// Instance capacity reserved before any data arrives.
const INITIAL_INSTANCE_CAPACITY: usize = 256;

/// Layout of one instanced attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceAttributeLayout {
    /// Attribute name, used to address it in [`Model::set_attribute`].
    pub name: &'static str,
    /// Floats per instance.
    pub size: usize,
}

/// Shader identity: WGSL source plus the path naga-oil reports in errors.
pub struct ShaderDef<'a> {
    /// WGSL source, may `#import` shared modules.
    pub source: &'a str,
    /// Path used for diagnostics.
    pub path: &'a str,
}

/// Everything needed to build a [`Model`].
pub struct ModelDescriptor<'a> {
    /// Model id, used in GPU labels.
    pub id: &'a str,
    /// Vertex + fragment shader (`vs_main` / `fs_main`).
    pub shader: ShaderDef<'a>,
    /// Per-instance template.
    pub geometry: &'a Geometry,
    /// Instanced attributes in shader-location order.
    pub instance_attributes: &'a [InstanceAttributeLayout],
    /// Size in bytes of the uniform block at group 0, binding 0.
    pub uniform_size: u64,
}

/// Render parameters associated with a model and updated by its layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Stroke width last pushed by the owning layer.
    pub stroke_width: f32,
}

struct InstanceBuffer {
    layout: InstanceAttributeLayout,
    buffer: TypedBuffer<f32>,
}

/// Instanced drawable: pipeline, template, instance buffers and uniforms.
pub struct Model {
    id: String,
    pipeline: wgpu::RenderPipeline,
    template: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_size: u64,
    bind_group: wgpu::BindGroup,
    instance_buffers: Vec<InstanceBuffer>,
    instance_count: u32,
    /// Render parameters kept in sync by the owning layer.
    pub params: ModelParams,
}

impl Model {
    /// Compile the shader and allocate all GPU resources.
    ///
    /// # Errors
    ///
    /// Returns an error if shader composition fails or an attribute size
    /// has no matching vertex format.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        desc: &ModelDescriptor<'_>,
    ) -> Result<Self, GeolineError> {
        let label = desc.id;
        let device = &context.device;

        let shader = shader_composer.compose(
            device,
            &format!("{label} Shader"),
            desc.shader.source,
            desc.shader.path,
        )?;

        let template_vertices = desc.geometry.ribbon_vertices();
        let template =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Template Buffer")),
                contents: bytemuck::cast_slice(&template_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Uniform Buffer")),
            size: desc.uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Layout")),
                entries: &[pipeline_util::uniform_entry(0, desc.uniform_size)],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline = Self::create_pipeline(
            context,
            label,
            &shader,
            &bind_group_layout,
            desc.instance_attributes,
        )?;

        let instance_buffers = desc
            .instance_attributes
            .iter()
            .map(|layout| InstanceBuffer {
                layout: *layout,
                buffer: TypedBuffer::with_capacity(
                    device,
                    &format!("{label} {}", layout.name),
                    INITIAL_INSTANCE_CAPACITY * layout.size,
                    wgpu::BufferUsages::VERTEX,
                ),
            })
            .collect();

        log::debug!(
            "created model '{label}' ({} template vertices, {} instance attributes)",
            template_vertices.len(),
            desc.instance_attributes.len()
        );

        Ok(Self {
            id: label.to_owned(),
            pipeline,
            template,
            vertex_count: template_vertices.len() as u32,
            uniform_buffer,
            uniform_size: desc.uniform_size,
            bind_group,
            instance_buffers,
            instance_count: 0,
            params: ModelParams { stroke_width: 1.0 },
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        label: &str,
        shader: &wgpu::ShaderModule,
        bind_group_layout: &wgpu::BindGroupLayout,
        instance_attributes: &[InstanceAttributeLayout],
    ) -> Result<wgpu::RenderPipeline, GeolineError> {
        let mut attribute_sets = Vec::with_capacity(instance_attributes.len());
        for (i, attr) in instance_attributes.iter().enumerate() {
            attribute_sets.push([wgpu::VertexAttribute {
                format: pipeline_util::float_vertex_format(attr.name, attr.size)?,
                offset: 0,
                shader_location: FIRST_INSTANCE_LOCATION + i as u32,
            }]);
        }

        let mut buffers = vec![RibbonVertex::layout()];
        buffers.extend(instance_attributes.iter().zip(&attribute_sets).map(
            |(attr, attributes)| wgpu::VertexBufferLayout {
                array_stride: (attr.size * size_of::<f32>()) as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes,
            },
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts: &[bind_group_layout],
                push_constant_ranges: &[],
            },
        );

        Ok(context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&format!("{label} Pipeline")),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::blended_color_target(
                        context.format(),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            }))
    }


    /// Upload new values for the named attribute.
    ///
    /// Unknown names are ignored with a debug message.
    pub fn set_attribute(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        values: &[f32],
    ) {
        let Some(instance) = self
            .instance_buffers
            .iter_mut()
            .find(|b| b.layout.name == name)
        else {
            log::debug!("model '{}' has no attribute '{name}'", self.id);
            return;
        };
        instance.buffer.write(device, queue, values);
    }

    /// Set the number of instances to draw.
    pub fn set_instance_count(&mut self, count: u32) {
        self.instance_count = count;
    }

    /// Instances drawn by [`Model::render`]: the count set by the layer,
    /// capped by the shortest uploaded attribute buffer.
    pub fn instance_count(&self) -> u32 {
        let uploaded = self
            .instance_buffers
            .iter()
            .map(|b| b.buffer.count() / b.layout.size)
            .min()
            .unwrap_or(0);
        self.instance_count.min(u32::try_from(uploaded).unwrap_or(u32::MAX))
    }

    /// Write `uniforms` and record the instanced draw into `pass`.
    ///
    /// Draws nothing when there are zero instances.
    pub fn render<U: Pod>(
        &self,
        queue: &wgpu::Queue,
        pass: &mut wgpu::RenderPass<'_>,
        uniforms: &U,
    ) {
        let instance_count = self.instance_count();
        if instance_count == 0 {
            return;
        }
        let bytes = bytemuck::bytes_of(uniforms);
        if bytes.len() as u64 != self.uniform_size {
            log::warn!(
                "model '{}': uniform block is {} bytes, expected {}",
                self.id,
                bytes.len(),
                self.uniform_size
            );
            return;
        }
        queue.write_buffer(&self.uniform_buffer, 0, bytes);

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.template.slice(..));
        for (slot, instance) in self.instance_buffers.iter().enumerate() {
            let Some(slice) = instance.buffer.written_slice() else {
                return;
            };
            pass.set_vertex_buffer(slot as u32 + 1, slice);
        }
        pass.draw(0..self.vertex_count, 0..instance_count);
    }
}
