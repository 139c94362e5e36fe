//! Layer lifecycle.
//!
//! A layer owns props (data, accessors, style), derives instanced
//! attributes from them, and draws through a [`Model`](crate::renderer::model::Model).
//! The host drives it in this order:
//!
//! 1. [`Layer::initialize_state`] once, with a GPU context.
//! 2. [`Layer::will_receive_props`] whenever props are replaced; the
//!    returned [`ChangeFlags`] say what was invalidated.
//! 3. [`Layer::update_state`] before drawing; recomputes and uploads
//!    stale attributes.
//! 4. [`Layer::draw`] inside a render pass.

pub mod accessor;
pub mod attribute;
pub mod line;
pub mod record;

use crate::{
    camera::viewport::Viewport,
    error::GeolineError,
    gpu::{
        render_context::RenderContext, render_state::RenderState,
        shader_composer::ShaderComposer,
    },
};

/// Shared GPU resources handed to every layer.
pub struct LayerContext {
    /// Device, queue and surface configuration.
    pub gpu: RenderContext,
    /// WGSL module composer with the shared shader library loaded.
    pub shader_composer: ShaderComposer,
    /// Frame-wide render state (line width).
    pub render_state: RenderState,
}

impl LayerContext {
    /// Wrap a render context and load the shared shader modules.
    ///
    /// # Errors
    ///
    /// Returns [`GeolineError::ShaderCompose`] if a shared module fails
    /// to load.
    pub fn new(gpu: RenderContext) -> Result<Self, GeolineError> {
        Ok(Self {
            gpu,
            shader_composer: ShaderComposer::new()?,
            render_state: RenderState::default(),
        })
    }
}

/// Per-frame values every layer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUniforms {
    /// Current view.
    pub viewport: Viewport,
}

/// What changed between two sets of props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeFlags {
    /// The data collection was replaced.
    pub data_changed: bool,
    /// The source position accessor was replaced.
    pub source_position_changed: bool,
    /// The target position accessor was replaced.
    pub target_position_changed: bool,
    /// The color accessor was replaced.
    pub color_changed: bool,
    /// The stroke width changed.
    pub stroke_width_changed: bool,
    /// Any other prop changed (opacity, visibility, id).
    pub props_changed: bool,
}

impl ChangeFlags {
    /// `true` if anything changed.
    pub fn any(&self) -> bool {
        self.data_changed
            || self.source_position_changed
            || self.target_position_changed
            || self.color_changed
            || self.stroke_width_changed
            || self.props_changed
    }

    /// `true` if any instanced attribute must be recomputed.
    pub fn attributes_changed(&self) -> bool {
        self.data_changed
            || self.source_position_changed
            || self.target_position_changed
            || self.color_changed
    }
}

/// A drawable layer.
pub trait Layer {
    /// Props type the layer is configured with.
    type Props;

    /// Layer id.
    fn id(&self) -> &str;

    /// Current props.
    fn props(&self) -> &Self::Props;

    /// Register attributes and create GPU resources.
    ///
    /// # Errors
    ///
    /// Returns an error if GPU resources cannot be created.
    fn initialize_state(&mut self, context: &mut LayerContext) -> Result<(), GeolineError>;

    /// Replace props and invalidate whatever depends on what changed.
    fn will_receive_props(&mut self, next: Self::Props) -> ChangeFlags;

    /// Recompute stale attributes on the CPU and upload them to the
    /// layer's GPU resources. Before [`Layer::initialize_state`] the
    /// attributes are still computed; only the upload is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if GPU resources cannot be updated.
    fn update_state(&mut self, context: &mut LayerContext) -> Result<(), GeolineError>;

    /// Record draw commands into `pass`.
    fn draw(
        &self,
        context: &mut LayerContext,
        pass: &mut wgpu::RenderPass<'_>,
        frame: &FrameUniforms,
    );
}
