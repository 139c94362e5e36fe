//! Line layer: one straight segment per record.
//!
//! Each record becomes one instance with three attributes:
//!
//! | attribute                        | floats | contents                          |
//! |----------------------------------|--------|-----------------------------------|
//! | `instance_source_positions_fp64` | 4      | `x_hi, x_lo, y_hi, y_lo` of start |
//! | `instance_target_positions_fp64` | 4      | `x_hi, x_lo, y_hi, y_lo` of end   |
//! | `instance_colors`                | 3      | 0–255 RGB                         |
//!
//! Positions are split into high/low `f32` pairs so the shader can
//! subtract the viewport center without losing the precision of large
//! world coordinates.

use std::sync::Arc;

use super::{
    accessor::{
        shared, Accessor, ColorField, Position, SharedAccessor, SourcePositionField,
        TargetPositionField,
    },
    attribute::{Attribute, AttributeDescriptor, AttributeManager},
    record::LineDatum,
    ChangeFlags, FrameUniforms, Layer, LayerContext,
};
use crate::{
    camera::viewport::Viewport,
    error::GeolineError,
    gpu::render_state::{effective_line_width, RenderState},
    options::{LineOptions, DEFAULT_STROKE_WIDTH},
    renderer::{
        geometry::Geometry,
        model::{InstanceAttributeLayout, Model, ModelDescriptor, ShaderDef},
    },
    util::{
        color::{Rgb, DEFAULT_COLOR},
        fp64::fp64ify_position,
    },
};

/// Line shader: projects both ends, widens the segment into a ribbon.
pub const LINE_SHADER: &str = include_str!("../../assets/shaders/raster/line.wgsl");

/// Start positions, fp64-split.
pub const SOURCE_POSITIONS: &str = "instance_source_positions_fp64";
/// End positions, fp64-split.
pub const TARGET_POSITIONS: &str = "instance_target_positions_fp64";
/// 0–255 RGB colors.
pub const COLORS: &str = "instance_colors";

const POSITION_SIZE: usize = 4;
const COLOR_SIZE: usize = 3;

const INSTANCE_LAYOUTS: [InstanceAttributeLayout; 3] = [
    InstanceAttributeLayout {
        name: SOURCE_POSITIONS,
        size: POSITION_SIZE,
    },
    InstanceAttributeLayout {
        name: TARGET_POSITIONS,
        size: POSITION_SIZE,
    },
    InstanceAttributeLayout {
        name: COLORS,
        size: COLOR_SIZE,
    },
];

/// Uniform block for the line shader (group 0, binding 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniforms {
    /// Viewport center as `x_hi, x_lo, y_hi, y_lo`.
    pub center: [f32; 4],
    /// Target size in pixels.
    pub viewport_size: [f32; 2],
    /// `2^zoom`.
    pub pixels_per_unit: f32,
    /// Ribbon width in pixels.
    pub line_width: f32,
    /// Layer opacity, 0–1.
    pub opacity: f32,
    _pad: [f32; 3],
}

impl LineUniforms {
    /// Uniforms for drawing through `viewport` at `line_width` pixels.
    pub fn new(viewport: &Viewport, line_width: f32, opacity: f32) -> Self {
        Self {
            center: viewport.split_center(),
            viewport_size: viewport.size(),
            pixels_per_unit: viewport.pixels_per_unit() as f32,
            line_width,
            opacity: opacity.clamp(0.0, 1.0),
            _pad: [0.0; 3],
        }
    }
}

/// Line layer configuration.
///
/// Accessors and data are compared by `Arc` identity when props are
/// replaced: clone the props you are changing so untouched fields keep
/// their identity.
pub struct LineLayerProps<D> {
    /// Layer id, used in GPU labels.
    pub id: String,
    /// Records, one segment each.
    pub data: Arc<[D]>,
    /// Stroke width in pixels. Non-positive widths draw at 1.
    pub stroke_width: f32,
    /// Layer opacity, 0–1.
    pub opacity: f32,
    /// Invisible layers keep their state but skip drawing.
    pub visible: bool,
    /// Color for records whose color accessor returns `None`.
    pub default_color: Rgb,
    /// Segment start accessor.
    pub get_source_position: SharedAccessor<D, Position>,
    /// Segment end accessor.
    pub get_target_position: SharedAccessor<D, Position>,
    /// Segment color accessor.
    pub get_color: SharedAccessor<D, Option<Rgb>>,
}

impl<D> Clone for LineLayerProps<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            data: Arc::clone(&self.data),
            stroke_width: self.stroke_width,
            opacity: self.opacity,
            visible: self.visible,
            default_color: self.default_color,
            get_source_position: Arc::clone(&self.get_source_position),
            get_target_position: Arc::clone(&self.get_target_position),
            get_color: Arc::clone(&self.get_color),
        }
    }
}

impl<D: LineDatum + 'static> LineLayerProps<D> {
    /// Props reading positions and colors through [`LineDatum`].
    pub fn new(id: impl Into<String>, data: impl Into<Arc<[D]>>) -> Self {
        Self::with_accessors(
            id,
            data,
            shared(SourcePositionField),
            shared(TargetPositionField),
            shared(ColorField),
        )
    }
}

impl<D: 'static> LineLayerProps<D> {
    /// Props for record types that do not implement [`LineDatum`].
    pub fn with_accessors(
        id: impl Into<String>,
        data: impl Into<Arc<[D]>>,
        get_source_position: SharedAccessor<D, Position>,
        get_target_position: SharedAccessor<D, Position>,
        get_color: SharedAccessor<D, Option<Rgb>>,
    ) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            opacity: 1.0,
            visible: true,
            default_color: DEFAULT_COLOR,
            get_source_position,
            get_target_position,
            get_color,
        }
    }

    /// Replace the records.
    #[must_use]
    pub fn data(mut self, data: impl Into<Arc<[D]>>) -> Self {
        self.data = data.into();
        self
    }

    /// Set the stroke width in pixels.
    #[must_use]
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the segment start accessor.
    #[must_use]
    pub fn get_source_position(mut self, accessor: impl Accessor<D, Position> + 'static) -> Self {
        self.get_source_position = shared(accessor);
        self
    }

    /// Set the segment end accessor.
    #[must_use]
    pub fn get_target_position(mut self, accessor: impl Accessor<D, Position> + 'static) -> Self {
        self.get_target_position = shared(accessor);
        self
    }

    /// Set the segment color accessor.
    #[must_use]
    pub fn get_color(mut self, accessor: impl Accessor<D, Option<Rgb>> + 'static) -> Self {
        self.get_color = shared(accessor);
        self
    }

    /// Set the layer opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Show or hide the layer.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Apply `[line]` options.
    #[must_use]
    pub fn apply_options(mut self, options: &LineOptions) -> Self {
        self.stroke_width = options.stroke_width;
        self.default_color = options.default_color;
        self.opacity = options.opacity;
        self
    }

    /// Width the layer draws at: `stroke_width`, or 1 if that is not
    /// positive.
    pub fn effective_stroke_width(&self) -> f32 {
        effective_line_width(self.stroke_width)
    }

    /// Compare against `next`. Data and accessors compare by identity.
    pub fn diff(&self, next: &Self) -> ChangeFlags {
        let default_color_changed = self.default_color != next.default_color;
        ChangeFlags {
            data_changed: !Arc::ptr_eq(&self.data, &next.data),
            source_position_changed: !Arc::ptr_eq(
                &self.get_source_position,
                &next.get_source_position,
            ),
            target_position_changed: !Arc::ptr_eq(
                &self.get_target_position,
                &next.get_target_position,
            ),
            color_changed: default_color_changed || !Arc::ptr_eq(&self.get_color, &next.get_color),
            stroke_width_changed: self.stroke_width.to_bits() != next.stroke_width.to_bits(),
            props_changed: self.id != next.id
                || self.opacity.to_bits() != next.opacity.to_bits()
                || self.visible != next.visible,
        }
    }
}

/// Fill `instance_source_positions_fp64`.
pub fn calculate_instance_source_positions<D>(props: &LineLayerProps<D>, attribute: &mut Attribute) {
    for (slot, datum) in attribute.slots_mut().zip(props.data.iter()) {
        fp64ify_position(props.get_source_position.get(datum), slot);
    }
}

/// Fill `instance_target_positions_fp64`.
pub fn calculate_instance_target_positions<D>(props: &LineLayerProps<D>, attribute: &mut Attribute) {
    for (slot, datum) in attribute.slots_mut().zip(props.data.iter()) {
        fp64ify_position(props.get_target_position.get(datum), slot);
    }
}

/// Fill `instance_colors`, substituting the default color for `None`.
pub fn calculate_instance_colors<D>(props: &LineLayerProps<D>, attribute: &mut Attribute) {
    for (slot, datum) in attribute.slots_mut().zip(props.data.iter()) {
        let color = props.get_color.get(datum).unwrap_or(props.default_color);
        slot.copy_from_slice(&color);
    }
}

/// Draws one line segment per record.
pub struct LineLayer<D> {
    props: LineLayerProps<D>,
    attributes: AttributeManager<LineLayerProps<D>>,
    model: Option<Model>,
}

impl<D: 'static> LineLayer<D> {
    /// Layer with `props`. Attributes are registered immediately so they
    /// can be computed before a GPU context exists.
    pub fn new(props: LineLayerProps<D>) -> Self {
        let mut layer = Self {
            props,
            attributes: AttributeManager::new(),
            model: None,
        };
        layer.register_attributes();
        layer
    }

    fn register_attributes(&mut self) {
        self.attributes.add_instanced([
            AttributeDescriptor {
                name: SOURCE_POSITIONS,
                size: POSITION_SIZE,
                update: calculate_instance_source_positions::<D>,
            },
            AttributeDescriptor {
                name: TARGET_POSITIONS,
                size: POSITION_SIZE,
                update: calculate_instance_target_positions::<D>,
            },
            AttributeDescriptor {
                name: COLORS,
                size: COLOR_SIZE,
                update: calculate_instance_colors::<D>,
            },
        ]);
    }

    /// Recompute stale attributes on the CPU. Returns what was recomputed.
    pub fn update_attributes(&mut self) -> Vec<&'static str> {
        self.attributes.update(&self.props, self.props.data.len())
    }

    /// Attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// GPU model, once initialized.
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Width the next draw will use.
    pub fn stroke_width(&self) -> f32 {
        self.model.as_ref().map_or_else(
            || self.props.effective_stroke_width(),
            |model| model.params.stroke_width,
        )
    }

    /// `false` when the layer is hidden; [`Layer::draw`] then records
    /// nothing.
    pub fn is_drawn(&self) -> bool {
        self.props.visible
    }

    /// Run `f` with the render-state line width set to this layer's
    /// stroke width; the previous width is restored afterward, even if
    /// `f` unwinds.
    pub fn with_line_width<R>(&self, state: &mut RenderState, f: impl FnOnce(f32) -> R) -> R {
        let scope = state.scoped_line_width(self.stroke_width());
        f(scope.line_width())
    }
}

impl<D: 'static> Layer for LineLayer<D> {
    type Props = LineLayerProps<D>;

    fn id(&self) -> &str {
        &self.props.id
    }

    fn props(&self) -> &Self::Props {
        &self.props
    }

    fn initialize_state(&mut self, context: &mut LayerContext) -> Result<(), GeolineError> {
        self.register_attributes();

        let geometry = Geometry::line_segment();
        let mut model = Model::new(
            &context.gpu,
            &mut context.shader_composer,
            &ModelDescriptor {
                id: &self.props.id,
                shader: ShaderDef {
                    source: LINE_SHADER,
                    path: "shaders/raster/line.wgsl",
                },
                geometry: &geometry,
                instance_attributes: &INSTANCE_LAYOUTS,
                uniform_size: size_of::<LineUniforms>() as u64,
            },
        )?;
        model.params.stroke_width = self.props.effective_stroke_width();
        self.model = Some(model);
        self.attributes.invalidate_all();
        Ok(())
    }

    fn will_receive_props(&mut self, next: Self::Props) -> ChangeFlags {
        let flags = self.props.diff(&next);
        self.props = next;

        if flags.data_changed {
            self.attributes.invalidate_all();
        } else {
            if flags.source_position_changed {
                let _ = self.attributes.invalidate(SOURCE_POSITIONS);
            }
            if flags.target_position_changed {
                let _ = self.attributes.invalidate(TARGET_POSITIONS);
            }
            if flags.color_changed {
                let _ = self.attributes.invalidate(COLORS);
            }
        }

        if flags.stroke_width_changed {
            if let Some(model) = &mut self.model {
                model.params.stroke_width = self.props.effective_stroke_width();
            }
        }

        if flags.any() {
            log::debug!("layer '{}' props changed: {flags:?}", self.props.id);
        }
        flags
    }

    fn update_state(&mut self, context: &mut LayerContext) -> Result<(), GeolineError> {
        let updated = self.update_attributes();
        let Some(model) = &mut self.model else {
            return Ok(());
        };
        for name in updated {
            if let Some(attribute) = self.attributes.get(name) {
                model.set_attribute(
                    &context.gpu.device,
                    &context.gpu.queue,
                    name,
                    attribute.value(),
                );
            }
        }
        model.set_instance_count(u32::try_from(self.props.data.len()).unwrap_or(u32::MAX));
        Ok(())
    }

    fn draw(
        &self,
        context: &mut LayerContext,
        pass: &mut wgpu::RenderPass<'_>,
        frame: &FrameUniforms,
    ) {
        if !self.is_drawn() {
            return;
        }
        let Some(model) = &self.model else {
            log::warn!("layer '{}' drawn before initialize_state", self.props.id);
            return;
        };
        let queue = &context.gpu.queue;
        let opacity = self.props.opacity;
        self.with_line_width(&mut context.render_state, |line_width| {
            let uniforms = LineUniforms::new(&frame.viewport, line_width, opacity);
            model.render(queue, pass, &uniforms);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        camera::mercator::lng_lat_to_world,
        layer::record::LineRecord,
        util::fp64::{fp64_sum, fp64ify},
    };

    fn layer_with(records: Vec<LineRecord>) -> LineLayer<LineRecord> {
        LineLayer::new(LineLayerProps::new("lines", records))
    }

    fn values<'a, D: 'static>(layer: &'a LineLayer<D>, name: &str) -> &'a [f32] {
        layer.attribute(name).unwrap().value()
    }

    #[test]
    fn buffers_are_sized_per_record() {
        let records = (0..5)
            .map(|i| LineRecord::new([f64::from(i), 0.0], [0.0, f64::from(i)]))
            .collect();
        let mut layer = layer_with(records);
        let _ = layer.update_attributes();
        assert_eq!(values(&layer, SOURCE_POSITIONS).len(), 5 * 4);
        assert_eq!(values(&layer, TARGET_POSITIONS).len(), 5 * 4);
        assert_eq!(values(&layer, COLORS).len(), 5 * 3);
    }

    #[test]
    fn single_colored_record() {
        let mut layer = layer_with(vec![
            LineRecord::new([0.0, 0.0], [1.0, 1.0]).with_color([255.0, 0.0, 0.0]),
        ]);
        let _ = layer.update_attributes();
        assert_eq!(values(&layer, COLORS), [255.0, 0.0, 0.0]);
        assert_eq!(values(&layer, SOURCE_POSITIONS), [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(values(&layer, TARGET_POSITIONS), [1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn uncolored_records_use_default_color() {
        let mut layer = layer_with(vec![
            LineRecord::new([0.0, 0.0], [1.0, 1.0]),
            LineRecord::new([2.0, 2.0], [3.0, 3.0]),
        ]);
        let _ = layer.update_attributes();
        assert_eq!(values(&layer, COLORS), [0.0, 255.0, 0.0, 0.0, 255.0, 0.0]);
    }

    #[test]
    fn positions_are_fp64_split_in_record_order() {
        let coords = [-122.419_416_7, 37.774_929_3, 1.0e7 + 0.123, -0.1];
        let records: Vec<_> = coords
            .iter()
            .map(|&c| LineRecord::new([c, -c], [c * 2.0, 0.5]))
            .collect();
        let mut layer = layer_with(records);
        let _ = layer.update_attributes();
        let source = values(&layer, SOURCE_POSITIONS);
        let target = values(&layer, TARGET_POSITIONS);
        for (i, &c) in coords.iter().enumerate() {
            assert_eq!(source[i * 4..i * 4 + 2], fp64ify(c));
            assert_eq!(source[i * 4 + 2..i * 4 + 4], fp64ify(-c));
            assert_eq!(target[i * 4..i * 4 + 2], fp64ify(c * 2.0));
            let x = fp64_sum([source[i * 4], source[i * 4 + 1]]);
            assert!((x - c).abs() <= c.abs() * 1e-12);
        }
    }

    #[test]
    fn empty_data_gives_empty_buffers() {
        let mut layer = layer_with(Vec::new());
        let updated = layer.update_attributes();
        assert_eq!(updated, [SOURCE_POSITIONS, TARGET_POSITIONS, COLORS]);
        assert!(values(&layer, SOURCE_POSITIONS).is_empty());
        assert!(values(&layer, COLORS).is_empty());
    }

    #[test]
    fn stroke_width_defaults_and_falls_back() {
        let props = LineLayerProps::new("lines", Vec::<LineRecord>::new());
        assert_eq!(props.stroke_width, 9.0);
        assert_eq!(props.effective_stroke_width(), 9.0);
        assert_eq!(props.clone().stroke_width(0.0).effective_stroke_width(), 1.0);
        assert_eq!(props.clone().stroke_width(-4.0).effective_stroke_width(), 1.0);
        assert_eq!(props.stroke_width(2.5).effective_stroke_width(), 2.5);
    }

    #[test]
    fn draw_width_is_scoped() {
        let layer = layer_with(Vec::new());
        let mut state = RenderState::default();
        state.set_line_width(3.0);
        let seen = layer.with_line_width(&mut state, |w| w);
        assert_eq!(seen, 9.0);
        assert_eq!(state.line_width(), 3.0);

        let thin = LineLayer::new(
            LineLayerProps::new("thin", Vec::<LineRecord>::new()).stroke_width(0.0),
        );
        assert_eq!(thin.with_line_width(&mut state, |w| w), 1.0);
        assert_eq!(state.line_width(), 3.0);
    }

    #[test]
    fn accessor_change_invalidates_only_its_attribute() {
        let mut layer = layer_with(vec![LineRecord::new([1.0, 1.0], [2.0, 2.0])]);
        let _ = layer.update_attributes();

        let next = layer
            .props()
            .clone()
            .get_target_position(|r: &LineRecord| [r.target_position[0] + 10.0, r.target_position[1]]);
        let flags = layer.will_receive_props(next);
        assert!(flags.target_position_changed);
        assert!(!flags.data_changed && !flags.source_position_changed && !flags.color_changed);

        assert_eq!(layer.update_attributes(), [TARGET_POSITIONS]);
        assert_eq!(values(&layer, TARGET_POSITIONS), [12.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn unchanged_props_recompute_nothing() {
        let mut layer = layer_with(vec![LineRecord::new([1.0, 1.0], [2.0, 2.0])]);
        let _ = layer.update_attributes();
        let flags = layer.will_receive_props(layer.props().clone());
        assert!(!flags.any());
        assert!(layer.update_attributes().is_empty());
    }

    #[test]
    fn new_data_recomputes_everything() {
        let mut layer = layer_with(vec![LineRecord::new([1.0, 1.0], [2.0, 2.0])]);
        let _ = layer.update_attributes();
        let next = layer.props().clone().data(vec![LineRecord::new([1.0, 1.0], [2.0, 2.0])]);
        let flags = layer.will_receive_props(next);
        assert!(flags.data_changed);
        assert_eq!(layer.update_attributes(), [SOURCE_POSITIONS, TARGET_POSITIONS, COLORS]);
    }

    #[test]
    fn stroke_width_change_touches_no_attribute() {
        let mut layer = layer_with(vec![LineRecord::new([1.0, 1.0], [2.0, 2.0])]);
        let _ = layer.update_attributes();
        let flags = layer.will_receive_props(layer.props().clone().stroke_width(4.0));
        assert!(flags.stroke_width_changed && !flags.attributes_changed());
        assert!(layer.update_attributes().is_empty());
        assert_eq!(layer.stroke_width(), 4.0);
    }

    #[test]
    fn default_color_change_invalidates_only_colors() {
        let mut layer = layer_with(vec![
            LineRecord::new([1.0, 1.0], [2.0, 2.0]),
            LineRecord::new([0.0, 0.0], [1.0, 0.0]).with_color([1.0, 2.0, 3.0]),
        ]);
        let _ = layer.update_attributes();

        let mut next = layer.props().clone();
        next.default_color = [200.0, 100.0, 50.0];
        let flags = layer.will_receive_props(next);
        assert!(flags.color_changed);
        assert!(!flags.data_changed && !flags.source_position_changed);
        assert!(!flags.target_position_changed && !flags.stroke_width_changed);

        assert_eq!(layer.update_attributes(), [COLORS]);
        assert_eq!(values(&layer, COLORS), [200.0, 100.0, 50.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn hidden_layers_are_not_drawn() {
        let mut layer = layer_with(vec![LineRecord::new([1.0, 1.0], [2.0, 2.0])]);
        assert!(layer.is_drawn());
        let flags = layer.will_receive_props(layer.props().clone().visible(false));
        assert!(flags.props_changed && !flags.attributes_changed());
        assert!(!layer.is_drawn());
    }

    #[test]
    fn attributes_compute_before_initialize() {
        let mut layer = layer_with(vec![LineRecord::new([1.0, 1.0], [2.0, 2.0])]);
        assert!(layer.model().is_none());
        assert_eq!(layer.update_attributes(), [SOURCE_POSITIONS, TARGET_POSITIONS, COLORS]);
        assert_eq!(values(&layer, SOURCE_POSITIONS), [1.0, 0.0, 1.0, 0.0]);
        assert_eq!(values(&layer, COLORS), DEFAULT_COLOR);
    }

    #[test]
    fn options_set_default_color() {
        let options = LineOptions {
            stroke_width: 2.0,
            default_color: [10.0, 20.0, 30.0],
            opacity: 0.5,
        };
        let mut layer = LineLayer::new(
            LineLayerProps::new("lines", vec![LineRecord::new([0.0, 0.0], [1.0, 0.0])])
                .apply_options(&options),
        );
        let _ = layer.update_attributes();
        assert_eq!(values(&layer, COLORS), [10.0, 20.0, 30.0]);
        assert_eq!(layer.props().opacity, 0.5);
        assert_eq!(layer.stroke_width(), 2.0);
    }

    struct Trip {
        from: [f64; 2],
        to: [f64; 2],
        busy: bool,
    }

    #[test]
    fn custom_accessors_for_foreign_records() {
        let trips = vec![
            Trip {
                from: [0.0, 0.0],
                to: [90.0, 0.0],
                busy: true,
            },
            Trip {
                from: [-180.0, 0.0],
                to: [0.0, 0.0],
                busy: false,
            },
        ];
        let props = LineLayerProps::with_accessors(
            "trips",
            trips,
            shared(|t: &Trip| lng_lat_to_world(t.from)),
            shared(|t: &Trip| lng_lat_to_world(t.to)),
            shared(|t: &Trip| t.busy.then_some([255.0, 0.0, 0.0])),
        );
        let mut layer = LineLayer::new(props);
        let _ = layer.update_attributes();

        let world = |v: &[f32], i: usize| fp64_sum([v[i], v[i + 1]]);
        let source = values(&layer, SOURCE_POSITIONS);
        let target = values(&layer, TARGET_POSITIONS);
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(close(world(source, 0), 256.0) && close(world(source, 2), 256.0));
        assert!(close(world(source, 4), 0.0));
        assert!(close(world(target, 0), 384.0) && close(world(target, 4), 256.0));
        assert_eq!(values(&layer, COLORS), [255.0, 0.0, 0.0, 0.0, 255.0, 0.0]);
    }

    #[test]
    fn uniforms_match_shader_layout() {
        assert_eq!(size_of::<LineUniforms>(), 48);
        let viewport = Viewport::new([0.1, -2.0], 3.0, 800, 600);
        let uniforms = LineUniforms::new(&viewport, 9.0, 2.0);
        assert_eq!(uniforms.center[0..2], fp64ify(0.1));
        assert_eq!(uniforms.viewport_size, [800.0, 600.0]);
        assert_eq!(uniforms.pixels_per_unit, 8.0);
        assert_eq!(uniforms.opacity, 1.0);
    }
}
