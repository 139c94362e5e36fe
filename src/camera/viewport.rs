use glam::DVec2;

use crate::util::fp64::fp64ify;

/// Smallest span treated as non-degenerate when fitting bounds.
const MIN_FIT_SPAN: f64 = 1e-12;

/// Orthographic 2D view over world coordinates.
///
/// World units map to pixels at `2^zoom` pixels per unit; `center` lands
/// in the middle of a `width` x `height` pixel target. Pixel offsets use
/// +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World coordinate at the middle of the target.
    pub center: DVec2,
    /// Log2 of pixels per world unit.
    pub zoom: f64,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            zoom: 0.0,
            width: 1,
            height: 1,
        }
    }
}

impl Viewport {
    /// Viewport centered on `center` at `zoom`.
    pub fn new(center: [f64; 2], zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center: DVec2::from(center),
            zoom,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Smallest zoom showing the whole `[min, max]` box with `padding`
    /// pixels on every side. Degenerate boxes keep zoom 0.
    pub fn fit_bounds(
        min: [f64; 2],
        max: [f64; 2],
        width: u32,
        height: u32,
        padding: f64,
    ) -> Self {
        let min = DVec2::from(min);
        let max = DVec2::from(max);
        let span = max - min;
        let usable = DVec2::new(
            (f64::from(width) - 2.0 * padding).max(1.0),
            (f64::from(height) - 2.0 * padding).max(1.0),
        );
        let zoom = if span.max_element() > MIN_FIT_SPAN {
            let scale_x = if span.x > MIN_FIT_SPAN { usable.x / span.x } else { f64::INFINITY };
            let scale_y = if span.y > MIN_FIT_SPAN { usable.y / span.y } else { f64::INFINITY };
            scale_x.min(scale_y).log2()
        } else {
            0.0
        };
        Self::new(((min + max) * 0.5).to_array(), zoom, width, height)
    }

    /// Pixels per world unit.
    pub fn pixels_per_unit(&self) -> f64 {
        self.zoom.exp2()
    }

    /// Target size in pixels.
    pub fn size(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    /// Resize the target, keeping center and zoom.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// World position to pixel offset from the target center.
    pub fn project(&self, world: [f64; 2]) -> [f64; 2] {
        ((DVec2::from(world) - self.center) * self.pixels_per_unit()).to_array()
    }

    /// Pixel offset from the target center back to world position.
    pub fn unproject(&self, pixel: [f64; 2]) -> [f64; 2] {
        (DVec2::from(pixel) / self.pixels_per_unit() + self.center).to_array()
    }

    /// Center as `x_hi, x_lo, y_hi, y_lo` for shaders.
    pub fn split_center(&self) -> [f32; 4] {
        let [x_hi, x_lo] = fp64ify(self.center.x);
        let [y_hi, y_lo] = fp64ify(self.center.y);
        [x_hi, x_lo, y_hi, y_lo]
    }
}
