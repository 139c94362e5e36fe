//! Line colors.
//!
//! Instance colors travel to the GPU in the 0–255 range, one float per
//! channel; the shader normalizes them. Clear colors are 0–1 RGBA.

/// RGB color with 0–255 channels.
pub type Rgb = [f32; 3];

/// Color used when a record carries none.
pub const DEFAULT_COLOR: Rgb = [0.0, 255.0, 0.0];

/// Convert a 0–1 RGBA array into a `wgpu::Color` for clear operations.
pub fn to_wgpu_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(rgba[0]),
        g: f64::from(rgba[1]),
        b: f64::from(rgba[2]),
        a: f64::from(rgba[3]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_is_green() {
        assert_eq!(DEFAULT_COLOR, [0.0, 255.0, 0.0]);
    }

    #[test]
    fn wgpu_color_widens_channels() {
        let c = to_wgpu_color([0.5, 0.25, 1.0, 0.0]);
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 1.0, 0.0));
    }
}
