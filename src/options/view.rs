use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Initial view and frame presentation.
pub struct ViewOptions {
    /// Frame the loaded data on startup, ignoring `center` and `zoom`.
    pub fit_to_data: bool,
    /// World coordinate at the window center.
    pub center: [f64; 2],
    /// Log2 pixels per world unit.
    pub zoom: f64,
    /// Pixels kept free around fitted data.
    pub fit_padding: f64,
    /// Treat positions as `[longitude, latitude]` and project them with
    /// Web Mercator.
    pub web_mercator: bool,
    /// Background RGBA, 0–1.
    pub clear_color: [f32; 4],
    /// Initial window size in logical pixels.
    pub window_size: [u32; 2],
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            fit_to_data: true,
            center: [0.0, 0.0],
            zoom: 0.0,
            fit_padding: 32.0,
            web_mercator: false,
            clear_color: [0.04, 0.05, 0.08, 1.0],
            window_size: [1280, 800],
        }
    }
}
