use serde::{Deserialize, Serialize};

use crate::util::color::{Rgb, DEFAULT_COLOR};

/// Default stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f32 = 9.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Line layer defaults applied on top of record data.
pub struct LineOptions {
    /// Stroke width in pixels; zero or negative draws at 1.
    pub stroke_width: f32,
    /// 0–255 RGB used for records without a color.
    pub default_color: Rgb,
    /// Layer opacity, 0–1.
    pub opacity: f32,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            default_color: DEFAULT_COLOR,
            opacity: 1.0,
        }
    }
}
