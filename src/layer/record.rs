//! Line records and their JSON form.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::accessor::Position;
use crate::{error::GeolineError, util::color::Rgb};

/// A record the default accessors know how to read.
pub trait LineDatum {
    /// Segment start.
    fn source_position(&self) -> Position;
    /// Segment end.
    fn target_position(&self) -> Position;
    /// Segment color (0–255 RGB), if the record has one.
    fn color(&self) -> Option<Rgb> {
        None
    }
}

/// Plain line record.
///
/// Deserializes from JSON objects such as
/// `{"sourcePosition": [0, 0], "targetPosition": [1, 1], "color": [255, 0, 0]}`;
/// `color` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    /// Segment start.
    pub source_position: Position,
    /// Segment end.
    pub target_position: Position,
    /// Optional 0–255 RGB color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

impl LineRecord {
    /// Uncolored record from `source` to `target`.
    pub fn new(source: Position, target: Position) -> Self {
        Self {
            source_position: source,
            target_position: target,
            color: None,
        }
    }

    /// Same record with `color`.
    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

impl LineDatum for LineRecord {
    fn source_position(&self) -> Position {
        self.source_position
    }

    fn target_position(&self) -> Position {
        self.target_position
    }

    fn color(&self) -> Option<Rgb> {
        self.color
    }
}

/// Parse a JSON array of [`LineRecord`]s.
///
/// # Errors
///
/// Returns [`GeolineError::DataParse`] if the JSON does not match.
pub fn parse_records(json: &str) -> Result<Vec<LineRecord>, GeolineError> {
    serde_json::from_str(json).map_err(|e| GeolineError::DataParse(e.to_string()))
}

/// Read and parse a JSON file of [`LineRecord`]s.
///
/// # Errors
///
/// Returns an I/O or parse error.
pub fn load_records(path: &Path) -> Result<Vec<LineRecord>, GeolineError> {
    let content = std::fs::read_to_string(path)?;
    let records = parse_records(&content)?;
    log::info!("loaded {} line records from {}", records.len(), path.display());
    Ok(records)
}

/// Axis-aligned `(min, max)` box around every endpoint, or `None` for no
/// records.
pub fn bounds<D: LineDatum>(records: &[D]) -> Option<(Position, Position)> {
    let mut points = records
        .iter()
        .flat_map(|r| [r.source_position(), r.target_position()]);
    let first = points.next()?;
    Some(points.fold((first, first), |(min, max), p| {
        (
            [min[0].min(p[0]), min[1].min(p[1])],
            [max[0].max(p[0]), max[1].max(p[1])],
        )
    }))
}
