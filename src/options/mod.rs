//! Layer and view options with TOML preset support.
//!
//! Options serialize to/from TOML. Every section uses `#[serde(default)]`,
//! so a file that only overrides `[line]` works.

mod line;
mod view;

use std::path::Path;

pub use line::{LineOptions, DEFAULT_STROKE_WIDTH};
use serde::{Deserialize, Serialize};
pub use view::ViewOptions;

use crate::error::GeolineError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Line layer defaults.
    pub line: LineOptions,
    /// Initial view and presentation.
    pub view: ViewOptions,
}

impl Options {
    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GeolineError::OptionsParse`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, GeolineError> {
        toml::from_str(content)
            .map_err(|e| GeolineError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an I/O or parse error.
    pub fn load(path: &Path) -> Result<Self, GeolineError> {
        let content = std::fs::read_to_string(path).map_err(GeolineError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn save(&self, path: &Path) -> Result<(), GeolineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GeolineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GeolineError::Io)?;
        }
        std::fs::write(path, content).map_err(GeolineError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let opts = Options::from_toml_str(
            r"
[line]
stroke_width = 3.0
",
        )
        .unwrap();
        assert_eq!(opts.line.stroke_width, 3.0);
        assert_eq!(opts.line.default_color, [0.0, 255.0, 0.0]);
        assert_eq!(opts.line.opacity, 1.0);
        assert!(opts.view.fit_to_data);
    }

    #[test]
    fn defaults_match_layer_defaults() {
        let line = LineOptions::default();
        assert_eq!(line.stroke_width, DEFAULT_STROKE_WIDTH);
        assert_eq!(DEFAULT_STROKE_WIDTH, 9.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[line]\nstroke_width = \"wide\"")
            .unwrap_err();
        assert!(matches!(err, GeolineError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("geoline-options-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.view.web_mercator = true;
        opts.view.center = [-122.4, 37.8];
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(loaded, opts);
    }
}
