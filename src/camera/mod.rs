//! 2D map camera.
//!
//! Provides the orthographic viewport layers project through, Web
//! Mercator helpers for longitude/latitude data, and pan/zoom control.

/// Drag and wheel handling over a viewport.
pub mod controller;
/// Web Mercator projection into world coordinates.
pub mod mercator;
/// Orthographic world-to-pixel viewport.
pub mod viewport;
