//! Shared utilities for the line layer.
//!
//! Double-precision emulation for GPU coordinates and color helpers.

pub mod color;
pub mod fp64;
