//! Rendering primitives shared by layers.
//!
//! Geometry templates, the instanced [`model::Model`], and wgpu pipeline
//! helpers.

pub mod geometry;
pub mod model;
pub(crate) mod pipeline_util;
