// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (clippy default thresholds; no clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Instanced line-segment layer rendered with wgpu.
//!
//! Geoline draws one straight segment per data record. Records are read
//! through accessors into three instanced attributes (fp64-split source
//! and target positions plus an RGB color) and drawn as screen-space
//! ribbons of a configurable pixel width.
//!
//! # Key entry points
//!
//! - [`layer::line::LineLayer`] - the line layer
//! - [`layer::line::LineLayerProps`] - data, accessors and style
//! - [`layer::Layer`] - the lifecycle every layer follows
//! - [`layer::LayerContext`] - GPU context shared by layers
//! - [`camera::viewport::Viewport`] - the 2D view lines are projected through
//! - [`options::Options`] - TOML-backed defaults
//!
//! # Precision
//!
//! World positions are `f64`. Each component is uploaded as a high/low
//! `f32` pair ([`util::fp64::fp64ify`]) and the shader subtracts the
//! equally split viewport center before combining them, so lines stay
//! stable when zoomed far into large coordinates.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod layer;
pub mod options;
pub mod renderer;
pub mod util;
