#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

//! Core types and fixed-point primitives for the LX3 trace-processing engine.

/// Scan direction and fixed-point scale constants.
pub mod common;
/// Channel layout descriptors for the supported sensor builds.
pub mod geometry;
#[doc(hidden)]
pub mod utils;
