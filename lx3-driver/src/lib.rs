#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

//! Signal-processing engine for LX3 pulsed light-ranging sensors.
//!
//! Converts raw per-channel sample traces captured by the acquisition
//! ASIC into calibrated, logically-ordered data: bidirectional channel
//! index maps for the supported sensor geometries, fixed-point numeric
//! kernels (interpolation, sorting, FIR crosstalk filtering), a rolling
//! scan-accumulation buffer, and the noise/bias estimators that close
//! the acquisition-gain calibration loop.

/// Rolling scan-accumulation buffer.
pub mod accumulation;
/// Noise, bias, and smoothing estimators for the calibration loop.
pub mod calibration;
/// Fixed-point numeric kernels operating on trace buffers.
pub mod dsp;
/// Error types.
pub mod error;
/// Channel index maps between physical memory order and logical trace order.
pub mod mapping;
/// The per-sensor processing context.
pub mod processor;

pub use error::LX3DriverError;
pub use processor::TraceProcessor;
