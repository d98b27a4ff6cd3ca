//! SimpleEQ Core - filter primitives for a three-band equalizer
//!
//! This crate provides the allocation-free building blocks the equalizer
//! signal path is made of, designed for real-time audio processing.
//!
//! # Core Abstractions
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR section (Direct Form I) with its own delay line
//! - [`BiquadCoefficients`] - Normalized `(b0, b1, b2, a1, a2)` coefficient set
//! - RBJ cookbook designs: [`lowpass_coefficients`], [`highpass_coefficients`],
//!   [`peaking_eq_coefficients`]
//! - [`butterworth_q`] - Per-section Q for cascaded Butterworth filters
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`ParamDescriptor`] - Parameter metadata (range, unit, stable IDs, scaling)
//!
//! ## Utilities
//!
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//! - [`flush_denormal`] for decaying filter tails
//!
//! # no_std Support
//!
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! simpleeq-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use simpleeq_core::{Biquad, peaking_eq_coefficients};
//!
//! let mut section = Biquad::new();
//! section.set_coefficients(peaking_eq_coefficients(1000.0, 1.0, 6.0, 48000.0));
//!
//! let mut buffer = [0.5f32; 64];
//! for sample in buffer.iter_mut() {
//!     *sample = section.process(*sample);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod math;
pub mod param_info;

pub use biquad::{
    Biquad, BiquadCoefficients, MAX_BUTTERWORTH_SECTIONS, butterworth_q, highpass_coefficients,
    lowpass_coefficients, peaking_eq_coefficients,
};
pub use math::{db_to_linear, flush_denormal, hz_to_omega, linear_to_db};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
