//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Utilities
//!
//! - [`hz_to_omega`] - Frequency to angular frequency
//! - [`flush_denormal`] - Subnormal suppression for filter state

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use simpleeq_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Values at or below zero are floored to -200 dB.
///
/// # Example
/// ```rust
/// use simpleeq_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert frequency in Hz to angular frequency (radians/sample).
#[inline]
pub fn hz_to_omega(freq_hz: f32, sample_rate: f32) -> f32 {
    core::f32::consts::TAU * freq_hz / sample_rate
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. Values
/// below 1e-20 are replaced with zero, leaving margin before the IEEE 754
/// subnormal range begins. IIR feedback paths decay toward zero forever once
/// the input goes silent, so every section output passes through here.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
