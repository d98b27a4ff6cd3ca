//! Property-based tests for simpleeq-core filter primitives.
//!
//! Tests coefficient finiteness, section stability and descriptor clamping
//! using proptest for randomized input generation.

use proptest::prelude::*;
use simpleeq_core::{
    Biquad, ParamDescriptor, butterworth_q, highpass_coefficients, lowpass_coefficients,
    peaking_eq_coefficients,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any Butterworth stage at any audible cutoff yields finite coefficients
    /// and a stable section for 32 samples of random input.
    #[test]
    fn butterworth_stage_stability(
        freq in 20.0f32..20000.0f32,
        sections in 1usize..=4,
        stage in 0usize..4,
        highpass in any::<bool>(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let sr = 48000.0;
        let q = butterworth_q(sections, stage);
        let coeffs = if highpass {
            highpass_coefficients(freq, q, sr)
        } else {
            lowpass_coefficients(freq, q, sr)
        };
        prop_assert!(coeffs.is_finite(), "freq={} q={} gave {:?}", freq, q, coeffs);

        let mut section = Biquad::new();
        prop_assert!(section.set_coefficients(coeffs));
        for &sample in &input {
            let out = section.process(sample);
            prop_assert!(
                out.is_finite(),
                "section (freq={}, q={}, hp={}) produced non-finite output {}",
                freq, q, highpass, out
            );
        }
    }

    /// Peaking coefficients stay finite across the whole gain/Q range and
    /// reach the requested gain at the center frequency.
    #[test]
    fn peaking_center_gain(
        freq in 200.0f32..15000.0f32,
        q in 0.1f32..10.0f32,
        gain_db in -24.0f32..24.0f32,
    ) {
        let sr = 48000.0;
        let coeffs = peaking_eq_coefficients(freq, q, gain_db, sr);
        prop_assert!(coeffs.is_finite());

        let measured = simpleeq_core::linear_to_db(coeffs.magnitude_at(freq, sr));
        prop_assert!(
            (measured - gain_db).abs() < 0.05,
            "expected {} dB at {} Hz (q={}), got {}",
            gain_db, freq, q, measured
        );
    }

    /// Descriptor clamping always lands inside the declared range.
    #[test]
    fn descriptor_clamp_in_range(value in proptest::num::f32::ANY) {
        let desc = ParamDescriptor::frequency_hz("Freq", "Freq", 20.0, 20000.0, 1000.0);
        let clamped = desc.clamp(value);
        prop_assert!((20.0..=20000.0).contains(&clamped), "{} -> {}", value, clamped);

        let slope = ParamDescriptor::slope_db_per_octave("Slope", "Slope", 12.0, 48.0, 12.0);
        let snapped = slope.clamp(value);
        prop_assert!([12.0, 24.0, 36.0, 48.0].contains(&snapped), "{} -> {}", value, snapped);
    }
}
