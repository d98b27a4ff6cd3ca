//! Biquad (bi-quadratic) filter section.
//!
//! Provides a second-order IIR section plus the coefficient designs the
//! equalizer needs: Butterworth low-pass/high-pass building blocks and the
//! parametric peaking filter.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use core::f32::consts::PI;
use libm::{cosf, sinf, sqrtf};

use crate::math::{flush_denormal, hz_to_omega};

/// Maximum number of second-order sections in a Butterworth cascade.
///
/// Four sections give an 8th-order filter, i.e. a 48 dB/octave slope.
pub const MAX_BUTTERWORTH_SECTIONS: usize = 4;

/// Normalized biquad coefficients (`a0 == 1`).
///
/// ```text
/// H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficient for x[n].
    pub b0: f32,
    /// Feedforward coefficient for x[n-1].
    pub b1: f32,
    /// Feedforward coefficient for x[n-2].
    pub b2: f32,
    /// Feedback coefficient for y[n-1].
    pub a1: f32,
    /// Feedback coefficient for y[n-2].
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Builds a coefficient set from un-normalized cookbook values.
    ///
    /// All terms are divided by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Returns `true` if every coefficient is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Linear magnitude of the transfer function at `frequency`.
    ///
    /// Evaluates `|H(e^jw)|` with `w = 2*pi*frequency/sample_rate`.
    ///
    /// Evaluated in f64: near DC the numerator and denominator are small
    /// differences of terms close to 1.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let w = 2.0 * core::f64::consts::PI * f64::from(frequency) / f64::from(sample_rate);
        let (cos1, sin1) = (libm::cos(w), libm::sin(w));
        let (cos2, sin2) = (libm::cos(2.0 * w), libm::sin(2.0 * w));
        let [b0, b1, b2, a1, a2] =
            [self.b0, self.b1, self.b2, self.a1, self.a2].map(f64::from);

        let num_re = b0 + b1 * cos1 + b2 * cos2;
        let num_im = -(b1 * sin1 + b2 * sin2);
        let den_re = 1.0 + a1 * cos1 + a2 * cos2;
        let den_im = -(a1 * sin1 + a2 * sin2);

        let num = libm::sqrt(num_re * num_re + num_im * num_im);
        let den = libm::sqrt(den_re * den_re + den_im * den_im);
        if den <= f64::MIN_POSITIVE {
            return 0.0;
        }
        (num / den) as f32
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Second-order IIR section with its own delay line.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// State and arithmetic are `f32`. When the cutoff sits far below the sample
/// rate (20 Hz at 192 kHz) the poles crowd the unit circle, and rounding can
/// move the response near the cutoff by about 0.1 dB. The midrange is
/// unaffected.
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    ///
    /// Initial state: `y[n] = x[n]` (no filtering)
    pub fn new() -> Self {
        Self {
            coeffs: BiquadCoefficients::IDENTITY,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replaces the coefficient set, keeping the delay line intact.
    ///
    /// Non-finite coefficient sets are rejected and the previous set stays in
    /// place. Returns whether the new set was accepted.
    pub fn set_coefficients(&mut self, coeffs: BiquadCoefficients) -> bool {
        if !coeffs.is_finite() {
            return false;
        }
        self.coeffs = coeffs;
        true
    }

    /// Current coefficient set.
    #[inline]
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coeffs
    }

    /// Processes a single sample through the section.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = flush_denormal(
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2,
        );

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay line without changing coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Delay-line contents as `[x1, x2, y1, y2]`.
    #[inline]
    pub fn state(&self) -> [f32; 4] {
        [self.x1, self.x2, self.y1, self.y2]
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Q of one section in a cascaded Butterworth filter.
///
/// A cascade of `sections` second-order stages sharing one cutoff realizes a
/// Butterworth filter of order `2 * sections` when stage `k` uses
/// `Q = 1 / (2 * cos(pi * (2k + 1) / (4 * sections)))`.
///
/// | Order | Stage Q values |
/// |-------|----------------|
/// | 2 | 0.7071 |
/// | 4 | 0.5412, 1.3066 |
/// | 6 | 0.5176, 0.7071, 1.9319 |
/// | 8 | 0.5098, 0.6013, 0.9000, 2.5629 |
///
/// `sections` is clamped to `1..=MAX_BUTTERWORTH_SECTIONS` and `stage` to
/// `0..sections`.
pub fn butterworth_q(sections: usize, stage: usize) -> f32 {
    let n = sections.clamp(1, MAX_BUTTERWORTH_SECTIONS);
    let k = stage.min(n - 1);
    let angle = PI * (2 * k + 1) as f32 / (4 * n) as f32;
    1.0 / (2.0 * cosf(angle))
}

/// Calculates low-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for a single Butterworth section)
/// * `sample_rate` - Sample rate in Hz
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let omega = hz_to_omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    BiquadCoefficients::from_raw(b0, b1, b2, a0, a1, a2)
}

/// Calculates high-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for a single Butterworth section)
/// * `sample_rate` - Sample rate in Hz
pub fn highpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let omega = hz_to_omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    BiquadCoefficients::from_raw(b0, b1, b2, a0, a1, a2)
}

/// Calculates peaking EQ coefficients using the RBJ cookbook formula.
///
/// A peaking EQ boosts or cuts around a center frequency and leaves
/// frequencies far from it untouched.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (bandwidth = frequency / Q)
/// * `gain_db` - Gain in decibels (positive = boost, negative = cut)
/// * `sample_rate` - Sample rate in Hz
pub fn peaking_eq_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> BiquadCoefficients {
    // Cookbook amplitude A = sqrt(10^(dB/20))
    let a = sqrtf(crate::math::db_to_linear(gain_db));
    let omega = hz_to_omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha / a;

    BiquadCoefficients::from_raw(b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biquad_passthrough() {
        let mut biquad = Biquad::new();

        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn test_quarter_rate_cutoff_has_zero_a1() {
        // omega = pi/2 puts cos(omega) at zero
        for coeffs in [
            lowpass_coefficients(12000.0, 0.707, 48000.0),
            highpass_coefficients(12000.0, 0.707, 48000.0),
            peaking_eq_coefficients(12000.0, 1.0, 6.0, 48000.0),
        ] {
            assert!(coeffs.a1.abs() < 1e-6, "a1 = {}", coeffs.a1);
        }
    }

    #[test]
    fn test_biquad_clear() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(lowpass_coefficients(1000.0, 0.707, 44100.0));

        for _ in 0..10 {
            biquad.process(1.0);
        }
        assert!(biquad.state().iter().any(|&v| v != 0.0));

        biquad.clear();
        assert_eq!(biquad.state(), [0.0; 4]);
    }

    #[test]
    fn test_rejects_non_finite_coefficients() {
        let mut biquad = Biquad::new();
        let good = lowpass_coefficients(1000.0, 0.707, 48000.0);
        assert!(biquad.set_coefficients(good));

        let bad = BiquadCoefficients {
            b0: f32::NAN,
            ..good
        };
        assert!(!biquad.set_coefficients(bad));
        assert_eq!(biquad.coefficients(), good);

        let inf = BiquadCoefficients::from_raw(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(!inf.is_finite());
        assert!(!biquad.set_coefficients(inf));
    }

    #[test]
    fn test_coefficient_update_keeps_state() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(lowpass_coefficients(500.0, 0.707, 48000.0));
        for _ in 0..32 {
            biquad.process(0.25);
        }
        let before = biquad.state();
        biquad.set_coefficients(lowpass_coefficients(2000.0, 0.707, 48000.0));
        assert_eq!(biquad.state(), before);
    }

    #[test]
    fn test_biquad_lowpass_dc_pass() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(lowpass_coefficients(1000.0, 0.707, 44100.0));

        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }

        assert!((output - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_biquad_highpass_blocks_dc() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(highpass_coefficients(1000.0, 0.707, 44100.0));

        let mut output = 1.0;
        for _ in 0..5000 {
            output = biquad.process(1.0);
        }

        assert!(output.abs() < 0.01, "DC should be blocked, got {}", output);
    }

    #[test]
    fn test_cutoff_is_minus_3db() {
        let lp = lowpass_coefficients(1000.0, core::f32::consts::FRAC_1_SQRT_2, 48000.0);
        let hp = highpass_coefficients(1000.0, core::f32::consts::FRAC_1_SQRT_2, 48000.0);
        let target = core::f32::consts::FRAC_1_SQRT_2;
        assert!((lp.magnitude_at(1000.0, 48000.0) - target).abs() < 1e-3);
        assert!((hp.magnitude_at(1000.0, 48000.0) - target).abs() < 1e-3);
    }

    #[test]
    fn test_peaking_eq_center_gain() {
        let coeffs = peaking_eq_coefficients(1000.0, 1.0, 6.0, 44100.0);
        assert!(coeffs.is_finite());
        let gain = coeffs.magnitude_at(1000.0, 44100.0);
        assert!(
            (gain - crate::math::db_to_linear(6.0)).abs() < 0.01,
            "expected +6 dB at center, got {}",
            gain
        );

        let cut = peaking_eq_coefficients(1000.0, 1.0, -6.0, 44100.0);
        assert!(cut.magnitude_at(1000.0, 44100.0) < 0.51);
    }

    #[test]
    fn test_peaking_eq_unity_at_zero_gain() {
        let coeffs = peaking_eq_coefficients(1000.0, 1.0, 0.0, 44100.0);
        assert_eq!(coeffs.b1, coeffs.a1);
        assert_eq!(coeffs.b2, coeffs.a2);
        assert!((coeffs.b0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_butterworth_q_table() {
        let expected: [&[f32]; 4] = [
            &[0.7071],
            &[0.5412, 1.3066],
            &[0.5176, 0.7071, 1.9319],
            &[0.5098, 0.6013, 0.9000, 2.5629],
        ];
        for (i, row) in expected.iter().enumerate() {
            for (stage, &q) in row.iter().enumerate() {
                let got = butterworth_q(i + 1, stage);
                assert!(
                    (got - q).abs() < 1e-3,
                    "sections={} stage={} expected {} got {}",
                    i + 1,
                    stage,
                    q,
                    got
                );
            }
        }
    }

    #[test]
    fn test_butterworth_q_clamps_inputs() {
        assert_eq!(butterworth_q(0, 0), butterworth_q(1, 0));
        assert_eq!(butterworth_q(9, 0), butterworth_q(4, 0));
        assert_eq!(butterworth_q(2, 7), butterworth_q(2, 1));
    }

    #[test]
    fn test_magnitude_identity() {
        let identity = BiquadCoefficients::default();
        for freq in [20.0, 440.0, 10000.0] {
            assert!((identity.magnitude_at(freq, 48000.0) - 1.0).abs() < 1e-6);
        }
    }
}
