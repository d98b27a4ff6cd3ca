//! Coefficient designer.
//!
//! Turns a [`ChainSettings`] into the biquad coefficients of the three bands:
//!
//! - **Low cut**: Butterworth high-pass, 1–4 cascaded sections
//! - **Peak**: RBJ cookbook peaking filter, one section
//! - **High cut**: Butterworth low-pass, 1–4 cascaded sections
//!
//! Every function here is pure. Identical inputs give bit-identical output.

use simpleeq_core::{
    BiquadCoefficients, MAX_BUTTERWORTH_SECTIONS, butterworth_q, highpass_coefficients,
    linear_to_db, lowpass_coefficients, peaking_eq_coefficients,
};

use crate::settings::{ChainSettings, MAX_PEAK_GAIN_DB, Slope};

/// Sample rate used when a caller passes a non-positive or non-finite rate.
pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;

/// Lowest frequency handed to a coefficient formula, in Hz.
pub const MIN_DESIGN_FREQUENCY_HZ: f32 = 1.0;

/// Highest design frequency as a fraction of the sample rate (95% of Nyquist).
pub const NYQUIST_MARGIN: f32 = 0.475;

/// Lowest Q handed to a coefficient formula.
pub const MIN_DESIGN_QUALITY: f32 = 0.025;

/// Which side of the spectrum a cut filter removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// Removes content below the cutoff (high-pass).
    LowCut,
    /// Removes content above the cutoff (low-pass).
    HighCut,
}

/// Coefficients of one cut filter: a fixed array of sections of which the
/// first [`len`](Self::len) are in use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutCoefficients {
    sections: [BiquadCoefficients; MAX_BUTTERWORTH_SECTIONS],
    count: usize,
}

impl CutCoefficients {
    /// Sections in cascade order.
    pub fn active(&self) -> &[BiquadCoefficients] {
        &self.sections[..self.count]
    }

    /// Number of sections in use.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false: a cut filter has at least one section.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Linear magnitude of the cascade at `frequency`.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        self.active()
            .iter()
            .map(|c| c.magnitude_at(frequency, sample_rate))
            .product()
    }
}

/// Coefficients for the whole low-cut → peak → high-cut topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainCoefficients {
    /// Low-cut cascade.
    pub low_cut: CutCoefficients,
    /// Peak section.
    pub peak: BiquadCoefficients,
    /// High-cut cascade.
    pub high_cut: CutCoefficients,
    sample_rate: f32,
}

impl ChainCoefficients {
    /// Designs all three bands for `settings` at `sample_rate`.
    pub fn design(settings: &ChainSettings, sample_rate: f32) -> Self {
        let sample_rate = valid_sample_rate(sample_rate);
        Self {
            low_cut: design_low_cut(settings, sample_rate),
            peak: design_peak(settings, sample_rate),
            high_cut: design_high_cut(settings, sample_rate),
            sample_rate,
        }
    }

    /// Sample rate the coefficients were designed for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Every coefficient of every active section is finite.
    pub fn is_finite(&self) -> bool {
        self.peak.is_finite()
            && self.low_cut.active().iter().all(BiquadCoefficients::is_finite)
            && self.high_cut.active().iter().all(BiquadCoefficients::is_finite)
    }

    /// Combined linear magnitude of all bands at `frequency`.
    pub fn magnitude_at(&self, frequency: f32) -> f32 {
        self.low_cut.magnitude_at(frequency, self.sample_rate)
            * self.peak.magnitude_at(frequency, self.sample_rate)
            * self.high_cut.magnitude_at(frequency, self.sample_rate)
    }

    /// Combined magnitude in dB at `frequency`.
    ///
    /// Floors at -200 dB where the response reaches zero.
    pub fn magnitude_db(&self, frequency: f32) -> f32 {
        linear_to_db(self.magnitude_at(frequency))
    }
}

/// Designs the low-cut (Butterworth high-pass) cascade.
pub fn design_low_cut(settings: &ChainSettings, sample_rate: f32) -> CutCoefficients {
    design_cut(
        CutKind::LowCut,
        settings.low_cut_freq,
        settings.low_cut_slope,
        sample_rate,
    )
}

/// Designs the high-cut (Butterworth low-pass) cascade.
pub fn design_high_cut(settings: &ChainSettings, sample_rate: f32) -> CutCoefficients {
    design_cut(
        CutKind::HighCut,
        settings.high_cut_freq,
        settings.high_cut_slope,
        sample_rate,
    )
}

/// Designs a Butterworth cut cascade of `slope.sections()` sections.
///
/// All sections share the cutoff; section `k` uses
/// [`butterworth_q`]`(n, k)` so the cascade is a maximally flat filter of
/// order `2n`.
pub fn design_cut(kind: CutKind, frequency: f32, slope: Slope, sample_rate: f32) -> CutCoefficients {
    let sample_rate = valid_sample_rate(sample_rate);
    let fallback = match kind {
        CutKind::LowCut => ChainSettings::default().low_cut_freq,
        CutKind::HighCut => ChainSettings::default().high_cut_freq,
    };
    let frequency = clamp_frequency(frequency, fallback, sample_rate);
    let count = slope.sections();

    let mut sections = [BiquadCoefficients::IDENTITY; MAX_BUTTERWORTH_SECTIONS];
    for (stage, section) in sections.iter_mut().enumerate().take(count) {
        let q = butterworth_q(count, stage);
        *section = match kind {
            CutKind::LowCut => highpass_coefficients(frequency, q, sample_rate),
            CutKind::HighCut => lowpass_coefficients(frequency, q, sample_rate),
        };
    }

    CutCoefficients { sections, count }
}

/// Designs the peak section.
///
/// Gain is limited to ±24 dB and Q to at least [`MIN_DESIGN_QUALITY`].
pub fn design_peak(settings: &ChainSettings, sample_rate: f32) -> BiquadCoefficients {
    let sample_rate = valid_sample_rate(sample_rate);
    let defaults = ChainSettings::default();

    let frequency = clamp_frequency(settings.peak_freq, defaults.peak_freq, sample_rate);
    let quality = finite_or(settings.peak_quality, defaults.peak_quality).max(MIN_DESIGN_QUALITY);
    let gain_db = finite_or(settings.peak_gain_db, defaults.peak_gain_db)
        .clamp(-MAX_PEAK_GAIN_DB, MAX_PEAK_GAIN_DB);

    peaking_eq_coefficients(frequency, quality, gain_db, sample_rate)
}

fn valid_sample_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        DEFAULT_SAMPLE_RATE
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Keeps a design frequency within [1 Hz, 0.475 * sample_rate].
fn clamp_frequency(frequency: f32, fallback: f32, sample_rate: f32) -> f32 {
    let max_freq = sample_rate * NYQUIST_MARGIN;
    finite_or(frequency, fallback)
        .max(MIN_DESIGN_FREQUENCY_HZ)
        .min(max_freq)
}
