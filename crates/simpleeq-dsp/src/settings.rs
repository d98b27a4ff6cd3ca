//! The equalizer's parameter set.
//!
//! [`ChainSettings`] is the plain-value snapshot the coefficient designer
//! works from. The parameter store produces one per processing block.

/// Lowest frequency any band can be tuned to, in Hz.
pub const MIN_FREQUENCY_HZ: f32 = 20.0;
/// Highest frequency any band can be tuned to, in Hz.
pub const MAX_FREQUENCY_HZ: f32 = 20000.0;
/// Peak gain range, in dB (symmetric).
pub const MAX_PEAK_GAIN_DB: f32 = 24.0;
/// Lowest declared peak Q.
pub const MIN_PEAK_QUALITY: f32 = 0.1;
/// Highest declared peak Q.
pub const MAX_PEAK_QUALITY: f32 = 10.0;

/// Steepness of a cut filter.
///
/// Each 12 dB/octave step adds one cascaded second-order section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slope {
    /// 12 dB/octave, one section.
    #[default]
    Db12,
    /// 24 dB/octave, two sections.
    Db24,
    /// 36 dB/octave, three sections.
    Db36,
    /// 48 dB/octave, four sections.
    Db48,
}

impl Slope {
    /// All slopes, shallowest first.
    pub const ALL: [Slope; 4] = [Slope::Db12, Slope::Db24, Slope::Db36, Slope::Db48];

    /// Number of cascaded second-order sections.
    pub const fn sections(self) -> usize {
        match self {
            Slope::Db12 => 1,
            Slope::Db24 => 2,
            Slope::Db36 => 3,
            Slope::Db48 => 4,
        }
    }

    /// Steepness in dB/octave.
    pub const fn db_per_octave(self) -> f32 {
        match self {
            Slope::Db12 => 12.0,
            Slope::Db24 => 24.0,
            Slope::Db36 => 36.0,
            Slope::Db48 => 48.0,
        }
    }

    /// Nearest slope to a dB/octave value.
    ///
    /// Values outside 12–48 clamp to the ends; NaN maps to 12 dB/octave.
    pub fn from_db_per_octave(db_per_octave: f32) -> Self {
        if db_per_octave.is_nan() {
            return Slope::Db12;
        }
        let steps = ((db_per_octave - 12.0) / 12.0).round();
        match steps {
            s if s <= 0.0 => Slope::Db12,
            s if s < 1.5 => Slope::Db24,
            s if s < 2.5 => Slope::Db36,
            _ => Slope::Db48,
        }
    }
}

/// Plain values of every equalizer parameter.
///
/// Frequencies in Hz, gain in dB, Q dimensionless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    /// Low-cut (high-pass) cutoff.
    pub low_cut_freq: f32,
    /// High-cut (low-pass) cutoff.
    pub high_cut_freq: f32,
    /// Peak band center frequency.
    pub peak_freq: f32,
    /// Peak band gain.
    pub peak_gain_db: f32,
    /// Peak band Q.
    pub peak_quality: f32,
    /// Low-cut steepness.
    pub low_cut_slope: Slope,
    /// High-cut steepness.
    pub high_cut_slope: Slope,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            low_cut_freq: 20.0,
            high_cut_freq: 20000.0,
            peak_freq: 750.0,
            peak_gain_db: 0.0,
            peak_quality: 1.0,
            low_cut_slope: Slope::Db12,
            high_cut_slope: Slope::Db12,
        }
    }
}

impl ChainSettings {
    /// Returns a copy with every value inside its declared range.
    ///
    /// Non-finite values fall back to the defaults. If the low cut is not
    /// below the high cut, the high cut is raised just above it (bounded by
    /// 20 kHz) and the low cut lowered if that was not enough.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32, min: f32, max: f32| {
            if value.is_finite() {
                value.clamp(min, max)
            } else {
                fallback
            }
        };

        let mut low_cut_freq = pick(
            self.low_cut_freq,
            defaults.low_cut_freq,
            MIN_FREQUENCY_HZ,
            MAX_FREQUENCY_HZ,
        );
        let mut high_cut_freq = pick(
            self.high_cut_freq,
            defaults.high_cut_freq,
            MIN_FREQUENCY_HZ,
            MAX_FREQUENCY_HZ,
        );
        if low_cut_freq >= high_cut_freq {
            high_cut_freq = (low_cut_freq + 1.0).min(MAX_FREQUENCY_HZ);
            low_cut_freq = low_cut_freq.min(high_cut_freq - 1.0);
        }

        Self {
            low_cut_freq,
            high_cut_freq,
            peak_freq: pick(
                self.peak_freq,
                defaults.peak_freq,
                MIN_FREQUENCY_HZ,
                MAX_FREQUENCY_HZ,
            ),
            peak_gain_db: pick(
                self.peak_gain_db,
                defaults.peak_gain_db,
                -MAX_PEAK_GAIN_DB,
                MAX_PEAK_GAIN_DB,
            ),
            peak_quality: pick(
                self.peak_quality,
                defaults.peak_quality,
                MIN_PEAK_QUALITY,
                MAX_PEAK_QUALITY,
            ),
            low_cut_slope: self.low_cut_slope,
            high_cut_slope: self.high_cut_slope,
        }
    }
}
