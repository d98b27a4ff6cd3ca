//! Parameter layout and the lock-free parameter store.
//!
//! The layout is a fixed, ordered list of seven [`ParamDescriptor`]s. The
//! store keeps one `AtomicU32` (an `f32` bit pattern) per parameter so a
//! control thread can write while the audio thread reads, without locks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use simpleeq_core::{ParamDescriptor, ParamId, ParameterInfo};

use crate::settings::{
    ChainSettings, MAX_FREQUENCY_HZ, MAX_PEAK_GAIN_DB, MAX_PEAK_QUALITY, MIN_FREQUENCY_HZ,
    MIN_PEAK_QUALITY, Slope,
};

/// Number of parameters in the layout.
pub const PARAM_COUNT: usize = 7;

/// Equalizer parameters, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqParam {
    /// Low-cut cutoff in Hz.
    LowCutFreq,
    /// High-cut cutoff in Hz.
    HighCutFreq,
    /// Peak center frequency in Hz.
    PeakFreq,
    /// Peak gain in dB.
    PeakGain,
    /// Peak Q.
    PeakQuality,
    /// Low-cut slope in dB/octave.
    LowCutSlope,
    /// High-cut slope in dB/octave.
    HighCutSlope,
}

impl EqParam {
    /// All parameters in layout order.
    pub const ALL: [EqParam; PARAM_COUNT] = [
        EqParam::LowCutFreq,
        EqParam::HighCutFreq,
        EqParam::PeakFreq,
        EqParam::PeakGain,
        EqParam::PeakQuality,
        EqParam::LowCutSlope,
        EqParam::HighCutSlope,
    ];

    /// Position in the layout.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable numeric ID.
    pub const fn id(self) -> ParamId {
        ParamId(100 + self as u32)
    }

    /// Stable string ID, used as the persistence key.
    pub const fn string_id(self) -> &'static str {
        match self {
            EqParam::LowCutFreq => "low_cut_freq",
            EqParam::HighCutFreq => "high_cut_freq",
            EqParam::PeakFreq => "peak_freq",
            EqParam::PeakGain => "peak_gain",
            EqParam::PeakQuality => "peak_quality",
            EqParam::LowCutSlope => "low_cut_slope",
            EqParam::HighCutSlope => "high_cut_slope",
        }
    }

    /// Parameter at a layout position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Metadata for this parameter.
    pub fn descriptor(self) -> ParamDescriptor {
        let defaults = ChainSettings::default();
        let desc = match self {
            EqParam::LowCutFreq => ParamDescriptor::frequency_hz(
                "LowCut Freq",
                "LC Freq",
                MIN_FREQUENCY_HZ,
                MAX_FREQUENCY_HZ,
                defaults.low_cut_freq,
            )
            .with_group("low_cut"),
            EqParam::HighCutFreq => ParamDescriptor::frequency_hz(
                "HighCut Freq",
                "HC Freq",
                MIN_FREQUENCY_HZ,
                MAX_FREQUENCY_HZ,
                defaults.high_cut_freq,
            )
            .with_group("high_cut"),
            EqParam::PeakFreq => ParamDescriptor::frequency_hz(
                "Peak Freq",
                "PeakFreq",
                MIN_FREQUENCY_HZ,
                MAX_FREQUENCY_HZ,
                defaults.peak_freq,
            )
            .with_group("peak"),
            EqParam::PeakGain => ParamDescriptor::gain_db(
                "Peak Gain",
                "PeakGain",
                -MAX_PEAK_GAIN_DB,
                MAX_PEAK_GAIN_DB,
                defaults.peak_gain_db,
            )
            .with_group("peak"),
            EqParam::PeakQuality => ParamDescriptor::quality(
                "Peak Quality",
                "Peak Q",
                MIN_PEAK_QUALITY,
                MAX_PEAK_QUALITY,
                defaults.peak_quality,
            )
            .with_group("peak"),
            EqParam::LowCutSlope => ParamDescriptor::slope_db_per_octave(
                "LowCut Slope",
                "LC Slope",
                Slope::Db12.db_per_octave(),
                Slope::Db48.db_per_octave(),
                defaults.low_cut_slope.db_per_octave(),
            )
            .with_group("low_cut"),
            EqParam::HighCutSlope => ParamDescriptor::slope_db_per_octave(
                "HighCut Slope",
                "HC Slope",
                Slope::Db12.db_per_octave(),
                Slope::Db48.db_per_octave(),
                defaults.high_cut_slope.db_per_octave(),
            )
            .with_group("high_cut"),
        };
        desc.with_id(self.id(), self.string_id())
    }
}

/// The ordered parameter layout.
///
/// Index `i` describes [`EqParam::ALL`]`[i]`; IDs run from 100 to 106.
pub fn parameter_layout() -> [ParamDescriptor; PARAM_COUNT] {
    EqParam::ALL.map(EqParam::descriptor)
}

struct StoreData {
    descriptors: [ParamDescriptor; PARAM_COUNT],
    values: [AtomicU32; PARAM_COUNT],
}

/// Shared, lock-free store of the current parameter values.
///
/// Cloning yields another handle to the same values. Writes clamp to the
/// descriptor's range (slopes snap to multiples of 12 dB/octave), so a
/// stored value is always valid. Each parameter is atomic on its own; a
/// [`snapshot`](Self::snapshot) taken during a burst of writes may mix old
/// and new values.
#[derive(Clone)]
pub struct ParameterStore {
    inner: Arc<StoreData>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for param in EqParam::ALL {
            map.entry(&param.string_id(), &self.value(param));
        }
        map.finish()
    }
}

impl ParameterStore {
    /// Creates a store holding every parameter's default.
    pub fn new() -> Self {
        let descriptors = parameter_layout();
        let values = descriptors.map(|d| AtomicU32::new(d.default.to_bits()));
        Self {
            inner: Arc::new(StoreData {
                descriptors,
                values,
            }),
        }
    }

    /// All descriptors in layout order.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.inner.descriptors
    }

    /// Descriptor at `index`.
    pub fn descriptor(&self, index: usize) -> Option<&ParamDescriptor> {
        self.inner.descriptors.get(index)
    }

    /// Reads the value at `index`.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Writes the value at `index`, clamped to its range.
    ///
    /// Returns the stored value, or `None` for an unknown index.
    pub fn set(&self, index: usize, value: f32) -> Option<f32> {
        let (atomic, desc) = self
            .inner
            .values
            .get(index)
            .zip(self.inner.descriptors.get(index))?;
        let clamped = desc.clamp(value);
        atomic.store(clamped.to_bits(), Ordering::Release);
        Some(clamped)
    }

    /// Reads a parameter.
    pub fn value(&self, param: EqParam) -> f32 {
        f32::from_bits(self.inner.values[param.index()].load(Ordering::Acquire))
    }

    /// Writes a parameter, clamped to its range. Returns the stored value.
    pub fn set_value(&self, param: EqParam, value: f32) -> f32 {
        let clamped = self.inner.descriptors[param.index()].clamp(value);
        self.inner.values[param.index()].store(clamped.to_bits(), Ordering::Release);
        clamped
    }

    /// Layout index of a stable numeric ID.
    pub fn index_by_id(&self, id: ParamId) -> Option<usize> {
        self.inner.descriptors.iter().position(|d| d.id == id)
    }

    /// Layout index of a string ID.
    pub fn index_by_string_id(&self, string_id: &str) -> Option<usize> {
        self.inner
            .descriptors
            .iter()
            .position(|d| d.string_id == string_id)
    }

    /// Writes the value with string ID `string_id`.
    ///
    /// Returns the stored value, or `None` if the key is unknown.
    pub fn set_by_string_id(&self, string_id: &str, value: f32) -> Option<f32> {
        self.set(self.index_by_string_id(string_id)?, value)
    }

    /// Restores every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for (atomic, desc) in self.inner.values.iter().zip(&self.inner.descriptors) {
            atomic.store(desc.default.to_bits(), Ordering::Release);
        }
    }

    /// Writes every field of `settings`.
    pub fn store_settings(&self, settings: &ChainSettings) {
        self.set_value(EqParam::LowCutFreq, settings.low_cut_freq);
        self.set_value(EqParam::HighCutFreq, settings.high_cut_freq);
        self.set_value(EqParam::PeakFreq, settings.peak_freq);
        self.set_value(EqParam::PeakGain, settings.peak_gain_db);
        self.set_value(EqParam::PeakQuality, settings.peak_quality);
        self.set_value(EqParam::LowCutSlope, settings.low_cut_slope.db_per_octave());
        self.set_value(EqParam::HighCutSlope, settings.high_cut_slope.db_per_octave());
    }

    /// Reads all parameters into a [`ChainSettings`].
    ///
    /// Lock-free and allocation-free; safe to call from the audio thread.
    /// The result is [sanitized](ChainSettings::sanitized), so the low cut
    /// is always below the high cut.
    pub fn snapshot(&self) -> ChainSettings {
        ChainSettings {
            low_cut_freq: self.value(EqParam::LowCutFreq),
            high_cut_freq: self.value(EqParam::HighCutFreq),
            peak_freq: self.value(EqParam::PeakFreq),
            peak_gain_db: self.value(EqParam::PeakGain),
            peak_quality: self.value(EqParam::PeakQuality),
            low_cut_slope: Slope::from_db_per_octave(self.value(EqParam::LowCutSlope)),
            high_cut_slope: Slope::from_db_per_octave(self.value(EqParam::HighCutSlope)),
        }
        .sanitized()
    }
}

impl ParameterInfo for ParameterStore {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.descriptor(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        self.get(index).unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.set(index, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn layout_ids_are_stable() {
        let layout = parameter_layout();
        let ids: Vec<u32> = layout.iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![100, 101, 102, 103, 104, 105, 106]);

        let keys: Vec<&str> = layout.iter().map(|d| d.string_id).collect();
        assert_eq!(
            keys,
            vec![
                "low_cut_freq",
                "high_cut_freq",
                "peak_freq",
                "peak_gain",
                "peak_quality",
                "low_cut_slope",
                "high_cut_slope",
            ]
        );
    }

    #[test]
    fn layout_matches_enum_order() {
        for (i, param) in EqParam::ALL.into_iter().enumerate() {
            assert_eq!(param.index(), i);
            assert_eq!(EqParam::from_index(i), Some(param));
        }
        assert_eq!(EqParam::from_index(PARAM_COUNT), None);
    }

    #[test]
    fn defaults_snapshot() {
        let store = ParameterStore::new();
        assert_eq!(store.snapshot(), ChainSettings::default());
    }

    #[test]
    fn writes_clamp_to_range() {
        let store = ParameterStore::new();
        assert_eq!(store.set_value(EqParam::PeakGain, 99.0), 24.0);
        assert_eq!(store.set_value(EqParam::PeakFreq, 5.0), 20.0);
        assert_eq!(store.set_value(EqParam::PeakQuality, 0.0), 0.1);
        assert_eq!(store.set_value(EqParam::LowCutSlope, 30.0), 36.0);
        assert_eq!(store.set_value(EqParam::HighCutSlope, 100.0), 48.0);
        assert_eq!(store.set_value(EqParam::PeakFreq, f32::NAN), 750.0);
        assert_eq!(store.set(42, 1.0), None);
    }

    #[test]
    fn lookup_by_ids() {
        let store = ParameterStore::new();
        assert_eq!(store.index_by_id(ParamId(104)), Some(4));
        assert_eq!(store.index_by_id(ParamId(7)), None);
        assert_eq!(store.index_by_string_id("high_cut_slope"), Some(6));
        assert_eq!(store.index_by_string_id("volume"), None);
        assert_eq!(store.find_param_by_name("peak q"), Some(4));
        assert_eq!(store.param_index_by_id(ParamId(103)), Some(3));
    }

    #[test]
    fn snapshot_reflects_writes() {
        let store = ParameterStore::new();
        store.set_value(EqParam::LowCutSlope, 48.0);
        store.set_value(EqParam::PeakGain, -6.0);
        store.set_by_string_id("high_cut_freq", 8000.0);

        let snap = store.snapshot();
        assert_eq!(snap.low_cut_slope, Slope::Db48);
        assert_eq!(snap.peak_gain_db, -6.0);
        assert_eq!(snap.high_cut_freq, 8000.0);
    }

    #[test]
    fn snapshot_keeps_cuts_ordered() {
        let store = ParameterStore::new();
        store.set_value(EqParam::LowCutFreq, 9000.0);
        store.set_value(EqParam::HighCutFreq, 2000.0);
        let snap = store.snapshot();
        assert!(snap.low_cut_freq < snap.high_cut_freq);
    }

    #[test]
    fn clones_share_values() {
        let store = ParameterStore::new();
        let handle = store.clone();
        let writer = thread::spawn(move || {
            handle.set_value(EqParam::PeakFreq, 3000.0);
        });
        writer.join().unwrap();
        assert_eq!(store.value(EqParam::PeakFreq), 3000.0);
    }

    #[test]
    fn store_settings_round_trips() {
        let store = ParameterStore::new();
        let settings = ChainSettings {
            low_cut_freq: 120.0,
            high_cut_freq: 9000.0,
            peak_freq: 1500.0,
            peak_gain_db: 4.5,
            peak_quality: 2.5,
            low_cut_slope: Slope::Db24,
            high_cut_slope: Slope::Db36,
        };
        store.store_settings(&settings);
        assert_eq!(store.snapshot(), settings);

        store.reset_to_defaults();
        assert_eq!(store.snapshot(), ChainSettings::default());
    }
}
