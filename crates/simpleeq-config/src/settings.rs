//! Settings file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use simpleeq_dsp::{ChainSettings, ParameterStore, StateSnapshot};

use crate::error::ConfigError;
use crate::validation::validate_params;

/// A named set of equalizer parameter values.
///
/// Settings are stored as TOML files with a flat `params` table keyed by
/// parameter string ID. Parameters left out keep whatever value the target
/// store already holds.
///
/// # TOML Format
///
/// ```toml
/// name = "Vocal presence"
/// description = "Low rumble removed, 3 kHz lift"
/// sample_rate = 48000
///
/// [params]
/// low_cut_freq = 90.0
/// low_cut_slope = 24.0
/// peak_freq = 3000.0
/// peak_gain = 3.5
/// peak_quality = 0.8
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EqSettings {
    /// Name of the settings.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the settings were tuned at. Informational; rendering uses
    /// the rate of the audio being processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    /// Parameter values keyed by string ID.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Default for EqSettings {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl EqSettings {
    /// Create empty settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: None,
            params: BTreeMap::new(),
        }
    }

    /// Capture every value currently in a parameter store.
    pub fn from_store(name: impl Into<String>, store: &ParameterStore) -> Self {
        let params = store
            .descriptors()
            .iter()
            .enumerate()
            .filter_map(|(i, d)| store.get(i).map(|v| (d.string_id.to_string(), v)))
            .collect();
        Self {
            params,
            ..Self::new(name)
        }
    }

    /// Create settings from an exported processor state.
    pub fn from_snapshot(name: impl Into<String>, state: &StateSnapshot) -> Self {
        Self {
            params: state.as_map().clone(),
            ..Self::new(name)
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Set one parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: f32) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Load settings from a TOML file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string and validate them.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: EqSettings = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every key against the parameter layout and every value for
    /// finiteness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_params(self.params.iter().map(|(k, &v)| (k.as_str(), v)))
    }

    /// The parameter values as a processor state snapshot.
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::from(self.params.clone())
    }

    /// Write the values into a parameter store (clamped by the store).
    pub fn apply_to(&self, store: &ParameterStore) -> Result<(), ConfigError> {
        self.validate()?;
        for (key, &value) in &self.params {
            store.set_by_string_id(key, value);
        }
        Ok(())
    }

    /// Resolve the full parameter set, filling unspecified values with
    /// defaults.
    pub fn chain_settings(&self) -> Result<ChainSettings, ConfigError> {
        let store = ParameterStore::new();
        self.apply_to(&store)?;
        Ok(store.snapshot())
    }

    /// Number of parameters set.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpleeq_dsp::{EqParam, Slope};

    #[test]
    fn builder() {
        let settings = EqSettings::new("Bright")
            .with_description("Air band lift")
            .with_sample_rate(44100)
            .with_param("peak_freq", 10000.0)
            .with_param("peak_gain", 4.0);

        assert_eq!(settings.name, "Bright");
        assert_eq!(settings.description.as_deref(), Some("Air band lift"));
        assert_eq!(settings.sample_rate, Some(44100));
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn parse_minimal_toml() {
        let settings = EqSettings::from_toml("name = \"Flat\"").unwrap();
        assert_eq!(settings.name, "Flat");
        assert!(settings.is_empty());
        assert_eq!(settings.chain_settings().unwrap(), ChainSettings::default());
    }

    #[test]
    fn integer_values_parse() {
        let toml = r#"
            name = "Steep"
            [params]
            low_cut_slope = 48
            low_cut_freq = 80
        "#;
        let chain = EqSettings::from_toml(toml).unwrap().chain_settings().unwrap();
        assert_eq!(chain.low_cut_slope, Slope::Db48);
        assert_eq!(chain.low_cut_freq, 80.0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let toml = r#"
            name = "Typo"
            [params]
            peak_gian = 3.0
        "#;
        let err = EqSettings::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParameter(ref k) if k == "peak_gian"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = EqSettings::from_toml("name = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn apply_leaves_missing_values() {
        let store = ParameterStore::new();
        store.set_value(EqParam::PeakQuality, 4.0);

        EqSettings::new("Partial")
            .with_param("peak_gain", -30.0)
            .apply_to(&store)
            .unwrap();

        assert_eq!(store.value(EqParam::PeakGain), -24.0);
        assert_eq!(store.value(EqParam::PeakQuality), 4.0);
    }

    #[test]
    fn non_finite_blocks_serialization() {
        let settings = EqSettings::new("Broken").with_param("peak_gain", f32::NAN);
        assert!(matches!(
            settings.to_toml(),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn from_store_captures_everything() {
        let store = ParameterStore::new();
        store.set_value(EqParam::HighCutFreq, 7000.0);
        let settings = EqSettings::from_store("Captured", &store);
        assert_eq!(settings.len(), 7);
        assert_eq!(settings.params.get("high_cut_freq"), Some(&7000.0));
    }
}
