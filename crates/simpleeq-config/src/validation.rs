//! Key and value checks against the parameter layout.

use simpleeq_dsp::parameter_layout;

use crate::error::ConfigError;

/// Checks that `key` names a parameter and `value` is finite.
///
/// Range is not checked here: out-of-range values are clamped when they
/// reach the parameter store.
///
/// ```rust
/// use simpleeq_config::validate_param;
///
/// assert!(validate_param("peak_gain", 6.0).is_ok());
/// assert!(validate_param("volume", 1.0).is_err());
/// assert!(validate_param("peak_freq", f32::NAN).is_err());
/// ```
pub fn validate_param(key: &str, value: f32) -> Result<(), ConfigError> {
    if !parameter_layout().iter().any(|d| d.string_id == key) {
        return Err(ConfigError::UnknownParameter(key.to_string()));
    }
    if !value.is_finite() {
        return Err(ConfigError::NonFinite {
            param: key.to_string(),
            value,
        });
    }
    Ok(())
}

/// Validates every entry, failing on the first bad one.
pub fn validate_params<'a>(
    entries: impl IntoIterator<Item = (&'a str, f32)>,
) -> Result<(), ConfigError> {
    entries
        .into_iter()
        .try_for_each(|(key, value)| validate_param(key, value))
}
