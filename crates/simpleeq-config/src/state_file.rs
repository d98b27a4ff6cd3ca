//! JSON encoding of processor state.
//!
//! A state blob is a flat JSON object mapping parameter string IDs to
//! numbers:
//!
//! ```json
//! {"high_cut_freq":20000.0,"low_cut_freq":20.0,"peak_gain":3.0}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use simpleeq_dsp::StateSnapshot;

use crate::error::ConfigError;
use crate::validation::validate_params;

/// Encodes a snapshot as a JSON object.
pub fn encode_state(state: &StateSnapshot) -> Result<String, ConfigError> {
    validate_params(state.iter())?;
    Ok(serde_json::to_string_pretty(state.as_map())?)
}

/// Decodes and validates a JSON state blob.
pub fn decode_state(json: &str) -> Result<StateSnapshot, ConfigError> {
    let values: BTreeMap<String, f32> = serde_json::from_str(json)?;
    let state = StateSnapshot::from(values);
    validate_params(state.iter())?;
    Ok(state)
}

/// Reads a state blob from a file.
pub fn load_state(path: impl AsRef<Path>) -> Result<StateSnapshot, ConfigError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    decode_state(&json)
}

/// Writes a state blob to a file.
pub fn save_state(path: impl AsRef<Path>, state: &StateSnapshot) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let json = encode_state(state)?;
    std::fs::write(path, json).map_err(|e| ConfigError::write_file(path, e))
}
