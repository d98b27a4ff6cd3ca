//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use simpleeq_config::{EqSettings, validate_param};
use std::path::Path;

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Builds the settings for a command: the settings file if given (or an
/// empty set), then each `--param` override on top.
pub fn resolve_settings(
    settings: Option<&Path>,
    overrides: &[(String, String)],
) -> anyhow::Result<EqSettings> {
    let mut resolved = match settings {
        Some(path) => {
            let loaded = EqSettings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?;
            tracing::info!("settings: '{}' ({} values)", loaded.name, loaded.len());
            loaded
        }
        None => EqSettings::new("command line"),
    };

    for (key, raw) in overrides {
        let value: f32 = raw
            .parse()
            .with_context(|| format!("parameter '{key}': '{raw}' is not a number"))?;
        validate_param(key, value)?;
        resolved.params.insert(key.clone(), value);
    }

    Ok(resolved)
}
