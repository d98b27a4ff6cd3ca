//! Integration tests for simpleeq-config.
//!
//! These tests go through the file system and a live processor.

use simpleeq_config::{ConfigError, EqSettings, load_state, save_state};
use simpleeq_dsp::{AudioProcessor, EqParam, SimpleEq, Slope};
use tempfile::TempDir;

#[test]
fn settings_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("vocal.toml");

    let settings = EqSettings::new("Vocal")
        .with_description("Presence lift")
        .with_sample_rate(48000)
        .with_param("low_cut_freq", 90.0)
        .with_param("low_cut_slope", 24.0)
        .with_param("peak_freq", 3000.0)
        .with_param("peak_gain", 3.5);
    settings.save(&path).unwrap();

    let loaded = EqSettings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = EqSettings::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn settings_drive_a_processor() {
    let toml = r#"
        name = "Telephone"
        [params]
        low_cut_freq = 300.0
        high_cut_freq = 3400.0
        low_cut_slope = 48.0
        high_cut_slope = 48.0
    "#;
    let settings = EqSettings::from_toml(toml).unwrap();

    let mut eq = SimpleEq::new();
    settings.apply_to(eq.params()).unwrap();
    eq.prepare(48000.0, 256);

    let chain = eq.params().snapshot();
    assert_eq!(chain.low_cut_slope, Slope::Db48);
    assert_eq!(chain.high_cut_freq, 3400.0);
    assert!(eq.coefficients().magnitude_db(100.0) < -30.0);
    assert!(eq.coefficients().magnitude_db(1000.0).abs() < 0.5);
}

#[test]
fn state_file_round_trip_through_processor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");

    let mut eq = SimpleEq::new();
    eq.params().set_value(EqParam::PeakFreq, 1800.0);
    eq.params().set_value(EqParam::PeakGain, -4.5);
    eq.params().set_value(EqParam::HighCutSlope, 36.0);
    save_state(&path, &eq.export_state()).unwrap();

    let mut restored = SimpleEq::new();
    restored.import_state(&load_state(&path).unwrap());
    assert_eq!(restored.params().snapshot(), eq.params().snapshot());
}

#[test]
fn exported_state_converts_to_settings() {
    let eq = SimpleEq::new();
    eq.params().set_value(EqParam::PeakQuality, 2.0);

    let settings = EqSettings::from_snapshot("From state", &eq.export_state());
    assert_eq!(settings.len(), 7);
    let toml = settings.to_toml().unwrap();
    let back = EqSettings::from_toml(&toml).unwrap();
    assert_eq!(back.chain_settings().unwrap(), eq.params().snapshot());
}
