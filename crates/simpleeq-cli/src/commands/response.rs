//! Magnitude response command.

use crate::commands::common::{parse_key_val, resolve_settings};
use clap::Args;
use simpleeq_dsp::{ChainCoefficients, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ};
use std::path::PathBuf;

#[derive(Args)]
pub struct ResponseArgs {
    /// Settings file (TOML)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Parameter override by string ID (e.g., "low_cut_freq=80")
    #[arg(short, long, value_parser = parse_key_val)]
    param: Vec<(String, String)>,

    /// Sample rate the response is evaluated at (defaults to the settings
    /// file's rate, then 48000)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Number of log-spaced frequencies between 20 Hz and 20 kHz
    #[arg(long, default_value = "31")]
    points: usize,
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    if args.points < 2 {
        anyhow::bail!("--points must be at least 2");
    }

    let settings = resolve_settings(args.settings.as_deref(), &args.param)?;
    let sample_rate = args
        .sample_rate
        .or(settings.sample_rate)
        .unwrap_or(DEFAULT_SAMPLE_RATE);
    if sample_rate == 0 {
        anyhow::bail!("sample rate must be positive");
    }
    let chain = settings.chain_settings()?;
    let coeffs = ChainCoefficients::design(&chain, sample_rate as f32);

    println!("Magnitude response at {sample_rate} Hz");
    println!();
    println!("  {:>10}  {:>9}", "Freq (Hz)", "Gain (dB)");
    println!("  {:>10}  {:>9}", "---------", "---------");
    for freq in log_frequencies(args.points) {
        println!("  {:>10.1}  {:>9.2}", freq, coeffs.magnitude_db(freq));
    }

    Ok(())
}

const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// `points` frequencies spaced evenly in log scale from 20 Hz to 20 kHz.
fn log_frequencies(points: usize) -> Vec<f32> {
    let lo = MIN_FREQUENCY_HZ.ln();
    let hi = MAX_FREQUENCY_HZ.ln();
    let last = (points - 1) as f32;
    (0..points)
        .map(|i| (lo + (hi - lo) * i as f32 / last).exp())
        .collect()
}
