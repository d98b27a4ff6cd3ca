//! File-based equalizer processing command.

use crate::commands::common::{parse_key_val, resolve_settings};
use crate::wav::{WavSpec, read_wav, write_wav};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use simpleeq_config::save_state;
use simpleeq_core::linear_to_db;
use simpleeq_dsp::{AudioProcessor, MAX_CHANNELS, SimpleEq};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Parameter override by string ID (e.g., "peak_gain=4.5")
    #[arg(short, long, value_parser = parse_key_val)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Write the final parameter state as JSON
    #[arg(long, value_name = "FILE")]
    save_state: Option<PathBuf>,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("--bit-depth must be 16, 24 or 32 (got {})", args.bit_depth);
    }

    let settings = resolve_settings(args.settings.as_deref(), &args.param)?;

    println!("Reading {}...", args.input.display());
    let (mut buffers, spec) = read_wav(&args.input)?;
    let frames = buffers.first().map_or(0, Vec::len);
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        buffers.len(),
        spec.sample_rate,
        frames as f32 / sample_rate
    );
    if buffers.len() > MAX_CHANNELS {
        println!(
            "  channels beyond {} pass through unprocessed",
            MAX_CHANNELS
        );
    }

    let mut eq = SimpleEq::new();
    settings.apply_to(eq.params())?;
    eq.set_channel_count(buffers.len());
    eq.prepare(sample_rate, args.block_size);

    let chain = eq.params().snapshot();
    println!(
        "Low cut {:.0} Hz @ {:.0} dB/oct | Peak {:.0} Hz {:+.1} dB Q {:.2} | High cut {:.0} Hz @ {:.0} dB/oct",
        chain.low_cut_freq,
        chain.low_cut_slope.db_per_octave(),
        chain.peak_freq,
        chain.peak_gain_db,
        chain.peak_quality,
        chain.high_cut_freq,
        chain.high_cut_slope.db_per_octave(),
    );

    let input_stats = Stats::measure(&buffers);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut start = 0;
    while start < frames {
        let end = (start + args.block_size).min(frames);
        let mut block: Vec<&mut [f32]> = buffers.iter_mut().map(|b| &mut b[start..end]).collect();
        eq.process(&mut block, end - start);
        start = end;
        pb.set_position(start as u64);
    }

    pb.finish_with_message("done");

    let output_stats = Stats::measure(&buffers);
    println!("\nStats:");
    println!("  Input:  {input_stats}");
    println!("  Output: {output_stats}");

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &buffers, out_spec)?;

    if let Some(path) = &args.save_state {
        save_state(path, &eq.export_state())?;
        println!("State saved to {}", path.display());
    }

    println!("Done!");
    Ok(())
}

/// Level summary across all channels.
struct Stats {
    rms: f32,
    peak: f32,
}

impl Stats {
    fn measure(buffers: &[Vec<f32>]) -> Self {
        let count: usize = buffers.iter().map(Vec::len).sum();
        let sum_sq: f64 = buffers
            .iter()
            .flatten()
            .map(|&s| f64::from(s) * f64::from(s))
            .sum();
        let rms = if count == 0 {
            0.0
        } else {
            (sum_sq / count as f64).sqrt() as f32
        };
        let peak = buffers.iter().flatten().map(|s| s.abs()).fold(0.0, f32::max);
        Self { rms, peak }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RMS {:.1} dB, Peak {:.1} dB",
            linear_to_db(self.rms),
            linear_to_db(self.peak)
        )
    }
}
