//! SimpleEQ CLI - offline rendering and inspection for the SimpleEQ equalizer.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simpleeq")]
#[command(author, version, about = "SimpleEQ three-band equalizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the equalizer
    Process(commands::process::ProcessArgs),

    /// List the equalizer parameters
    Params(commands::params::ParamsArgs),

    /// Print the magnitude response for a set of parameters
    Response(commands::response::ResponseArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Response(args) => commands::response::run(args),
    }
}
