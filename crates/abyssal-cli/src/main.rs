//! Abyssal CLI - render audio files through the Abyssal Gaze processor.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "abyssal")]
#[command(author, version, about = "Abyssal Gaze multi-effect processor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the effects chain
    Process(commands::process::ProcessArgs),

    /// List the factory presets or show one
    Presets(commands::presets::PresetsArgs),

    /// List the processor's parameters
    Params,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Params => commands::params::run(),
    }
}
