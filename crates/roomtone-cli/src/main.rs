//! Roomtone CLI - reverberation time analysis of room recordings.

mod commands;
mod cursor;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roomtone")]
#[command(author, version, about = "Room acoustics RT60 analysis", long_about = None)]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate per-band RT60 of one or more recordings
    Analyze(commands::analyze::AnalyzeArgs),

    /// Show decay reference points of each band
    Decay(commands::decay::DecayArgs),

    /// Show WAV header and whole-signal figures
    Info(commands::info::InfoArgs),

    /// Export the power spectrogram as CSV or PGM
    Spectrogram(commands::spectrogram::SpectrogramArgs),

    /// Export the waveform as CSV
    Waveform(commands::waveform::WaveformArgs),

    /// Generate test recordings
    Generate(commands::generate::GenerateArgs),

    /// Manage analysis profiles
    Profile(commands::profile::ProfileArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Decay(args) => commands::decay::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Spectrogram(args) => commands::spectrogram::run(args),
        Commands::Waveform(args) => commands::waveform::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Profile(args) => commands::profile::run(args),
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown so reports on
/// stdout stay clean. `--verbose` forces debug output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
