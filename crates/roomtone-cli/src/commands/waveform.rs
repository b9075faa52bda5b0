//! Waveform export command.

use super::common::load_recording;
use clap::Args;
use roomtone_analysis::export::export_waveform_csv;
use std::path::PathBuf;

#[derive(Args)]
pub struct WaveformArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output CSV file
    #[arg(short, long)]
    output: PathBuf,
}

pub fn run(args: WaveformArgs) -> anyhow::Result<()> {
    let buffer = load_recording(&args.input)?;
    export_waveform_csv(&buffer, &args.output)?;
    println!(
        "Wrote {} samples ({:.3}s) to {}",
        buffer.len(),
        buffer.duration_seconds(),
        args.output.display()
    );
    Ok(())
}
