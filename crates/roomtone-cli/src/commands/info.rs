//! Display WAV metadata and whole-signal figures.

use super::common::load_recording;
use clap::Args;
use roomtone_analysis::summarize;
use roomtone_io::read_wav_info;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    println!("File:           {}", args.file.display());
    println!("Format:         {} {}-bit", info.format, info.bits_per_sample);
    println!("Channels:       {}", info.channels);
    println!("Sample Rate:    {} Hz", info.sample_rate);
    println!(
        "Duration:       {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:      {}", format_bytes(file_size));

    let buffer = load_recording(&args.file)?;
    let summary = summarize(&buffer);
    println!("Peak frequency: {:.1} Hz", summary.peak_frequency_hz);
    println!("Peak amplitude: {:.4}", summary.peak_amplitude);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
