//! Export formats for analysis results.
//!
//! Plain text files meant for external plotting tools:
//! - CSV for decay curves, band curves, waveforms and spectrograms
//! - PGM for spectrogram intensity images

use crate::metrics::BandAnalysis;
use crate::signal::AudioBuffer;
use crate::spectrogram::Spectrogram;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export the trimmed decay curves of several bands to one CSV file.
///
/// Columns: `band,time_s,power_db`. Only the points between each band's
/// -5 dB and -25 dB references are written, which is what a combined RT60
/// plot shows.
pub fn export_decay_csv(analyses: &[BandAnalysis], path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);

    writeln!(file, "band,time_s,power_db")?;
    for analysis in analyses {
        let estimate = &analysis.estimate;
        for (t, db) in estimate
            .trimmed_times
            .iter()
            .zip(estimate.trimmed_power_db.iter())
        {
            writeln!(file, "{},{:.6},{:.4}", analysis.band, t, db)?;
        }
    }

    file.flush()
}

/// Export the untrimmed band curves of several bands to one CSV file.
///
/// Columns: `band,time_s,power_db`, one row per spectrogram frame and band.
pub fn export_band_curves_csv(
    analyses: &[BandAnalysis],
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);

    writeln!(file, "band,time_s,power_db")?;
    for analysis in analyses {
        let curve = &analysis.curve;
        for (t, db) in curve.times.iter().zip(curve.power_db.iter()) {
            writeln!(file, "{},{:.6},{:.4}", analysis.band, t, db)?;
        }
    }

    file.flush()
}

/// Export the waveform of a recording to CSV.
///
/// Columns: `time_s,amplitude`, one row per sample.
pub fn export_waveform_csv(buffer: &AudioBuffer, path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);

    writeln!(file, "time_s,amplitude")?;
    for (t, s) in buffer.time_axis().iter().zip(buffer.samples()) {
        writeln!(file, "{:.6},{:.6}", t, s)?;
    }

    file.flush()
}

/// Export spectrogram to CSV format.
///
/// Time on rows, frequency bins on columns. The header row holds the bin
/// frequencies, the first column the frame times.
///
/// # Arguments
/// * `spectrogram` - The spectrogram to export
/// * `path` - Output file path
/// * `db_scale` - If true, write dB relative to the grid maximum
pub fn export_spectrogram_csv(
    spectrogram: &Spectrogram,
    path: impl AsRef<Path>,
    db_scale: bool,
) -> std::io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);

    write!(file, "time_s")?;
    for freq in spectrogram.frequencies() {
        write!(file, ",{:.2}", freq)?;
    }
    writeln!(file)?;

    let values = if db_scale {
        spectrogram.to_db_relative(f32::MIN)
    } else {
        spectrogram.power().to_vec()
    };

    for (frame, time) in spectrogram.times().iter().enumerate() {
        write!(file, "{:.6}", time)?;
        for row in &values {
            write!(file, ",{:.6e}", row[frame])?;
        }
        writeln!(file)?;
    }

    file.flush()
}

/// Export spectrogram to PGM grayscale image format.
///
/// Time runs along X, frequency along Y with low frequencies at the bottom.
///
/// # Arguments
///
/// * `spectrogram` - The spectrogram to export
/// * `path` - Output file path
/// * `db_range` - Dynamic range in dB (values below max-db_range map to black)
pub fn export_spectrogram_pgm(
    spectrogram: &Spectrogram,
    path: impl AsRef<Path>,
    db_range: f32,
) -> std::io::Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);

    let width = spectrogram.num_frames();
    let height = spectrogram.num_bins();

    writeln!(file, "P2")?;
    writeln!(file, "# Spectrogram intensity from roomtone-analysis")?;
    writeln!(file, "{} {}", width, height)?;
    writeln!(file, "255")?;

    let db = spectrogram.to_db_relative(-db_range);

    for row in db.iter().rev() {
        let pixels: Vec<String> = row
            .iter()
            .map(|&v| {
                let normalized = ((v + db_range) / db_range).clamp(0.0, 1.0);
                ((normalized * 255.0) as u8).to_string()
            })
            .collect();
        writeln!(file, "{}", pixels.join(" "))?;
    }

    file.flush()
}
