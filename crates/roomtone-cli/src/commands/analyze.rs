//! Per-band RT60 analysis command.

use super::common::{AnalysisOptions, load_recording};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use roomtone_analysis::{AcousticSummary, AnalysisConfig, aggregate};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    options: AnalysisOptions,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Summary of one input file, as reported in JSON.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(flatten)]
    summary: AcousticSummary,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = args.options.config()?;

    let results = if args.inputs.len() > 1 {
        analyze_batch(&args.inputs, &config)?
    } else {
        args.inputs
            .iter()
            .map(|path| (path.clone(), analyze_file(path, &config)))
            .collect()
    };

    let mut reports = Vec::new();
    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(summary) => reports.push(FileReport {
                file: path.display().to_string(),
                summary,
            }),
            Err(e) if args.inputs.len() > 1 => {
                eprintln!("error: {}: {e:#}", path.display());
                failures += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if args.json {
        println!("{}", to_json(&reports)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print_report(report);
        }
    }

    if let Some(output) = &args.output {
        std::fs::write(output, to_json(&reports)?)?;
        if !args.json {
            println!("\nReport written to {}", output.display());
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} files could not be analysed", args.inputs.len());
    }
    Ok(())
}

fn analyze_file(path: &Path, config: &AnalysisConfig) -> anyhow::Result<AcousticSummary> {
    let buffer = load_recording(path)?;
    let summary = aggregate(&buffer, config)?;
    Ok(summary)
}

fn analyze_batch(
    inputs: &[PathBuf],
    config: &AnalysisConfig,
) -> anyhow::Result<Vec<(PathBuf, anyhow::Result<AcousticSummary>)>> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut results = Vec::with_capacity(inputs.len());
    for path in inputs {
        pb.set_message(path.display().to_string());
        results.push((path.clone(), analyze_file(path, config)));
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(results)
}

/// One object for a single file, an array otherwise.
fn to_json(reports: &[FileReport]) -> anyhow::Result<String> {
    Ok(match reports {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(reports)?,
    })
}

fn print_report(report: &FileReport) {
    let summary = &report.summary;

    println!("File:            {}", report.file);
    println!("Duration:        {:.3}s", summary.duration_seconds);
    println!("Peak frequency:  {:.1} Hz", summary.peak_frequency_hz);
    println!("Peak amplitude:  {:.4}", summary.peak_amplitude);
    println!();
    println!("  {:<6} {:>18} {:>10}", "Band", "Range", "RT60");
    println!("  {:-<6} {:->18} {:->10}", "", "", "");
    for band in summary.bands.reports() {
        let flag = if band.advisory.is_some() { " *" } else { "" };
        println!(
            "  {:<6} {:>18} {:>9.3}s{}",
            band.band,
            band.range.to_string(),
            band.rt60_seconds,
            flag
        );
    }
    println!();
    println!("Target RT60:     {:.2}s", summary.bands.target_rt60);
    println!("Deviation score: {:.3}s", summary.deviation_score());

    for band in summary.bands.reports() {
        if let Some(advisory) = &band.advisory {
            println!("  * {}: {advisory}", band.band);
        }
    }
}
