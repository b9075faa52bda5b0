//! Roomtone Analysis - reverberation time of room recordings
//!
//! Turns a mono recording into a per-band estimate of how fast sound decays:
//!
//! - [`signal`] - mono [`AudioBuffer`] from interleaved decoder output
//! - [`spectrogram`] - STFT power spectrogram
//! - [`band`] - frequency ranges and band power curves in dB
//! - [`decay`] - -5/-25 dB reference points and RT60 (RT20 × 3)
//! - [`metrics`] - Low/Mid/High aggregation and deviation score
//! - [`summary`] - duration, dominant frequency and peak level
//! - [`export`] - CSV and PGM output for plotting tools
//!
//! Everything here is pure computation on in-memory data. Reading files and
//! drawing plots belong to the callers.
//!
//! ## Example
//!
//! ```rust
//! use roomtone_analysis::{AnalysisConfig, aggregate, signal};
//! use std::f32::consts::PI;
//!
//! let sample_rate = 44100;
//! let samples: Vec<f32> = (0..sample_rate)
//!     .map(|i| {
//!         let t = i as f32 / sample_rate as f32;
//!         (2.0 * PI * 1000.0 * t).sin() * (-5.0 * t).exp()
//!     })
//!     .collect();
//!
//! let buffer = signal::load(&samples, 1, sample_rate as u32).unwrap();
//! let summary = aggregate(&buffer, &AnalysisConfig::default()).unwrap();
//! assert!(summary.mid_rt60() > 0.0);
//! ```
//!
//! ## Single band
//!
//! ```rust,ignore
//! use roomtone_analysis::{band, decay, spectrogram, FrequencyRange};
//!
//! let spec = spectrogram::transform(&buffer, 1024)?;
//! let curve = band::extract(&spec, FrequencyRange::new(250.0, 2000.0)?, 1e-10)?;
//! let estimate = decay::estimate(&curve)?;
//! if let Some(advisory) = estimate.degeneracy() {
//!     eprintln!("warning: {advisory}");
//! }
//! ```

pub mod band;
pub mod config;
pub mod decay;
pub mod error;
pub mod export;
pub mod fft;
pub mod metrics;
pub mod signal;
pub mod spectrogram;
pub mod summary;

// Re-export main types
pub use band::{Band, BandCurve, BandEdges, FrequencyRange, DEFAULT_DB_EPSILON};
pub use config::AnalysisConfig;
pub use decay::{DecayEstimate, DegenerateDecay};
pub use error::{AnalysisError, Result};
pub use fft::{Fft, Window};
pub use metrics::{
    AcousticSummary, BandAnalysis, BandReport, BandSummary, DEFAULT_TARGET_RT60, aggregate,
    analyze_band, analyze_bands, deviation_score, summarize_bands,
};
pub use signal::AudioBuffer;
pub use spectrogram::{Spectrogram, StftAnalyzer};
pub use summary::{FrequencySummary, summarize};
