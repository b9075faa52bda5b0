//! Per-band RT60 aggregation.
//!
//! Runs the band extraction and decay estimation for Low, Mid and High over
//! one shared spectrogram, then scores how far the three RT60 values sit from
//! a target.

use crate::band::{self, Band, BandCurve, FrequencyRange};
use crate::config::AnalysisConfig;
use crate::decay::{self, DecayEstimate, DegenerateDecay};
use crate::error::Result;
use crate::signal::AudioBuffer;
use crate::spectrogram::{self, Spectrogram};
use crate::summary;
use serde::Serialize;

/// Reference RT60 the deviation score is measured against, in seconds.
pub const DEFAULT_TARGET_RT60: f32 = 0.5;

/// Full decay analysis of one band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandAnalysis {
    /// Which canonical band
    pub band: Band,
    /// Frequency range the curve was averaged over
    pub range: FrequencyRange,
    /// Band power over time
    pub curve: BandCurve,
    /// Decay reference points and RT60
    pub estimate: DecayEstimate,
}

/// RT60 of one band together with its advisory, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandReport {
    /// Which canonical band
    pub band: Band,
    /// Frequency range analysed
    pub range: FrequencyRange,
    /// Extrapolated RT60 in seconds
    pub rt60_seconds: f32,
    /// Set when the decay could not be measured meaningfully
    pub advisory: Option<DegenerateDecay>,
}

impl From<&BandAnalysis> for BandReport {
    fn from(analysis: &BandAnalysis) -> Self {
        Self {
            band: analysis.band,
            range: analysis.range,
            rt60_seconds: analysis.estimate.rt60_seconds,
            advisory: analysis.estimate.degeneracy(),
        }
    }
}

/// RT60 per band and the deviation from the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandSummary {
    /// Low band result
    pub low: BandReport,
    /// Mid band result
    pub mid: BandReport,
    /// High band result
    pub high: BandReport,
    /// Target the deviation score refers to, in seconds
    pub target_rt60: f32,
    /// Mean absolute difference between each band RT60 and the target
    pub deviation_score: f32,
}

impl BandSummary {
    /// Reports in Low, Mid, High order.
    pub fn reports(&self) -> [&BandReport; 3] {
        [&self.low, &self.mid, &self.high]
    }

    /// Bands whose estimate carries an advisory.
    pub fn degenerate_bands(&self) -> Vec<Band> {
        self.reports()
            .into_iter()
            .filter(|r| r.advisory.is_some())
            .map(|r| r.band)
            .collect()
    }
}

/// Terminal result of analysing one recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcousticSummary {
    /// Length of the recording in seconds
    pub duration_seconds: f32,
    /// Dominant frequency of the whole recording in Hz
    pub peak_frequency_hz: f32,
    /// Largest absolute sample value
    pub peak_amplitude: f32,
    /// Per-band RT60 and deviation score
    #[serde(flatten)]
    pub bands: BandSummary,
}

impl AcousticSummary {
    /// RT60 of the Low band in seconds.
    pub fn low_rt60(&self) -> f32 {
        self.bands.low.rt60_seconds
    }

    /// RT60 of the Mid band in seconds.
    pub fn mid_rt60(&self) -> f32 {
        self.bands.mid.rt60_seconds
    }

    /// RT60 of the High band in seconds.
    pub fn high_rt60(&self) -> f32 {
        self.bands.high.rt60_seconds
    }

    /// Mean absolute deviation of the band RT60s from the target.
    pub fn deviation_score(&self) -> f32 {
        self.bands.deviation_score
    }
}

/// Mean of `|rt60 - target|` over the given values; zero for no values.
pub fn deviation_score(rt60s: &[f32], target_rt60: f32) -> f32 {
    if rt60s.is_empty() {
        return 0.0;
    }
    rt60s.iter().map(|r| (r - target_rt60).abs()).sum::<f32>() / rt60s.len() as f32
}

/// Extract and estimate a single band of a spectrogram.
pub fn analyze_band(
    spectrogram: &Spectrogram,
    band: Band,
    config: &AnalysisConfig,
) -> Result<BandAnalysis> {
    let range = config.bands.range(band, spectrogram.sample_rate())?;
    let curve = band::extract(spectrogram, range, config.db_epsilon)?;
    let estimate = decay::estimate(&curve)?;

    if let Some(advisory) = estimate.degeneracy() {
        tracing::warn!(band = %band, range = %range, %advisory, "degenerate decay");
    }

    Ok(BandAnalysis {
        band,
        range,
        curve,
        estimate,
    })
}

/// Analyse Low, Mid and High over one spectrogram.
///
/// Any extraction error aborts the whole call; degenerate decays do not.
pub fn analyze_bands(spectrogram: &Spectrogram, config: &AnalysisConfig) -> Result<[BandAnalysis; 3]> {
    Ok([
        analyze_band(spectrogram, Band::Low, config)?,
        analyze_band(spectrogram, Band::Mid, config)?,
        analyze_band(spectrogram, Band::High, config)?,
    ])
}

/// Per-band RT60 summary of a precomputed spectrogram.
pub fn summarize_bands(spectrogram: &Spectrogram, config: &AnalysisConfig) -> Result<BandSummary> {
    let [low, mid, high] = analyze_bands(spectrogram, config)?;
    Ok(band_summary(&low, &mid, &high, config.target_rt60))
}

/// Combine three band analyses into a [`BandSummary`].
pub fn band_summary(
    low: &BandAnalysis,
    mid: &BandAnalysis,
    high: &BandAnalysis,
    target_rt60: f32,
) -> BandSummary {
    let (low, mid, high) = (
        BandReport::from(low),
        BandReport::from(mid),
        BandReport::from(high),
    );
    let deviation = deviation_score(
        &[low.rt60_seconds, mid.rt60_seconds, high.rt60_seconds],
        target_rt60,
    );
    BandSummary {
        low,
        mid,
        high,
        target_rt60,
        deviation_score: deviation,
    }
}

/// Run the whole pipeline on a recording.
///
/// Deterministic: the same buffer and configuration always give the same
/// summary.
pub fn aggregate(buffer: &AudioBuffer, config: &AnalysisConfig) -> Result<AcousticSummary> {
    config.validate()?;
    let spectrogram = spectrogram::transform_with(buffer, config)?;
    let bands = summarize_bands(&spectrogram, config)?;
    let overall = summary::summarize(buffer);

    Ok(AcousticSummary {
        duration_seconds: overall.duration_seconds,
        peak_frequency_hz: overall.peak_frequency_hz,
        peak_amplitude: overall.peak_amplitude,
        bands,
    })
}
