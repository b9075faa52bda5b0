//! Frequency bands and band power curves.
//!
//! A band curve collapses a spectrogram to one decibel value per time frame by
//! averaging the power of every bin whose centre frequency lies in a
//! half-open range `[low, high)`.

use crate::error::{AnalysisError, Result};
use crate::spectrogram::Spectrogram;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Floor added to band power before taking the logarithm.
///
/// Keeps silent frames finite instead of `-inf`.
pub const DEFAULT_DB_EPSILON: f32 = 1e-10;

/// A half-open frequency interval `[low, high)` in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRange {
    low: f32,
    high: f32,
}

impl FrequencyRange {
    /// Create a range; requires `0 <= low < high`.
    pub fn new(low: f32, high: f32) -> Result<Self> {
        if !low.is_finite() || low < 0.0 || high.is_nan() || high <= low {
            return Err(AnalysisError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Inclusive lower bound in Hz.
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Exclusive upper bound in Hz.
    pub fn high(&self) -> f32 {
        self.high
    }

    /// Width of the range in Hz.
    pub fn width(&self) -> f32 {
        self.high - self.low
    }

    /// Whether `freq` falls inside `[low, high)`.
    pub fn contains(&self, freq: f32) -> bool {
        freq >= self.low && freq < self.high
    }
}

impl fmt::Display for FrequencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}-{:.0} Hz", self.low, self.high)
    }
}

/// The three canonical analysis bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// Bass region, 0-250 Hz by default
    Low,
    /// Speech region, 250-2000 Hz by default
    Mid,
    /// Treble region, 2000 Hz to Nyquist by default
    High,
}

impl Band {
    /// All bands in ascending frequency order.
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Edges separating the canonical bands.
///
/// Low is `[low_hz, low_mid_hz)`, Mid is `[low_mid_hz, mid_high_hz)` and High
/// is `[mid_high_hz, high_hz)`, where an absent `high_hz` means Nyquist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandEdges {
    /// Lower edge of the Low band
    pub low_hz: f32,
    /// Boundary between Low and Mid
    pub low_mid_hz: f32,
    /// Boundary between Mid and High
    pub mid_high_hz: f32,
    /// Upper edge of the High band (Nyquist if `None`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_hz: Option<f32>,
}

impl Default for BandEdges {
    fn default() -> Self {
        Self {
            low_hz: 0.0,
            low_mid_hz: 250.0,
            mid_high_hz: 2000.0,
            high_hz: None,
        }
    }
}

impl BandEdges {
    /// Concrete range of `band` for a signal sampled at `sample_rate`.
    ///
    /// A High band that defaults to Nyquist but starts at or above it selects
    /// no bins and fails with [`AnalysisError::EmptyBand`].
    pub fn range(&self, band: Band, sample_rate: f32) -> Result<FrequencyRange> {
        match band {
            Band::Low => FrequencyRange::new(self.low_hz, self.low_mid_hz),
            Band::Mid => FrequencyRange::new(self.low_mid_hz, self.mid_high_hz),
            Band::High => match self.high_hz {
                Some(high) => FrequencyRange::new(self.mid_high_hz, high),
                None => {
                    let nyquist = sample_rate / 2.0;
                    if nyquist <= self.mid_high_hz {
                        return Err(AnalysisError::EmptyBand {
                            low: self.mid_high_hz,
                            high: nyquist,
                        });
                    }
                    FrequencyRange::new(self.mid_high_hz, nyquist)
                }
            },
        }
    }

    /// Check that the edges are non-negative and strictly ascending.
    pub fn validate(&self) -> Result<()> {
        FrequencyRange::new(self.low_hz, self.low_mid_hz)?;
        FrequencyRange::new(self.low_mid_hz, self.mid_high_hz)?;
        if let Some(high) = self.high_hz {
            FrequencyRange::new(self.mid_high_hz, high)?;
        }
        Ok(())
    }
}

/// Band power over time, in decibels.
///
/// `times` is the spectrogram's frame axis; `power_db` has one value per
/// entry of `times`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCurve {
    /// Frame times in seconds
    pub times: Vec<f32>,
    /// Band power per frame in dB
    pub power_db: Vec<f32>,
}

impl BandCurve {
    /// Number of points on the curve
    pub fn len(&self) -> usize {
        self.power_db.len()
    }

    /// True if the curve has no points
    pub fn is_empty(&self) -> bool {
        self.power_db.is_empty()
    }
}

/// Mean linear power per frame over the bins inside `range`.
///
/// Fails with [`AnalysisError::EmptyBand`] when no bin centre is in range.
pub fn band_power(spectrogram: &Spectrogram, range: FrequencyRange) -> Result<Vec<f32>> {
    let rows: Vec<&[f32]> = spectrogram
        .frequencies()
        .iter()
        .zip(spectrogram.power())
        .filter(|&(&freq, _)| range.contains(freq))
        .map(|(_, row)| row.as_slice())
        .collect();

    if rows.is_empty() {
        return Err(AnalysisError::EmptyBand {
            low: range.low(),
            high: range.high(),
        });
    }

    let mut sums = vec![0.0f32; spectrogram.num_frames()];
    for row in &rows {
        for (sum, &p) in sums.iter_mut().zip(row.iter()) {
            *sum += p;
        }
    }

    let count = rows.len() as f32;
    tracing::debug!(range = %range, bins = rows.len(), "band selected");
    Ok(sums.into_iter().map(|s| s / count).collect())
}

/// Reduce a spectrogram to the decibel power curve of one band.
///
/// Each frame becomes `10 * log10(mean_power + epsilon)`.
pub fn extract(spectrogram: &Spectrogram, range: FrequencyRange, epsilon: f32) -> Result<BandCurve> {
    let power = band_power(spectrogram, range)?;
    let power_db = power
        .into_iter()
        .map(|p| 10.0 * (p + epsilon).log10())
        .collect();

    Ok(BandCurve {
        times: spectrogram.times().to_vec(),
        power_db,
    })
}
