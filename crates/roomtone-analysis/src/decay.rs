//! Reverberation time from a band power curve.
//!
//! The estimator is a fixed decibel-threshold heuristic, not a Schroeder
//! backward integration:
//!
//! 1. take the loudest frame as the peak
//! 2. scanning forward from the peak, pick the frames whose level is nearest
//!    to `peak - 5 dB` and `peak - 25 dB` (first occurrence wins ties)
//! 3. RT20 is the time between those two frames; RT60 is RT20 × 3
//!
//! Curves that never decay still produce a number (often zero). Such results
//! are returned unchanged and flagged through [`DecayEstimate::degeneracy`].

use crate::band::BandCurve;
use crate::error::{AnalysisError, Result};
use serde::Serialize;
use thiserror::Error;

/// Level below the peak where the evaluation range starts, in dB.
pub const START_DROP_DB: f32 = 5.0;

/// Level below the peak where the evaluation range ends, in dB.
pub const END_DROP_DB: f32 = 25.0;

/// Factor extrapolating the 20 dB decay time to 60 dB.
pub const RT20_TO_RT60: f32 = 3.0;

/// Advisory raised for estimates without a usable decay.
///
/// Not fatal: the estimate it accompanies is still returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegenerateDecay {
    /// The -5 dB and -25 dB points are the same frame.
    #[error("-5 dB and -25 dB points collapse onto frame {index}")]
    CollapsedIndices {
        /// The shared frame index.
        index: usize,
    },

    /// The -25 dB point precedes the -5 dB point, giving a negative time.
    #[error("extrapolated RT60 of {rt60_seconds:.3} s is not positive")]
    NonPositiveRt60 {
        /// The mechanically computed RT60.
        rt60_seconds: f32,
    },
}

/// Result of one decay estimation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecayEstimate {
    /// Extrapolated reverberation time in seconds
    pub rt60_seconds: f32,
    /// Time between the -5 dB and -25 dB points in seconds
    pub rt20_seconds: f32,
    /// Index of the loudest frame
    pub peak_index: usize,
    /// Level of the loudest frame in dB
    pub peak_db: f32,
    /// Index of the frame nearest to `peak - 5 dB`
    pub minus5_index: usize,
    /// Index of the frame nearest to `peak - 25 dB`
    pub minus25_index: usize,
    /// Frame times from `minus5_index` to `minus25_index` inclusive
    pub trimmed_times: Vec<f32>,
    /// Levels from `minus5_index` to `minus25_index` inclusive
    pub trimmed_power_db: Vec<f32>,
}

impl DecayEstimate {
    /// Advisory when the estimate carries no acoustic meaning.
    pub fn degeneracy(&self) -> Option<DegenerateDecay> {
        if self.minus5_index == self.minus25_index {
            Some(DegenerateDecay::CollapsedIndices {
                index: self.minus5_index,
            })
        } else if self.rt60_seconds <= 0.0 {
            Some(DegenerateDecay::NonPositiveRt60 {
                rt60_seconds: self.rt60_seconds,
            })
        } else {
            None
        }
    }

    /// Shorthand for `degeneracy().is_some()`.
    pub fn is_degenerate(&self) -> bool {
        self.degeneracy().is_some()
    }

    /// Decay slope between the two reference points in dB per second.
    ///
    /// Zero for degenerate estimates.
    pub fn slope_db_per_second(&self) -> f32 {
        if self.rt20_seconds > 0.0 {
            -(END_DROP_DB - START_DROP_DB) / self.rt20_seconds
        } else {
            0.0
        }
    }
}

/// Estimate RT60 from a band curve.
///
/// Only an empty or inconsistent curve is an error. A curve without decay
/// yields an estimate whose [`DecayEstimate::degeneracy`] is set.
pub fn estimate(curve: &BandCurve) -> Result<DecayEstimate> {
    if curve.times.len() != curve.power_db.len() {
        return Err(AnalysisError::CurveLengthMismatch {
            times: curve.times.len(),
            values: curve.power_db.len(),
        });
    }
    let (peak_index, peak_db) = argmax(&curve.power_db).ok_or(AnalysisError::EmptyCurve)?;

    let tail = &curve.power_db[peak_index..];
    let minus5_index = peak_index + nearest(tail, peak_db - START_DROP_DB);
    let minus25_index = peak_index + nearest(tail, peak_db - END_DROP_DB);

    let rt20_seconds = curve.times[minus25_index] - curve.times[minus5_index];
    let rt60_seconds = rt20_seconds * RT20_TO_RT60;

    let (trimmed_times, trimmed_power_db) = if minus25_index >= minus5_index {
        (
            curve.times[minus5_index..=minus25_index].to_vec(),
            curve.power_db[minus5_index..=minus25_index].to_vec(),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let estimate = DecayEstimate {
        rt60_seconds,
        rt20_seconds,
        peak_index,
        peak_db,
        minus5_index,
        minus25_index,
        trimmed_times,
        trimmed_power_db,
    };

    tracing::debug!(
        peak = peak_index,
        minus5 = minus5_index,
        minus25 = minus25_index,
        rt60 = rt60_seconds,
        "decay estimated"
    );

    Ok(estimate)
}

/// Index and value of the first maximum.
fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut iter = values.iter().copied().enumerate();
    let first = iter.next()?;
    Some(iter.fold(first, |best, (i, v)| if v > best.1 { (i, v) } else { best }))
}

/// Index of the first value with the smallest distance to `target`.
fn nearest(values: &[f32], target: f32) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &v) in values.iter().enumerate() {
        let dist = (v - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
