//! Whole-signal descriptive figures.
//!
//! Independent of the banded decay path: the peak frequency comes from one
//! FFT over the entire unwindowed recording.

use crate::fft::Fft;
use crate::signal::AudioBuffer;
use serde::Serialize;

/// Duration, dominant frequency and peak level of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencySummary {
    /// Length of the recording in seconds
    pub duration_seconds: f32,
    /// Frequency of the strongest full-signal FFT bin in Hz
    pub peak_frequency_hz: f32,
    /// Largest absolute sample value (highest resonance)
    pub peak_amplitude: f32,
}

/// Describe a recording as a whole.
pub fn summarize(buffer: &AudioBuffer) -> FrequencySummary {
    FrequencySummary {
        duration_seconds: buffer.duration_seconds(),
        peak_frequency_hz: peak_frequency(buffer.samples(), buffer.sample_rate() as f32),
        peak_amplitude: buffer.peak_amplitude(),
    }
}

/// Frequency of the largest-magnitude bin of a full-length real FFT.
///
/// Bin `k` maps to `k * sample_rate / len`. Ties go to the lower bin.
/// Returns 0 for an empty signal.
pub fn peak_frequency(samples: &[f32], sample_rate: f32) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let fft = Fft::new(samples.len());
    let magnitudes = fft.magnitudes(samples);

    let mut peak_bin = 0;
    let mut peak_mag = f32::NEG_INFINITY;
    for (bin, &mag) in magnitudes.iter().enumerate() {
        if mag > peak_mag {
            peak_bin = bin;
            peak_mag = mag;
        }
    }
    peak_bin as f32 * sample_rate / samples.len() as f32
}
