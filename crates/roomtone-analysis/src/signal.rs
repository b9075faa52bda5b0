//! Mono signal loading.
//!
//! Decoders hand over interleaved frames together with a declared channel
//! count; this module turns them into an [`AudioBuffer`], the single-channel
//! input every other stage of the pipeline consumes.
//!
//! Multi-channel input is reduced to mono by averaging the channels of each
//! frame. No channel is ever dropped.

use crate::error::{AnalysisError, Result};

/// An immutable mono recording.
///
/// Invariants: at least one sample, positive sample rate, one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    samples: Vec<f32>,
}

impl AudioBuffer {
    /// Wrap mono samples.
    ///
    /// Fails with [`AnalysisError::EmptySignal`] for an empty sequence and
    /// with [`AnalysisError::UnsupportedFormat`] for a zero sample rate.
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalysisError::UnsupportedFormat(
                "sample rate must be positive".to_string(),
            ));
        }
        if samples.is_empty() {
            return Err(AnalysisError::EmptySignal);
        }
        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Mono samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with [`Self::len`].
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (`len / sample_rate`).
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Largest absolute sample value.
    pub fn peak_amplitude(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }

    /// Evenly spaced time stamps from 0 to the duration, one per sample.
    ///
    /// Both endpoints are included, as in a waveform plot axis.
    pub fn time_axis(&self) -> Vec<f32> {
        let n = self.samples.len();
        if n == 1 {
            return vec![0.0];
        }
        let step = self.duration_seconds() / (n - 1) as f32;
        (0..n).map(|i| i as f32 * step).collect()
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

/// Build an [`AudioBuffer`] from interleaved floating-point frames.
///
/// With `channels > 1` each frame is averaged into one mono sample.
pub fn load(interleaved: &[f32], channels: u16, sample_rate: u32) -> Result<AudioBuffer> {
    let channels = check_layout(interleaved.len(), channels)?;
    let mono = if channels > 1 {
        tracing::debug!(channels, frames = interleaved.len() / channels, "downmixing");
        downmix(interleaved, channels)
    } else {
        interleaved.to_vec()
    };
    AudioBuffer::new(sample_rate, mono)
}

/// Build an [`AudioBuffer`] from interleaved integer PCM frames.
///
/// `bits_per_sample` must be 8, 16, 24 or 32; values are scaled to `[-1, 1)`.
pub fn load_pcm(
    interleaved: &[i32],
    bits_per_sample: u16,
    channels: u16,
    sample_rate: u32,
) -> Result<AudioBuffer> {
    let normalized = normalize_pcm(interleaved, bits_per_sample)?;
    load(&normalized, channels, sample_rate)
}

/// Scale signed integer PCM samples of the given width to floats.
pub fn normalize_pcm(samples: &[i32], bits_per_sample: u16) -> Result<Vec<f32>> {
    if !matches!(bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(AnalysisError::UnsupportedFormat(format!(
            "{bits_per_sample}-bit integer samples"
        )));
    }
    let max_val = (1u64 << (bits_per_sample - 1)) as f32;
    Ok(samples.iter().map(|&v| v as f32 / max_val).collect())
}

/// Average interleaved frames into a mono sequence.
///
/// A trailing partial frame is ignored.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn check_layout(len: usize, channels: u16) -> Result<usize> {
    let channels = channels as usize;
    if channels == 0 {
        return Err(AnalysisError::UnsupportedFormat(
            "channel count must be at least 1".to_string(),
        ));
    }
    if len % channels != 0 {
        return Err(AnalysisError::UnsupportedFormat(format!(
            "{len} samples do not divide into {channels} channels"
        )));
    }
    Ok(channels)
}
