//! Analysis parameters.

use crate::band::{BandEdges, DEFAULT_DB_EPSILON};
use crate::error::{AnalysisError, Result};
use crate::fft::Window;
use crate::metrics::DEFAULT_TARGET_RT60;
use crate::spectrogram::{DEFAULT_OVERLAP, DEFAULT_WINDOW_SIZE};
use serde::{Deserialize, Serialize};

/// Every tunable of the pipeline, with the reference defaults.
///
/// Missing fields deserialize to their defaults, so a partial TOML table is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// STFT window length in samples
    pub window_size: usize,
    /// Samples shared by consecutive frames
    pub overlap: usize,
    /// STFT window function
    pub window: Window,
    /// Floor added to band power before the dB conversion
    pub db_epsilon: f32,
    /// Reference RT60 for the deviation score, in seconds
    pub target_rt60: f32,
    /// Edges of the Low/Mid/High bands
    pub bands: BandEdges,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            overlap: DEFAULT_OVERLAP,
            window: Window::Hann,
            db_epsilon: DEFAULT_DB_EPSILON,
            target_rt60: DEFAULT_TARGET_RT60,
            bands: BandEdges::default(),
        }
    }
}

impl AnalysisConfig {
    /// Samples between frame starts.
    pub fn hop_size(&self) -> Result<usize> {
        if self.overlap >= self.window_size {
            return Err(AnalysisError::InvalidConfig(format!(
                "overlap {} must be smaller than window size {}",
                self.overlap, self.window_size
            )));
        }
        Ok(self.window_size - self.overlap)
    }

    /// Check every parameter against its domain.
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "window size must be at least 2, got {}",
                self.window_size
            )));
        }
        self.hop_size()?;
        if !(self.db_epsilon.is_finite() && self.db_epsilon > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "dB epsilon must be positive, got {}",
                self.db_epsilon
            )));
        }
        if !(self.target_rt60.is_finite() && self.target_rt60 >= 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "target RT60 must be non-negative, got {}",
                self.target_rt60
            )));
        }
        self.bands.validate()
    }
}
