//! Error types for the analysis pipeline.

use thiserror::Error;

/// Errors raised by the analysis pipeline.
///
/// Every variant is fatal to the invocation that produced it. A degenerate
/// decay is not an error; see [`crate::decay::DegenerateDecay`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Sample width, channel layout or sample rate could not be interpreted.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The decoded buffer held no samples.
    #[error("signal contains no samples")]
    EmptySignal,

    /// The signal is shorter than a single analysis window.
    #[error("insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples {
        /// Samples needed for one analysis window.
        required: usize,
        /// Samples available.
        actual: usize,
    },

    /// A frequency range with `low >= high` or a negative bound.
    #[error("invalid frequency range: [{low}, {high}) Hz")]
    InvalidRange {
        /// Lower bound in Hz.
        low: f32,
        /// Upper bound in Hz.
        high: f32,
    },

    /// No spectrogram bin centre lies inside the requested range.
    #[error("frequency range [{low}, {high}) Hz selects no spectrogram bins")]
    EmptyBand {
        /// Lower bound in Hz.
        low: f32,
        /// Upper bound in Hz.
        high: f32,
    },

    /// A decay curve with no points was handed to the estimator.
    #[error("decay curve is empty")]
    EmptyCurve,

    /// Time stamps and decibel values of a curve differ in length.
    #[error("decay curve has {times} time stamps but {values} values")]
    CurveLengthMismatch {
        /// Number of time stamps.
        times: usize,
        /// Number of decibel values.
        values: usize,
    },

    /// A spectrogram grid whose rows do not match its frequency and time axes.
    #[error("malformed spectrogram: {0}")]
    MalformedSpectrogram(String),

    /// An analysis parameter is out of its valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
