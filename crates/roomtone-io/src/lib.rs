//! Audio file I/O for roomtone.
//!
//! This crate provides:
//!
//! - **WAV decoding**: [`read_wav`] turns a file of any channel count into a
//!   mono [`AudioBuffer`](roomtone_analysis::AudioBuffer)
//! - **Header inspection**: [`read_wav_info`] reports format and duration
//!   without decoding samples
//! - **WAV encoding**: [`write_wav`] and [`write_buffer`] for test signals
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomtone_analysis::{aggregate, AnalysisConfig};
//! use roomtone_io::read_wav;
//!
//! let buffer = read_wav("hall.wav")?;
//! let summary = aggregate(&buffer, &AnalysisConfig::default())?;
//! println!("mid RT60: {:.2} s", summary.mid_rt60());
//! ```

mod wav;

pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_buffer, write_wav};

use roomtone_analysis::AnalysisError;

/// Error types for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV container could not be parsed or written.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Decoded content could not become an analysable signal.
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the file was readable but its encoding is not handled.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_)
                | Error::Wav(hound::Error::Unsupported)
                | Error::Analysis(AnalysisError::UnsupportedFormat(_))
        )
    }
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_errors_pass_through_display() {
        let err = Error::from(AnalysisError::EmptySignal);
        assert_eq!(err.to_string(), AnalysisError::EmptySignal.to_string());
    }

    #[test]
    fn unsupported_classification() {
        assert!(Error::UnsupportedFormat("a-law".into()).is_unsupported());
        assert!(Error::Wav(hound::Error::Unsupported).is_unsupported());
        assert!(
            Error::Analysis(AnalysisError::UnsupportedFormat("12-bit".into())).is_unsupported()
        );
        assert!(!Error::Analysis(AnalysisError::EmptySignal).is_unsupported());
    }
}
