//! CLI command implementations.

pub mod analyze;
pub mod common;
pub mod decay;
pub mod generate;
pub mod info;
pub mod profile;
pub mod spectrogram;
pub mod waveform;
