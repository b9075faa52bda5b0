//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use roomtone_analysis::{AnalysisConfig, AudioBuffer, Band, Window};
use roomtone_config::{AnalysisProfile, resolve_profile};
use roomtone_io::read_wav;
use std::path::Path;

/// Analysis parameters: a profile plus per-field overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Profile name or path to a profile TOML file
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// STFT window length in samples
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Samples shared by consecutive STFT frames
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Window function (hann, hamming, blackman, rectangular)
    #[arg(long, value_parser = parse_window)]
    pub window: Option<Window>,

    /// Target RT60 in seconds for the deviation score
    #[arg(long)]
    pub target_rt60: Option<f32>,
}

impl AnalysisOptions {
    /// Profile after applying command-line overrides, validated.
    pub fn resolve(&self) -> anyhow::Result<AnalysisProfile> {
        let mut profile = match &self.profile {
            Some(name) => resolve_profile(name)?,
            None => AnalysisProfile::default(),
        };
        apply_overrides(&mut profile.analysis, self);
        profile.validate()?;
        tracing::debug!(profile = %profile.name, config = ?profile.analysis, "analysis parameters");
        Ok(profile)
    }

    /// Resolved analysis parameters.
    pub fn config(&self) -> anyhow::Result<AnalysisConfig> {
        Ok(self.resolve()?.analysis)
    }
}

fn apply_overrides(config: &mut AnalysisConfig, options: &AnalysisOptions) {
    if let Some(window_size) = options.window_size {
        config.window_size = window_size;
    }
    if let Some(overlap) = options.overlap {
        config.overlap = overlap;
    }
    if let Some(window) = options.window {
        config.window = window;
    }
    if let Some(target) = options.target_rt60 {
        config.target_rt60 = target;
    }
}

/// Decode a WAV file into a mono buffer, naming the file on failure.
pub fn load_recording(path: &Path) -> anyhow::Result<AudioBuffer> {
    read_wav(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Parse a window function name for clap's `value_parser`.
pub fn parse_window(s: &str) -> Result<Window, String> {
    Window::from_name(s).ok_or_else(|| {
        format!("unknown window '{s}' (expected hann, hamming, blackman or rectangular)")
    })
}

/// Parse a band name for clap's `value_parser`.
pub fn parse_band(s: &str) -> Result<Band, String> {
    Band::ALL
        .into_iter()
        .find(|b| b.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown band '{s}' (expected low, mid or high)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_profile_values() {
        let options = AnalysisOptions {
            profile: Some("concert_hall".to_string()),
            window_size: Some(8192),
            target_rt60: Some(1.8),
            ..AnalysisOptions::default()
        };
        let config = options.config().unwrap();
        assert_eq!(config.window_size, 8192);
        assert_eq!(config.overlap, 512);
        assert_eq!(config.target_rt60, 1.8);
    }

    #[test]
    fn no_profile_means_reference_defaults() {
        let config = AnalysisOptions::default().config().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn invalid_override_is_rejected() {
        let options = AnalysisOptions {
            window_size: Some(128),
            ..AnalysisOptions::default()
        };
        // Default overlap of 128 leaves no hop
        assert!(options.config().is_err());
    }

    #[test]
    fn band_and_window_names() {
        assert_eq!(parse_band("MID"), Ok(Band::Mid));
        assert!(parse_band("treble").is_err());
        assert_eq!(parse_window("blackman"), Ok(Window::Blackman));
        assert!(parse_window("kaiser").is_err());
    }
}
