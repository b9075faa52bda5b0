//! Profile file format and operations.

use roomtone_analysis::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Named set of analysis parameters.
///
/// Profiles are stored as TOML. Every field of the `[analysis]` table is
/// optional and falls back to the reference default.
///
/// # TOML Format
///
/// ```toml
/// name = "Concert hall"
/// description = "Long windows, two second target"
///
/// [analysis]
/// window_size = 4096
/// overlap = 512
/// window = "hann"
/// target_rt60 = 2.0
///
/// [analysis.bands]
/// low_mid_hz = 250.0
/// mid_high_hz = 2000.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisProfile {
    /// Name of the profile.
    pub name: String,

    /// Optional description of the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Pipeline parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AnalysisProfile {
    /// Create a profile with the default analysis parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            analysis: AnalysisConfig::default(),
        }
    }

    /// Create a profile with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the analysis parameters.
    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Load a profile from a TOML file.
    ///
    /// The file is parsed but not validated; call [`validate`](Self::validate)
    /// before running an analysis with it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let profile: AnalysisProfile = toml::from_str(&content)?;
        Ok(profile)
    }

    /// Load a profile from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the profile to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the profile to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the analysis parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis
            .validate()
            .map_err(|e| ConfigError::validation(&self.name, e))
    }
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self::new("Default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomtone_analysis::Window;

    #[test]
    fn test_profile_new() {
        let profile = AnalysisProfile::new("Studio");
        assert_eq!(profile.name, "Studio");
        assert!(profile.description.is_none());
        assert_eq!(profile.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_profile_from_toml() {
        let toml = r#"
name = "Hall"
description = "Large room"

[analysis]
window_size = 4096
overlap = 512
window = "blackman"
target_rt60 = 2.0

[analysis.bands]
mid_high_hz = 4000.0
high_hz = 16000.0
"#;

        let profile = AnalysisProfile::from_toml(toml).unwrap();
        assert_eq!(profile.name, "Hall");
        assert_eq!(profile.description.as_deref(), Some("Large room"));
        assert_eq!(profile.analysis.window_size, 4096);
        assert_eq!(profile.analysis.overlap, 512);
        assert_eq!(profile.analysis.window, Window::Blackman);
        assert_eq!(profile.analysis.target_rt60, 2.0);
        assert_eq!(profile.analysis.bands.low_mid_hz, 250.0);
        assert_eq!(profile.analysis.bands.mid_high_hz, 4000.0);
        assert_eq!(profile.analysis.bands.high_hz, Some(16000.0));
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_minimal_toml() {
        let profile = AnalysisProfile::from_toml("name = \"Minimal\"\n").unwrap();
        assert_eq!(profile.name, "Minimal");
        assert_eq!(profile.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_profile_to_toml() {
        let profile = AnalysisProfile::new("Test").with_description("Test description");
        let toml = profile.to_toml().unwrap();

        assert!(toml.contains("name = \"Test\""));
        assert!(toml.contains("description = \"Test description\""));
        assert!(toml.contains("window_size = 1024"));
        assert!(toml.contains("window = \"hann\""));
        assert!(!toml.contains("high_hz"), "unset Nyquist edge is omitted");
    }

    #[test]
    fn test_profile_roundtrip() {
        let original = AnalysisProfile::new("Roundtrip").with_analysis(AnalysisConfig {
            window_size: 2048,
            overlap: 256,
            target_rt60: 1.2,
            ..AnalysisConfig::default()
        });

        let parsed = AnalysisProfile::from_toml(&original.to_toml().unwrap()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_invalid_window_rejected_on_validate() {
        let toml = r#"
name = "Broken"
[analysis]
window_size = 256
overlap = 256
"#;
        let profile = AnalysisProfile::from_toml(toml).unwrap();
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::Validation { ref profile, .. }) if profile == "Broken"
        ));
    }

    #[test]
    fn test_unknown_window_is_parse_error() {
        let toml = "name = \"x\"\n[analysis]\nwindow = \"kaiser\"\n";
        assert!(matches!(
            AnalysisProfile::from_toml(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("room.toml");

        let profile = AnalysisProfile::new("Saved").with_description("on disk");
        profile.save(&path).unwrap();

        let loaded = AnalysisProfile::load(&path).unwrap();
        assert_eq!(profile, loaded);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalysisProfile::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
