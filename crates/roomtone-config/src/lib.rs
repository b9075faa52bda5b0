//! Analysis profiles for roomtone.
//!
//! A profile names a set of [`AnalysisConfig`] parameters and persists it as
//! TOML, so the same window, band edges and RT60 target can be reused across
//! measurements.
//!
//! # Example
//!
//! ```rust,no_run
//! use roomtone_config::{AnalysisProfile, resolve_profile};
//!
//! // Built-in profile or path to a TOML file
//! let profile = resolve_profile("concert_hall").unwrap();
//! profile.validate().unwrap();
//!
//! // Write a template to edit by hand
//! AnalysisProfile::default().save("room.toml").unwrap();
//! ```

mod error;
mod profile;

/// Built-in profiles bundled with the library.
pub mod factory_profiles;

pub use error::ConfigError;
pub use factory_profiles::{
    FACTORY_PROFILE_NAMES, factory_profiles, get_factory_profile, is_factory_profile,
};
pub use profile::AnalysisProfile;
pub use roomtone_analysis::AnalysisConfig;

use std::path::Path;

/// Load a profile from a file path, falling back to a built-in name.
///
/// An existing file always wins over a built-in profile of the same name.
pub fn resolve_profile(name_or_path: &str) -> Result<AnalysisProfile, ConfigError> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        return AnalysisProfile::load(path);
    }
    get_factory_profile(name_or_path)
        .ok_or_else(|| ConfigError::ProfileNotFound(name_or_path.to_string()))
}
