//! Built-in analysis profiles.
//!
//! Always available without external files. Each one targets a typical room
//! type and doubles as a template for `roomtone profile init`.

use crate::AnalysisProfile;

/// Identifiers of the built-in profiles.
pub static FACTORY_PROFILE_NAMES: &[&str] = &["default", "speech", "music", "concert_hall"];

static FACTORY_PROFILES_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PROFILE),
    ("speech", SPEECH_PROFILE),
    ("music", MUSIC_PROFILE),
    ("concert_hall", CONCERT_HALL_PROFILE),
];

const DEFAULT_PROFILE: &str = r#"
name = "Default"
description = "Reference parameters: 1024-sample Hann window, 0.5 s target"
"#;

const SPEECH_PROFILE: &str = r#"
name = "Speech"
description = "Classrooms and meeting rooms, 0.6 s target"

[analysis]
target_rt60 = 0.6
"#;

const MUSIC_PROFILE: &str = r#"
name = "Music"
description = "Rehearsal rooms and small venues, 1.2 s target"

[analysis]
window_size = 2048
overlap = 256
target_rt60 = 1.2
"#;

const CONCERT_HALL_PROFILE: &str = r#"
name = "Concert Hall"
description = "Large halls with long tails, 2.0 s target"

[analysis]
window_size = 4096
overlap = 512
target_rt60 = 2.0

[analysis.bands]
low_mid_hz = 500.0
mid_high_hz = 4000.0
"#;

/// All built-in profiles.
pub fn factory_profiles() -> Vec<AnalysisProfile> {
    FACTORY_PROFILES_TOML
        .iter()
        .filter_map(|(_, toml)| AnalysisProfile::from_toml(toml).ok())
        .collect()
}

/// Built-in profile by identifier or display name, case-insensitive.
pub fn get_factory_profile(name: &str) -> Option<AnalysisProfile> {
    let wanted = name.to_lowercase();

    for (id, toml) in FACTORY_PROFILES_TOML {
        if *id == wanted {
            return AnalysisProfile::from_toml(toml).ok();
        }
    }

    FACTORY_PROFILES_TOML
        .iter()
        .filter_map(|(_, toml)| AnalysisProfile::from_toml(toml).ok())
        .find(|p| p.name.to_lowercase() == wanted)
}

/// Whether `name` refers to a built-in profile.
pub fn is_factory_profile(name: &str) -> bool {
    get_factory_profile(name).is_some()
}
