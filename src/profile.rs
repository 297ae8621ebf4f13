use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{dsp::noise::NoiseKind, BAND_COUNT, DEFAULT_VOLUME};

/// Default profile file, relative to the working directory.
pub const DEFAULT_PROFILE_PATH: &str = "noisebed.profile.json";

/// A flat snapshot of the user-facing settings.
///
/// The graph produces and consumes these but never keeps one. Field names are
/// lowercase on write; the capitalized names used by older profile files are
/// accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(alias = "Gains")]
    pub gains: [f32; BAND_COUNT],
    #[serde(alias = "Volume")]
    pub volume: f32,
    /// Width factor (0.0 mono .. 1.5 wide).
    #[serde(alias = "Width")]
    pub width: f32,
    #[serde(alias = "Speed")]
    pub speed: f32,
    #[serde(alias = "Noise")]
    pub noise: NoiseKind,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            gains: [0.0; BAND_COUNT],
            volume: DEFAULT_VOLUME,
            width: 1.0,
            speed: 1.0,
            noise: NoiseKind::White,
        }
    }
}

#[derive(Debug)]
pub enum ProfileError {
    /// No file at the given path
    NotFound(PathBuf),
    Io(io::Error),
    /// The file exists but isn't a profile
    Malformed(serde_json::Error),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::NotFound(path) => {
                write!(f, "No profile file found at {}", path.display())
            }
            ProfileError::Io(err) => write!(f, "Profile I/O failed: {}", err),
            ProfileError::Malformed(err) => write!(f, "Profile is malformed: {}", err),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::NotFound(_) => None,
            ProfileError::Io(err) => Some(err),
            ProfileError::Malformed(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::Malformed(err)
    }
}

impl Profile {
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a profile. A missing file is reported as [`ProfileError::NotFound`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let result = fs::read_to_string(path)
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => ProfileError::NotFound(path.to_path_buf()),
                _ => ProfileError::Io(err),
            })
            .and_then(|json| Self::from_json(&json));

        match &result {
            Ok(_) => log::info!("Loaded profile from {}", path.display()),
            Err(err) => log::warn!("{}", err),
        }
        result
    }

    /// Write the profile as pretty-printed JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProfileError> {
        let path = path.as_ref();
        let result = self
            .to_json()
            .and_then(|json| fs::write(path, json).map_err(ProfileError::Io));

        match &result {
            Ok(()) => log::info!("Saved profile to {}", path.display()),
            Err(err) => log::warn!("{}", err),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("noisebed-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn json_round_trip() {
        let profile = Profile {
            gains: [1.5, -2.0, 0.0, 3.25, -12.0, 8.0, 0.5, -0.5],
            volume: 0.42,
            width: 1.5,
            speed: 0.8,
            noise: NoiseKind::Pink,
        };
        let json = profile.to_json().unwrap();
        assert!(json.contains("\"noise\": \"Pink\""));
        assert_eq!(Profile::from_json(&json).unwrap(), profile);
    }

    #[test]
    fn reads_capitalized_field_names() {
        let json = r#"{
            "Gains": [0, 0, 0, 0, 0, 0, 0, 4],
            "Volume": 0.5,
            "Width": 0.0,
            "Speed": 1.2,
            "Noise": "Brown"
        }"#;
        let profile = Profile::from_json(json).unwrap();
        assert_eq!(profile.gains[7], 4.0);
        assert_eq!(profile.noise, NoiseKind::Brown);
        assert_eq!(profile.speed, 1.2);
    }

    #[test]
    fn unknown_noise_is_malformed() {
        let json = r#"{"gains":[0,0,0,0,0,0,0,0],"volume":1,"width":1,"speed":1,"noise":"Blue"}"#;
        assert!(matches!(
            Profile::from_json(json),
            Err(ProfileError::Malformed(_))
        ));
    }

    #[test]
    fn wrong_gain_count_is_malformed() {
        let json = r#"{"gains":[0,0,0],"volume":1,"width":1,"speed":1,"noise":"White"}"#;
        assert!(matches!(
            Profile::from_json(json),
            Err(ProfileError::Malformed(_))
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        match Profile::load(&path) {
            Err(ProfileError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("save");
        let profile = Profile {
            noise: NoiseKind::Brown,
            ..Profile::default()
        };
        profile.save(&path).unwrap();
        let loaded = Profile::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, profile);
    }
}
