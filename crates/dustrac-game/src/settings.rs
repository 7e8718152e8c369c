//! Persisted display settings.
//!
//! Stored as TOML under the user's config directory. Every key is optional;
//! missing keys fall back to [`Settings::default`].

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SETTINGS_DIR: &str = "dustrac";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write settings to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Configured horizontal render resolution.
    pub h_res: u32,
    /// Configured vertical render resolution.
    pub v_res: u32,
    /// Use the desktop resolution instead of `h_res` × `v_res`.
    pub full_resolution: bool,
    /// Run in a window instead of fullscreen.
    pub windowed: bool,
    /// Target simulation rate in steps per second.
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            h_res: 1024,
            v_res: 768,
            full_resolution: true,
            windowed: false,
            fps: 60,
        }
    }
}

impl Settings {
    pub const MIN_FPS: u32 = 30;
    pub const MAX_FPS: u32 = 60;

    /// `<config dir>/dustrac/settings.toml`, or the working directory when the
    /// platform has no config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_DIR)
            .join(SETTINGS_FILE)
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings: Settings = toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(settings.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = toml::to_string_pretty(self)?;

        let write = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write)?;
        }
        std::fs::write(path, text).map_err(write)
    }

    /// Clamps values the game cannot run with.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.h_res == 0 || self.v_res == 0 {
            log::warn!(
                "ignoring invalid resolution {}x{}",
                self.h_res,
                self.v_res
            );
            self.h_res = defaults.h_res;
            self.v_res = defaults.v_res;
        }
        self.fps = self.fps.clamp(Self::MIN_FPS, Self::MAX_FPS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = Settings {
            h_res: 1280,
            v_res: 720,
            full_resolution: false,
            windowed: true,
            fps: 30,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "full_resolution = false\nh_res = 800\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(!settings.full_resolution);
        assert_eq!(settings.h_res, 800);
        assert_eq!(settings.v_res, 768);
        assert_eq!(settings.fps, 60);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "fps = 500\nh_res = 0\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.fps, Settings::MAX_FPS);
        assert_eq!((settings.h_res, settings.v_res), (1024, 768));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "fps = \"sixty\"").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
