//! Game settings and preferences
//!
//! Stored as pretty JSON. A missing or malformed file falls back to the
//! defaults so a bad config never stops the game from starting.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{END_GRACE_MS, MUSIC_FADEOUT_MS, TICK_RATE};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play the background track if it can be loaded
    pub play_music: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Display ===
    pub start_fullscreen: bool,

    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Sleep between ticks to hold the tick rate
    pub frame_cap: bool,
    /// Hold after the session ends before exiting
    pub end_grace_ms: u64,
    pub music_fadeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_music: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            start_fullscreen: false,

            tick_rate: TICK_RATE,
            frame_cap: true,
            end_grace_ms: END_GRACE_MS,
            music_fadeout_ms: MUSIC_FADEOUT_MS,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults if it cannot be read
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("could not read {}: {err}; using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(err) => {
                log::warn!("malformed settings in {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.tick_rate = self.tick_rate.max(1);
        self
    }

    /// Wall-clock budget of one tick
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("strikers-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.play_music);
        assert_eq!(settings.tick_rate, 40);
        assert_eq!(settings.tick_interval(), std::time::Duration::from_millis(25));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            muted: true,
            tick_rate: 60,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        assert_eq!(
            Settings::load(Path::new("/nonexistent/strikers.json")),
            Settings::default()
        );
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults_and_clamps() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "master_volume": 3.5, "tick_rate": 0 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.tick_rate, 1);
        assert!(settings.play_music);
        fs::remove_file(&path).ok();
    }
}
