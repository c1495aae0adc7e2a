//! Client configuration (window, assets, audio, host bridge, layout).
//! Loaded from config.ron at startup.

use loadscreen::RegionId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where hook calls come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HostSource {
    /// One JSON array per line on standard input.
    #[default]
    Stdin,
    /// Built-in replay of a typical connection.
    Demo,
}

/// Persistent client settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Start borderless fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default = "default_background_image")]
    pub background_image: PathBuf,
    #[serde(default = "default_ambience_track")]
    pub ambience_track: PathBuf,
    /// Ambience volume, 0..1.
    #[serde(default = "default_audio_volume")]
    pub audio_volume: f64,
    /// Delay before the single autoplay retry.
    #[serde(default = "default_audio_retry_delay_ms")]
    pub audio_retry_delay_ms: u64,
    #[serde(default)]
    pub host: HostSource,
    /// Regions this layout leaves out.
    #[serde(default)]
    pub hidden_regions: Vec<RegionId>,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}
fn default_background_image() -> PathBuf {
    PathBuf::from("assets/img/bg.jpg")
}
fn default_ambience_track() -> PathBuf {
    PathBuf::from("assets/audio/ambience.ogg")
}
fn default_audio_volume() -> f64 {
    audio::DEFAULT_VOLUME
}
fn default_audio_retry_delay_ms() -> u64 {
    audio::RETRY_DELAY.as_millis() as u64
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            fullscreen: false,
            background_image: default_background_image(),
            ambience_track: default_ambience_track(),
            audio_volume: default_audio_volume(),
            audio_retry_delay_ms: default_audio_retry_delay_ms(),
            host: HostSource::default(),
            hidden_regions: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Load `config.ron`. A missing or invalid file yields the defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::parse(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }),
            Err(_) => {
                log::info!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_struct_takes_every_default() {
        let c = ClientConfig::parse("()").unwrap();
        assert_eq!(c, ClientConfig::default());
        assert_eq!(c.window_width, 1280);
        assert_eq!(c.audio_volume, 0.08);
        assert_eq!(c.audio_retry_delay_ms, 15_000);
        assert_eq!(c.host, HostSource::Stdin);
        assert_eq!(c.background_image, PathBuf::from("assets/img/bg.jpg"));
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let c = ClientConfig::parse(
            r#"(
                fullscreen: true,
                host: Demo,
                hidden_regions: [NewsLine, AudioButton],
                ambience_track: "music/march.ogg",
            )"#,
        )
        .unwrap();
        assert!(c.fullscreen);
        assert_eq!(c.host, HostSource::Demo);
        assert_eq!(c.hidden_regions, vec![RegionId::NewsLine, RegionId::AudioButton]);
        assert_eq!(c.ambience_track, PathBuf::from("music/march.ogg"));
        assert!(c.vsync);
    }

    #[test]
    fn invalid_or_missing_file_falls_back() {
        assert!(ClientConfig::parse("(window_width: \"wide\")").is_err());
        let c = ClientConfig::load_from(Path::new("definitely/missing/config.ron"));
        assert_eq!(c, ClientConfig::default());
    }
}
