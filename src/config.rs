use crate::diagram::{EngineConfig, GlyphMode};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event poll timeout, also the tick period
    pub tick_rate_ms: u64,
    /// Delay between walkthrough steps while playing
    pub walkthrough_interval_ms: u64,
    /// Box drawing glyphs for diagrams
    pub glyphs: GlyphMode,
    pub theme: Theme,
    /// Module opened on start instead of the last visited one
    pub start_module: Option<String>,
    pub show_splash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            walkthrough_interval_ms: 2500,
            glyphs: GlyphMode::Unicode,
            theme: Theme::Dark,
            start_module: None,
            show_splash: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".kube-tutor"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load `~/.kube-tutor/config.json`, or `None` if there is none
    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Could not read config {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn walkthrough_interval(&self) -> Duration {
        Duration::from_millis(self.walkthrough_interval_ms.max(100))
    }

    /// Settings handed to the diagram engine at startup
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            glyphs: self.glyphs,
            theme: self.theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "glyphs": "ascii" }"#).unwrap();
        assert_eq!(config.glyphs, GlyphMode::Ascii);
        assert_eq!(config.tick_rate_ms, 100);
        assert!(config.show_splash);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kube").join("config.json");
        let config = Config {
            theme: Theme::Light,
            start_module: Some("storage".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), Some(config));
    }

    #[test]
    fn test_invalid_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme": "neon" }"#).unwrap();
        assert_eq!(Config::load_from(&path), None);
        assert_eq!(Config::load_from(&dir.path().join("missing.json")), None);
    }

    #[test]
    fn test_durations_are_clamped() {
        let config = Config {
            tick_rate_ms: 0,
            walkthrough_interval_ms: 1,
            ..Config::default()
        };
        assert_eq!(config.tick_rate(), Duration::from_millis(10));
        assert_eq!(config.walkthrough_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_engine_config_follows_settings() {
        let config = Config {
            glyphs: GlyphMode::Ascii,
            theme: Theme::Light,
            ..Config::default()
        };
        let engine = config.engine_config();
        assert_eq!(engine.glyphs, GlyphMode::Ascii);
        assert_eq!(engine.theme, Theme::Light);
    }
}
