//! Configuration management for Kegel.
//!
//! Handles loading configuration from TOML files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Tick rate bounds, in milliseconds.
const MIN_TICK_RATE_MS: u64 = 20;
const MAX_TICK_RATE_MS: u64 = 250;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// UI/TUI settings
    pub ui: UiConfig,

    /// Session settings
    pub session: SessionConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding `progress.json` (defaults to the platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// UI/TUI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme name (built-in: default, nord, dracula, mono)
    pub theme: String,

    /// Milliseconds between session ticks
    pub tick_rate_ms: u64,
}

/// Exercise session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Include paused time in the recorded session duration
    pub count_paused_time: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { theme: "default".to_string(), tick_rate_ms: 100 }
    }
}

impl UiConfig {
    /// Tick interval, clamped to a responsive range.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.clamp(MIN_TICK_RATE_MS, MAX_TICK_RATE_MS))
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for `~/.config/kegel/config.toml` and falls back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit path if given, otherwise the default location.
    ///
    /// An explicit path must exist.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::APP_NAME))
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.general.data_dir.is_none());
        assert_eq!(config.ui.theme, "default");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(!config.session.count_paused_time);
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = Config::default().to_toml().unwrap();
        assert!(toml_str.contains("[ui]"));
        assert!(toml_str.contains("[session]"));
        assert!(toml_str.contains("tick_rate_ms = 100"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            data_dir = "/tmp/kegel-data"

            [ui]
            theme = "nord"

            [session]
            count_paused_time = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.data_dir, Some(PathBuf::from("/tmp/kegel-data")));
        assert_eq!(config.ui.theme, "nord");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.session.count_paused_time);
    }

    #[test]
    fn test_tick_rate_is_clamped() {
        let fast = UiConfig { tick_rate_ms: 1, ..UiConfig::default() };
        assert_eq!(fast.tick_rate(), Duration::from_millis(20));

        let slow = UiConfig { tick_rate_ms: 5_000, ..UiConfig::default() };
        assert_eq!(slow.tick_rate(), Duration::from_millis(250));

        assert_eq!(UiConfig::default().tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ntick_rate_ms = 50\n").unwrap();

        let config = Config::resolve(Some(&path)).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 50);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Config::resolve(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\ntheme = ").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }
}
