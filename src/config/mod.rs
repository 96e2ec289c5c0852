// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, read from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[timing]` - Analysis delay, step reveal offsets, drop grouping window
//! - `[catalog]` - Where the episode media files live
//! - `[video]` - Detail player preferences
//! - `[logging]` - Log level
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag or `MINERAMA_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use minerama::config;
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("using defaults: {key}");
//! }
//! println!("analysis takes {:?}", config.timing.analysis_delay());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Cosmetic pacing of the upload and analysis flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Length of the simulated analysis in milliseconds.
    #[serde(
        default = "default_analysis_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_delay_ms: Option<u64>,

    /// Reveal offsets of the analysis steps in milliseconds.
    #[serde(
        default = "default_step_offsets_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub step_offsets_ms: Option<Vec<u64>>,

    /// Window grouping natively dropped files into one offer, in milliseconds.
    #[serde(
        default = "default_drop_settle_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub drop_settle_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
            step_offsets_ms: default_step_offsets_ms(),
            drop_settle_ms: default_drop_settle_ms(),
        }
    }
}

impl TimingConfig {
    /// Analysis delay, clamped to [`MAX_ANALYSIS_DELAY_MS`].
    #[must_use]
    pub fn analysis_delay(&self) -> Duration {
        let ms = self
            .analysis_delay_ms
            .unwrap_or(DEFAULT_ANALYSIS_DELAY_MS)
            .min(MAX_ANALYSIS_DELAY_MS);
        Duration::from_millis(ms)
    }

    /// Step reveal offsets in ascending order.
    ///
    /// An empty or missing list falls back to the defaults.
    #[must_use]
    pub fn step_offsets(&self) -> Vec<Duration> {
        let mut offsets = match &self.step_offsets_ms {
            Some(list) if !list.is_empty() => list.clone(),
            _ => DEFAULT_STEP_OFFSETS_MS.to_vec(),
        };
        offsets.sort_unstable();
        offsets.into_iter().map(Duration::from_millis).collect()
    }

    /// Drop settle window, clamped to [`MAX_DROP_SETTLE_MS`].
    #[must_use]
    pub fn drop_settle(&self) -> Duration {
        let ms = self
            .drop_settle_ms
            .unwrap_or(DEFAULT_DROP_SETTLE_MS)
            .min(MAX_DROP_SETTLE_MS);
        Duration::from_millis(ms)
    }
}

/// Episode media location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogConfig {
    /// Directory containing `episode-01.mp4` … `episode-05.mp4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_dir: Option<PathBuf>,
}

/// Detail player settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoConfig {
    /// Start playback as soon as an episode is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Whether playback should loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_enabled: Option<bool>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            autoplay: Some(false),
            loop_enabled: Some(false),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_log_level", skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parses the configured level, falling back to `info` for unknown names.
    #[must_use]
    pub fn level_filter(&self) -> tracing::Level {
        match self
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_lowercase()
            .as_str()
        {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub video: VideoConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_analysis_delay_ms() -> Option<u64> {
    Some(DEFAULT_ANALYSIS_DELAY_MS)
}

fn default_step_offsets_ms() -> Option<Vec<u64>> {
    Some(DEFAULT_STEP_OFFSETS_MS.to_vec())
}

fn default_drop_settle_ms() -> Option<u64> {
    Some(DEFAULT_DROP_SETTLE_MS)
}

fn default_log_level() -> Option<String> {
    Some(DEFAULT_LOG_LEVEL.to_string())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with an i18n key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            timing: TimingConfig {
                analysis_delay_ms: Some(250),
                step_offsets_ms: Some(vec![0, 100, 200, 300]),
                drop_settle_ms: Some(50),
            },
            catalog: CatalogConfig {
                media_dir: Some(PathBuf::from("/srv/episodes")),
            },
            video: VideoConfig {
                autoplay: Some(true),
                loop_enabled: Some(false),
            },
            logging: LoggingConfig {
                level: Some("debug".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_reports_warning_for_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[timing\nbroken")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "[timing]\nanalysis_delay_ms = 10\n").expect("write");

        let config = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(config.timing.analysis_delay(), Duration::from_millis(10));
        assert_eq!(config.timing.drop_settle(), Duration::from_millis(DEFAULT_DROP_SETTLE_MS));
        assert_eq!(config.general.theme_mode, ThemeMode::System);
    }

    #[test]
    fn timing_values_are_clamped_and_sorted() {
        let timing = TimingConfig {
            analysis_delay_ms: Some(MAX_ANALYSIS_DELAY_MS * 10),
            step_offsets_ms: Some(vec![3000, 0, 1500]),
            drop_settle_ms: Some(u64::MAX),
        };

        assert_eq!(
            timing.analysis_delay(),
            Duration::from_millis(MAX_ANALYSIS_DELAY_MS)
        );
        assert_eq!(
            timing.step_offsets(),
            vec![
                Duration::ZERO,
                Duration::from_millis(1500),
                Duration::from_millis(3000)
            ]
        );
        assert_eq!(timing.drop_settle(), Duration::from_millis(MAX_DROP_SETTLE_MS));
    }

    #[test]
    fn empty_step_offsets_fall_back_to_defaults() {
        let timing = TimingConfig {
            step_offsets_ms: Some(Vec::new()),
            ..TimingConfig::default()
        };
        assert_eq!(timing.step_offsets().len(), DEFAULT_STEP_OFFSETS_MS.len());
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn log_level_parsing_falls_back_to_info() {
        let logging = LoggingConfig {
            level: Some("WARN".into()),
        };
        assert_eq!(logging.level_filter(), tracing::Level::WARN);

        let logging = LoggingConfig {
            level: Some("chatty".into()),
        };
        assert_eq!(logging.level_filter(), tracing::Level::INFO);
    }
}
