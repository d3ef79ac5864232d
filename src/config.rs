//! Configuration file support for the autosave controller.
//!
//! Settings are stored as JSON: in the platform config directory on native
//! builds and in `localStorage` on WASM.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AUTOSAVE_INTERVAL_MS, DEFAULT_DEBOUNCE_DELAY_MS};
use crate::context::KeyStrategy;
use crate::keybindings::SaveShortcut;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Autosave configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Period of the background flush loop in milliseconds
    #[serde(default = "default_autosave_interval_ms")]
    pub autosave_interval_ms: u64,

    /// Quiet period after the last edit before a debounced save
    #[serde(default = "default_debounce_delay_ms")]
    pub debounce_delay_ms: u64,

    /// How records are keyed
    #[serde(default)]
    pub key_strategy: KeyStrategy,

    /// Key chord for explicit save
    #[serde(default)]
    pub save_shortcut: SaveShortcut,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_autosave_interval_ms() -> u64 {
    DEFAULT_AUTOSAVE_INTERVAL_MS
}

fn default_debounce_delay_ms() -> u64 {
    DEFAULT_DEBOUNCE_DELAY_MS
}

impl AutosaveConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            autosave_interval_ms: default_autosave_interval_ms(),
            debounce_delay_ms: default_debounce_delay_ms(),
            key_strategy: KeyStrategy::default(),
            save_shortcut: SaveShortcut::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Set the key strategy.
    pub fn with_key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.key_strategy = strategy;
        self
    }

    /// Set the periodic flush interval.
    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the debounce delay.
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    /// Check values that would leave the controller unable to run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: self.version,
                supported_version: CONFIG_VERSION,
            });
        }
        if self.autosave_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "autosave_interval_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.save_shortcut.key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "save_shortcut.key",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "playground-autosave.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(
                config_dir
                    .join("playground-autosave")
                    .join(Self::default_filename()),
            )
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("playground-autosave")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from `path`.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to `path`, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "playground-autosave-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A setting has a value the controller can not run with
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AutosaveConfig::default();
        assert_eq!(config.autosave_interval(), Duration::from_secs(5));
        assert_eq!(config.debounce_delay(), Duration::from_millis(400));
        assert_eq!(config.key_strategy, KeyStrategy::Language);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AutosaveConfig::from_json(r#"{"key_strategy": "file"}"#).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.key_strategy, KeyStrategy::File);
        assert_eq!(config.debounce_delay_ms, DEFAULT_DEBOUNCE_DELAY_MS);
        assert_eq!(config.save_shortcut, SaveShortcut::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AutosaveConfig::new()
            .with_debounce_delay(Duration::from_millis(250))
            .with_key_strategy(KeyStrategy::File);
        let json = config.to_json().unwrap();
        assert_eq!(AutosaveConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_newer_version() {
        let json = format!(r#"{{"version": {}}}"#, CONFIG_VERSION + 1);
        assert!(matches!(
            AutosaveConfig::from_json(&json),
            Err(ConfigError::VersionTooNew { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_interval() {
        assert!(matches!(
            AutosaveConfig::from_json(r#"{"autosave_interval_ms": 0}"#),
            Err(ConfigError::InvalidValue {
                field: "autosave_interval_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_durations_saturate() {
        let config = AutosaveConfig::new()
            .with_autosave_interval(Duration::MAX)
            .with_debounce_delay(Duration::from_secs(2));
        assert_eq!(config.autosave_interval_ms, u64::MAX);
        assert_eq!(config.debounce_delay_ms, 2_000);
    }

    #[test]
    fn test_log_level_names() {
        let config = AutosaveConfig::from_json(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.log_level.to_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(LogLevel::Warn.name(), "Warn");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("conf").join(AutosaveConfig::default_filename());

        let config = AutosaveConfig::new().with_key_strategy(KeyStrategy::File);
        config.save_to_path(&path).unwrap();

        assert_eq!(AutosaveConfig::load_from_path(&path), Some(config));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(AutosaveConfig::load_from_path(&dir.path().join("nope.json")).is_none());
    }
}
