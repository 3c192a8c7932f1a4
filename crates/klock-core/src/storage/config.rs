//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The focus duration offered on first run
//! - Notification preferences
//! - Terminal display settings
//! - The default log filter
//!
//! Configuration is stored at `<data_dir>/config.toml`. Widget fields that
//! the user edits in place (calculator inputs, the chosen focus duration)
//! live in the key/value store instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, data_dir_path};
use crate::error::{ConfigError, Result};
use crate::focus::{clamp_duration, DEFAULT_DURATION_MIN};

/// Focus-session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Duration used when nothing has been stored yet.
    #[serde(default = "default_duration")]
    pub default_duration: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Terminal display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Width of the progress bar in cells.
    #[serde(default = "default_progress_width")]
    pub progress_width: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` env-filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// Default functions
fn default_duration() -> u32 {
    DEFAULT_DURATION_MIN
}
fn default_true() -> bool {
    true
}
fn default_progress_width() -> u32 {
    30
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            progress_width: default_progress_width(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot replace a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the defaults cannot
    /// be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Read the config without creating anything on disk. A missing file
    /// reads as the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn peek() -> Result<Self> {
        Self::peek_from(&data_dir_path().join("config.toml"))
    }

    /// [`peek`](Self::peek) at an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn peek_from(path: &Path) -> Result<Self> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(load_failed(e.to_string()).into()),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }

    /// Default focus duration, forced into the accepted range.
    pub fn focus_duration(&self) -> u32 {
        clamp_duration(self.focus.default_duration)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.focus.default_duration, 20);
        assert!(parsed.notifications.enabled);
        assert_eq!(parsed.log.filter, "warn");
    }

    #[test]
    fn missing_sections_take_defaults() {
        let parsed: Config = toml::from_str("[display]\nprogress_width = 10\n").unwrap();
        assert_eq!(parsed.display.progress_width, 10);
        assert_eq!(parsed.focus.default_duration, 20);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("focus.default_duration").as_deref(), Some("20"));
        assert_eq!(cfg.get("log.filter").as_deref(), Some("warn"));
        assert!(cfg.get("focus.missing_key").is_none());
        assert!(cfg.get("focus").is_none());
    }

    #[test]
    fn update_changes_typed_values() {
        let mut cfg = Config::default();
        cfg.update("notifications.enabled", "false").unwrap();
        cfg.update("display.progress_width", "12").unwrap();
        cfg.update("log.filter", "klock=debug").unwrap();
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.display.progress_width, 12);
        assert_eq!(cfg.log.filter, "klock=debug");
    }

    #[test]
    fn update_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.update("display.nonexistent_key", "1").is_err());
        assert!(cfg.update("", "1").is_err());
    }

    #[test]
    fn update_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.update("notifications.enabled", "maybe").is_err());
        assert!(cfg.update("focus.default_duration", "-5").is_err());
        assert!(cfg.update("focus", "{}").is_err());
        assert!(cfg.notifications.enabled);
    }

    #[test]
    fn focus_duration_is_clamped() {
        let mut cfg = Config::default();
        cfg.focus.default_duration = 500;
        assert_eq!(cfg.focus_duration(), 90);
        cfg.focus.default_duration = 0;
        assert_eq!(cfg.focus_duration(), 5);
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.focus.default_duration, 20);

        let mut changed = cfg.clone();
        changed.focus.default_duration = 45;
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().focus.default_duration, 45);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "focus = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn peek_from_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::peek_from(&path).unwrap();
        assert_eq!(cfg.log.filter, "warn");
        assert!(!path.exists());

        std::fs::write(&path, "[log]\nfilter = \"klock=debug\"\n").unwrap();
        assert_eq!(Config::peek_from(&path).unwrap().log.filter, "klock=debug");

        std::fs::write(&path, "log = [").unwrap();
        assert!(Config::peek_from(&path).is_err());
    }
}
