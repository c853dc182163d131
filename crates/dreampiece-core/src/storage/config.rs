//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The timer mode selected at startup and the normal-mode duration
//! - Pomodoro auto-restart delay
//! - How long achievement notifications stay on screen
//! - CGPA fallback values
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::data_dir;
use crate::cgpa::{MAX_CGPA, MIN_CGPA};
use crate::error::{ConfigError, Result};
use crate::timer::{FocusMode, TimerSettings};

/// Timer section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfigSection {
    #[serde(default)]
    pub default_mode: FocusMode,
    /// Minutes used for normal mode when the CLI starts a run.
    #[serde(default = "default_normal_minutes")]
    pub normal_minutes: u32,
    /// Seconds between a pomodoro phase ending and the next one starting.
    #[serde(default = "default_restart_delay_secs")]
    pub restart_delay_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_visible_ms")]
    pub visible_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

/// CGPA fallbacks used when nothing valid is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CgpaConfig {
    #[serde(default = "default_current_cgpa")]
    pub default_current: f64,
    #[serde(default = "default_target_cgpa")]
    pub default_target: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfigSection,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub cgpa: CgpaConfig,
}

fn default_normal_minutes() -> u32 {
    60
}
fn default_restart_delay_secs() -> u64 {
    2
}
fn default_visible_ms() -> u64 {
    2500
}
fn default_fade_ms() -> u64 {
    500
}
fn default_current_cgpa() -> f64 {
    5.9
}
fn default_target_cgpa() -> f64 {
    8.5
}

impl Default for TimerConfigSection {
    fn default() -> Self {
        Self {
            default_mode: FocusMode::default(),
            normal_minutes: default_normal_minutes(),
            restart_delay_secs: default_restart_delay_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            visible_ms: default_visible_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl Default for CgpaConfig {
    fn default() -> Self {
        Self {
            default_current: default_current_cgpa(),
            default_target: default_target_cgpa(),
        }
    }
}

impl CgpaConfig {
    /// Both fallbacks must be valid CGPA values.
    fn check(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("cgpa.default_current", self.default_current),
            ("cgpa.default_target", self.default_target),
        ] {
            if !value.is_finite() || !(MIN_CGPA..=MAX_CGPA).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{value} is outside {MIN_CGPA}..={MAX_CGPA}"),
                });
            }
        }
        Ok(())
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
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
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

    /// Load from disk, writing the defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let load_failed = |message: String| ConfigError::LoadFailed {
                    path: path.clone(),
                    message,
                };
                let cfg: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.cgpa.check().map_err(|e| load_failed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("falling back to default config: {e}");
                Self::default()
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Set a config value in memory only.
    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        next.cgpa.check()?;
        *self = next;
        Ok(())
    }

    /// Timer engine settings derived from this config.
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            restart_delay: Duration::from_secs(self.timer.restart_delay_secs),
            notice_visible: Duration::from_millis(self.notifications.visible_ms),
            notice_fade: Duration::from_millis(self.notifications.fade_ms),
        }
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
        assert_eq!(parsed.timer.default_mode, FocusMode::Normal);
        assert_eq!(parsed.notifications.visible_ms, 2500);
        assert_eq!(parsed.cgpa.default_target, 8.5);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.timer.normal_minutes, 60);
        assert_eq!(parsed.timer.restart_delay_secs, 2);
        assert_eq!(parsed.cgpa.default_current, 5.9);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let parsed: Config = toml::from_str("[timer]\ndefault_mode = \"zen\"\n").unwrap();
        assert_eq!(parsed.timer.default_mode, FocusMode::Zen);
        assert_eq!(parsed.timer.normal_minutes, 60);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.default_mode").as_deref(), Some("normal"));
        assert_eq!(cfg.get("timer.normal_minutes").as_deref(), Some("60"));
        assert_eq!(cfg.get("cgpa.default_target").as_deref(), Some("8.5"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_number_and_mode() {
        let mut cfg = Config::default();
        cfg.apply("notifications.visible_ms", "4000").unwrap();
        cfg.apply("timer.default_mode", "pomodoro").unwrap();
        cfg.apply("cgpa.default_current", "7.25").unwrap();
        assert_eq!(cfg.notifications.visible_ms, 4000);
        assert_eq!(cfg.timer.default_mode, FocusMode::Pomodoro);
        assert_eq!(cfg.cgpa.default_current, 7.25);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let result = cfg.apply("timer.nonexistent_key", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_mode() {
        let mut cfg = Config::default();
        let result = cfg.apply("timer.default_mode", "turbo");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg.timer.default_mode, FocusMode::Normal);
    }

    #[test]
    fn apply_rejects_non_numeric() {
        let mut cfg = Config::default();
        let result = cfg.apply("timer.normal_minutes", "soon");
        assert!(result.is_err());
    }

    #[test]
    fn apply_rejects_cgpa_fallback_out_of_range() {
        let mut cfg = Config::default();
        let result = cfg.apply("cgpa.default_current", "50");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "cgpa.default_current"
        ));
        assert_eq!(cfg.cgpa.default_current, 5.9);
        assert!(cfg.apply("cgpa.default_target", "10").is_ok());
    }

    #[test]
    fn hand_edited_cgpa_fallback_is_checked() {
        let parsed: Config = toml::from_str("[cgpa]\ndefault_target = 12.0\n").unwrap();
        assert!(parsed.cgpa.check().is_err());
        assert!(Config::default().cgpa.check().is_ok());
    }

    #[test]
    fn timer_settings_follow_config() {
        let mut cfg = Config::default();
        cfg.timer.restart_delay_secs = 5;
        cfg.notifications.visible_ms = 1000;
        let settings = cfg.timer_settings();
        assert_eq!(settings.restart_delay, Duration::from_secs(5));
        assert_eq!(settings.notice_visible, Duration::from_millis(1000));
        assert_eq!(settings.notice_fade, Duration::from_millis(500));
    }
}
