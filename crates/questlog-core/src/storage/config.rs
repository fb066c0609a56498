//! TOML-based application settings.
//!
//! Stores pomodoro timer parameters, the daily health-check state, and the
//! global running points total at `<data_dir>/config.toml`. Writes go
//! straight to disk so a value is durable before the next read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::timer::TimerConfig;

/// Pomodoro timer parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    #[serde(default = "default_focus")]
    pub focus_min: u32,
    #[serde(default = "default_short_break")]
    pub short_break_min: u32,
    #[serde(default = "default_long_break")]
    pub long_break_min: u32,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_pomodoros: bool,
}

/// Daily health check state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSettings {
    /// Outcome of the most recent check. Defaults to healthy so a fresh
    /// install never suppresses points.
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default)]
    pub last_check: Option<NaiveDate>,
}

/// Application settings.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Running total of points across all trackable units.
    #[serde(default)]
    pub total_points: u64,
    #[serde(default)]
    pub pomodoro: PomodoroSettings,
    #[serde(default)]
    pub health: HealthSettings,
}

fn default_focus() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_sessions_before_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            status: true,
            last_check: None,
        }
    }
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_min: default_focus(),
            short_break_min: default_short_break(),
            long_break_min: default_long_break(),
            sessions_before_long_break: default_sessions_before_long_break(),
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}

impl Settings {
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let invalid = |message: String| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message,
                };
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Null => {
                        // Optional date fields (health.last_check).
                        serde_json::Value::String(value.to_string())
                    }
                    _ => serde_json::Value::String(value.to_string()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings: Settings =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })?;
                Ok(settings)
            }
            Err(_) => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a settings value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key and persist. Errors on unknown keys or
    /// unparseable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Timer engine configuration derived from the pomodoro section.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            focus_min: self.pomodoro.focus_min,
            short_break_min: self.pomodoro.short_break_min,
            long_break_min: self.pomodoro.long_break_min,
            sessions_before_long_break: self.pomodoro.sessions_before_long_break,
            auto_start_breaks: self.pomodoro.auto_start_breaks,
            auto_start_pomodoros: self.pomodoro.auto_start_pomodoros,
        }
    }

    /// Whether point awards currently pass the health gate.
    pub fn healthy(&self) -> bool {
        self.health.status
    }

    /// Whether the daily health check is still pending for `today`.
    pub fn health_check_due(&self, today: NaiveDate) -> bool {
        self.health.last_check != Some(today)
    }

    /// Record today's health check outcome and persist.
    pub fn record_health_check(&mut self, status: bool, today: NaiveDate) -> Result<()> {
        self.health.status = status;
        self.health.last_check = Some(today);
        self.save()
    }

    /// Add to the global running points total and persist. Zero is a no-op.
    pub fn add_total_points(&mut self, points: u32) -> Result<()> {
        if points == 0 {
            return Ok(());
        }
        self.total_points += u64::from(points);
        self.save()
    }
}
