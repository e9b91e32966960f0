//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/nextslot/config.toml` by default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use nextslot_core::time::DEFAULT_MARGIN_MINUTES;
use nextslot_core::{FormatOptions, Margin, ScheduleResult, TimeFormat};

/// Configuration for the nextslot client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Occurrence resolution settings.
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Settings for occurrence resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Grace margin after each occurrence, in minutes.
    pub margin_minutes: i64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            margin_minutes: DEFAULT_MARGIN_MINUTES,
        }
    }
}

impl ResolverSettings {
    /// Returns the validated margin.
    pub fn margin(&self) -> ScheduleResult<Margin> {
        Margin::minutes(self.margin_minutes)
    }
}

/// Display settings for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum meeting name length (truncated with ellipsis).
    pub max_name_length: Option<usize>,

    /// 24-hour or 12-hour clock.
    pub time_format: TimeFormat,

    /// Separator between hours and minutes.
    pub hour_separator: String,

    /// Text shown for a series with no remaining occurrence.
    pub ended_text: String,

    /// Text shown for a record that failed validation.
    pub invalid_text: String,

    /// Suffix shown on rows that can be joined.
    pub join_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let defaults = FormatOptions::default();
        Self {
            max_name_length: defaults.max_name_length,
            time_format: defaults.time_format,
            hour_separator: defaults.hour_separator,
            ended_text: defaults.ended_text,
            invalid_text: defaults.invalid_text,
            join_text: defaults.join_text,
        }
    }
}

impl DisplaySettings {
    /// Converts to formatter options.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_name_length: self.max_name_length,
            hour_separator: self.hour_separator.clone(),
            time_format: self.time_format,
            ended_text: self.ended_text.clone(),
            invalid_text: self.invalid_text.clone(),
            join_text: self.join_text.clone(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Checks values that deserialize fine but are out of range.
    pub fn validate(&self) -> Result<(), String> {
        self.resolver.margin().map_err(|e| e.to_string())?;
        if self.display.max_name_length == Some(0) {
            return Err("display.max_name_length must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nextslot")
    }
}
