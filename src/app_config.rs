use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the configuration of the cue engine and the CLI,
/// including loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Engine tuning
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Tunables for sniffing, normalization and lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Shortest cue kept by the normalizer
    #[serde(default = "default_min_cue_duration_ms")]
    pub min_cue_duration_ms: u64,

    /// Slot length for cues synthesized from untimed lines
    #[serde(default = "default_fallback_slot_ms")]
    pub fallback_slot_ms: u64,

    /// Duration of the placeholder cue emitted on total parse failure
    #[serde(default = "default_failure_cue_duration_ms")]
    pub failure_cue_duration_ms: u64,

    /// Cue count up to which lookups scan linearly
    #[serde(default = "default_linear_scan_threshold")]
    pub linear_scan_threshold: usize,

    /// Number of leading lines the sniffer inspects for SRT timestamps
    #[serde(default = "default_sniff_line_limit")]
    pub sniff_line_limit: usize,

    /// Text of the placeholder cue emitted on total parse failure
    #[serde(default = "default_failure_message")]
    pub failure_message: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_cue_duration_ms: default_min_cue_duration_ms(),
            fallback_slot_ms: default_fallback_slot_ms(),
            failure_cue_duration_ms: default_failure_cue_duration_ms(),
            linear_scan_threshold: default_linear_scan_threshold(),
            sniff_line_limit: default_sniff_line_limit(),
            failure_message: default_failure_message(),
        }
    }
}

impl EngineConfig {
    /// Validate engine tunables
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_cue_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_cue_duration_ms",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.fallback_slot_ms < self.min_cue_duration_ms {
            return Err(ConfigError::InvalidValue {
                field: "fallback_slot_ms",
                reason: format!(
                    "{}ms is shorter than the minimum cue duration {}ms",
                    self.fallback_slot_ms, self.min_cue_duration_ms
                ),
            });
        }

        if self.failure_cue_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "failure_cue_duration_ms",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.sniff_line_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sniff_line_limit",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map to the `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_min_cue_duration_ms() -> u64 {
    50
}

fn default_fallback_slot_ms() -> u64 {
    5_000
}

fn default_failure_cue_duration_ms() -> u64 {
    10_000
}

fn default_linear_scan_threshold() -> usize {
    100
}

fn default_sniff_line_limit() -> usize {
    50
}

fn default_failure_message() -> String {
    "Subtitle parsing failed: the file has content but no supported subtitle format was recognized".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()
    }

    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the configuration at `path`, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("Config file not found at '{}', using defaults", path.display());
            return Ok(Config::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Configuration validation failed: {}", path.display()))?;

        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            engine: EngineConfig::default(),
        }
    }
}
