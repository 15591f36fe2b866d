/*!
 * Error types for the subcue engine.
 *
 * This module contains custom error types for the different layers of the
 * crate, using the thiserror crate for ergonomic error definitions. Parsing
 * itself never surfaces these to callers of `parse_subtitles`: record-level
 * errors are logged and the record skipped.
 */

use thiserror::Error;

/// Errors that can occur while processing subtitle records or navigating cues
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A single dialogue/text block could not be turned into a cue
    #[error("Malformed record at line {line}: {reason}")]
    RecordMalformed {
        /// 1-based source line of the record
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// A timestamp token could not be converted to milliseconds
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Loop playback was requested while no cue is active
    #[error("No active cue to loop")]
    NoActiveCue,

    /// A cue index does not exist in the current cue list
    #[error("Cue index {index} out of range ({len} cues)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of cues in the list
        len: usize,
    },
}

/// Errors raised by configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A configuration value is out of range
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
