//! Error types for tabulation.
//!
//! Per-line failures ([`DecodeError`], [`DeriveError`]) are recoverable: the
//! pipeline skips the line and counts it. [`TabulateError`] is fatal.

use indicator_literal::LiteralError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a log line could not be turned into an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// The outer record failed to parse or has no byte-string payload.
    #[error("malformed record: {0}")]
    Record(#[source] LiteralError),

    /// The payload contains non-ASCII bytes.
    #[error("payload is not ASCII text")]
    NotAscii,

    /// The payload text is not a mapping literal.
    #[error("malformed mapping: {0}")]
    Mapping(#[source] LiteralError),
}

/// Why a decoded entry was dropped during derived-field computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// The `speed` field does not parse as a number.
    #[error("speed '{value}' is not a number")]
    InvalidSpeed { value: String },

    /// The previous retained entry has no `speed` to difference against.
    #[error("previous entry has no speed for acceleration")]
    MissingPreviousSpeed,
}

/// Configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config YAML is invalid.
    #[error("invalid config{}: {message}", describe_path(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// Sample period must be positive.
    #[error("sample period must be greater than zero")]
    ZeroSamplePeriod,

    /// An empty suffix would overwrite the input file.
    #[error("output suffix must not be empty")]
    EmptySuffix,
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

/// Fatal tabulation errors.
#[derive(Debug, Error)]
pub enum TabulateError {
    /// Input file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output file could not be created.
    #[error("failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for tabulation operations.
pub type Result<T> = std::result::Result<T, TabulateError>;
