//! Tabulator configuration.
//!
//! Defaults reproduce the stock table layout. A YAML file can override any
//! subset of keys:
//!
//! ```yaml
//! default_fields: [vehicle, time, speed, x, y, z]
//! placeholder: "-"
//! acceleration_gaps: omit
//! ```

use crate::derive::AccelerationGaps;
use crate::error::ConfigError;
use crate::table::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Columns every table starts with, in order.
pub const DEFAULT_FIELDS: &[&str] = &[
    "vehicle",
    "plate",
    "weight",
    "x",
    "y",
    "z",
    "grade",
    "time",
    "distance",
    "speed",
    "rpm",
    "gear1",
    "gear2",
    "throttle",
    "force",
    "acceleration",
    "reverser",
    "boiler_p",
    "chest_p",
];

/// Suffix appended to the input path to name the output file.
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".xyz";

/// Text written for fields absent from a row.
pub const DEFAULT_PLACEHOLDER: &str = "--";

/// Settings for a tabulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TabulateConfig {
    /// Columns registered before any entry is read.
    pub default_fields: Vec<String>,
    pub placeholder: String,
    pub output_suffix: String,
    pub acceleration_gaps: AccelerationGaps,
    pub format: OutputFormat,
}

impl Default for TabulateConfig {
    fn default() -> Self {
        Self {
            default_fields: DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            acceleration_gaps: AccelerationGaps::default(),
            format: OutputFormat::default(),
        }
    }
}

impl TabulateConfig {
    /// Parses a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        Ok(())
    }
}

/// Fixed interval between consecutive entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePeriod {
    seconds: f64,
}

impl SamplePeriod {
    /// Converts a period given in milliseconds. Zero is rejected.
    pub fn from_millis(millis: u64) -> Result<Self, ConfigError> {
        if millis == 0 {
            return Err(ConfigError::ZeroSamplePeriod);
        }
        Ok(Self {
            seconds: millis as f64 / 1000.0,
        })
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.seconds
    }
}
