//! Tabulation of indicator telemetry logs.
//!
//! Each input line is a record captured from the telemetry stream. Lines are
//! decoded into ordered [`LogEntry`] values, the serialized `position` is
//! split into `x`, `y` and `z`, and `time`, `distance` and `acceleration`
//! are derived from the sample period and `speed`. Every field seen is
//! registered as a column, so the output table grows to fit whatever the
//! producer sends.
//!
//! # Example
//!
//! ```rust
//! use indicator_tabulate::{tabulate, SamplePeriod, TabulateConfig};
//!
//! let input = concat!(
//!     r#"(b'{"speed": "10.000", "position": "(1.0, 2.0, 3.0)"}', ('127.0.0.1', 10000))"#, "\n",
//!     r#"(b'{"speed": "12.000", "drive_rpm": "900"}', ('127.0.0.1', 10000))"#, "\n",
//! );
//!
//! let period = SamplePeriod::from_millis(1000).unwrap();
//! let (table, report) = tabulate(input.as_bytes(), &TabulateConfig::default(), period).unwrap();
//!
//! assert_eq!(report.entries, 2);
//! assert_eq!(table.rows()[1].get("acceleration"), Some("   2.000"));
//! assert_eq!(table.registry().names().last(), Some("drive_rpm"));
//! ```
//!
//! Lines that fail to decode are skipped and counted in the
//! [`TabulateReport`]; they never abort a run.

mod config;
mod decode;
mod derive;
mod entry;
mod error;
mod position;
mod registry;
mod table;
mod tabulate;

pub use config::{
    SamplePeriod, TabulateConfig, DEFAULT_FIELDS, DEFAULT_OUTPUT_SUFFIX, DEFAULT_PLACEHOLDER,
};
pub use decode::{decode_bytes, decode_line};
pub use derive::{
    fixed, AccelerationGaps, DerivedState, ACCELERATION_FIELD, DISTANCE_FIELD, SPEED_FIELD,
    TIME_FIELD,
};
pub use entry::LogEntry;
pub use error::{ConfigError, DecodeError, DeriveError, Result, TabulateError};
pub use position::{coordinates, expand_position, CoordinateFormat, POSITION_FIELD};
pub use registry::{display_width, Column, FieldRegistry};
pub use table::{OutputFormat, Table};
pub use tabulate::{
    extract_coordinates, output_path, run, tabulate, write_coordinates, Mode, RunOptions,
    TabulateReport,
};
