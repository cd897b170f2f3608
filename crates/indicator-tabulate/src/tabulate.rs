//! End-to-end tabulation of a log file.
//!
//! Both variants read the input one line at a time, decode each line and
//! drop the ones that fail. The table variant derives fields and collects a
//! [`Table`]; the coordinate variant keeps only positions.

use crate::config::{SamplePeriod, TabulateConfig};
use crate::decode::decode_bytes;
use crate::derive::DerivedState;
use crate::error::{Result, TabulateError};
use crate::position::{coordinates, expand_position, CoordinateFormat};
use crate::registry::FieldRegistry;
use crate::table::Table;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counts gathered while processing one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabulateReport {
    /// Lines read, including malformed ones.
    pub lines: usize,
    /// Entries written to the output.
    pub entries: usize,
    /// Lines that failed to decode.
    pub malformed: usize,
    /// Decoded entries dropped while deriving fields.
    pub dropped: usize,
    /// Decoded entries without a usable position (coordinate listing only).
    pub missing_position: usize,
}

impl TabulateReport {
    pub fn skipped(&self) -> usize {
        self.malformed + self.dropped + self.missing_position
    }
}

/// Iterates over the raw lines of `reader`, numbered from 1.
fn numbered_lines<R: BufRead>(reader: R) -> impl Iterator<Item = (usize, std::io::Result<Vec<u8>>)> {
    reader.split(b'\n').enumerate().map(|(i, line)| (i + 1, line))
}

/// Builds a table from every line of `reader`.
pub fn tabulate<R: BufRead>(
    reader: R,
    config: &TabulateConfig,
    period: SamplePeriod,
) -> Result<(Table, TabulateReport)> {
    let mut table = Table::new(
        FieldRegistry::with_fields(&config.default_fields),
        config.placeholder.as_str(),
    );
    let mut state = DerivedState::new(period);
    let mut report = TabulateReport::default();

    for (number, line) in numbered_lines(reader) {
        let line = line?;
        report.lines += 1;

        let mut entry = match decode_bytes(&line) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(line = number, reason = %err, "skipping malformed line");
                report.malformed += 1;
                continue;
            }
        };

        if let Err(err) = expand_position(&mut entry, CoordinateFormat::TABLE) {
            debug!(line = number, reason = %err, "leaving unparsable position as is");
        }

        if let Err(err) = state.apply(&mut entry, config.acceleration_gaps) {
            debug!(line = number, reason = %err, "dropping entry");
            report.dropped += 1;
            continue;
        }

        table.push(entry);
        report.entries += 1;
    }

    Ok((table, report))
}

/// Collects the position of every line of `reader` that has one.
pub fn extract_coordinates<R: BufRead>(reader: R) -> Result<(Vec<[f64; 3]>, TabulateReport)> {
    let mut points = Vec::new();
    let mut report = TabulateReport::default();

    for (number, line) in numbered_lines(reader) {
        let line = line?;
        report.lines += 1;

        let entry = match decode_bytes(&line) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(line = number, reason = %err, "skipping malformed line");
                report.malformed += 1;
                continue;
            }
        };

        match coordinates(&entry) {
            Some(Ok(point)) => {
                points.push(point);
                report.entries += 1;
            }
            Some(Err(err)) => {
                debug!(line = number, reason = %err, "skipping unparsable position");
                report.missing_position += 1;
            }
            None => {
                debug!(line = number, "skipping entry without position");
                report.missing_position += 1;
            }
        }
    }

    Ok((points, report))
}

/// Writes one line of three right-aligned coordinates per point.
pub fn write_coordinates<W: Write>(mut writer: W, points: &[[f64; 3]]) -> Result<()> {
    let format = CoordinateFormat::LISTING;
    for [x, y, z] in points {
        writeln!(
            writer,
            "{} {} {}",
            format.format(*x),
            format.format(*y),
            format.format(*z)
        )?;
    }
    Ok(())
}

/// Output file for `input`: the input path with `suffix` appended.
///
/// ```rust
/// use indicator_tabulate::output_path;
/// use std::path::Path;
///
/// assert_eq!(output_path(Path::new("logs/run.txt"), ".xyz"), Path::new("logs/run.txt.xyz"));
/// ```
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Which output to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Full table with derived fields.
    Table(SamplePeriod),
    /// Plain x/y/z listing.
    Coordinates,
}

/// Everything one run of the tool needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub mode: Mode,
    pub config: TabulateConfig,
}

/// Reads `options.input` and writes the output file next to it.
///
/// Returns the report and the path written. The output file is
/// overwritten.
pub fn run(options: &RunOptions) -> Result<(TabulateReport, PathBuf)> {
    options.config.validate()?;

    let input = File::open(&options.input).map_err(|source| TabulateError::Open {
        path: options.input.clone(),
        source,
    })?;
    let reader = BufReader::new(input);
    let target = output_path(&options.input, &options.config.output_suffix);

    // The output is only created once the input has been read in full.
    let report = match options.mode {
        Mode::Table(period) => {
            let (table, report) = tabulate(reader, &options.config, period)?;
            let mut out = create(&target)?;
            table.write_to(&mut out, options.config.format)?;
            out.flush()?;
            report
        }
        Mode::Coordinates => {
            let (points, report) = extract_coordinates(reader)?;
            let mut out = create(&target)?;
            write_coordinates(&mut out, &points)?;
            out.flush()?;
            report
        }
    };

    info!(
        entries = report.entries,
        skipped = report.skipped(),
        output = %target.display(),
        "tabulation finished"
    );
    Ok((report, target))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| TabulateError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
