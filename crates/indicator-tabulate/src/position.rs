//! Expansion of the serialized `position` field into `x`, `y`, `z`.

use crate::entry::LogEntry;
use indicator_literal::{parse_triple, LiteralError};

/// Name of the field holding the serialized coordinate tuple.
pub const POSITION_FIELD: &str = "position";

/// Fixed-point layout for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateFormat {
    pub width: usize,
    pub precision: usize,
}

impl CoordinateFormat {
    /// Layout used for table columns.
    pub const TABLE: CoordinateFormat = CoordinateFormat {
        width: 8,
        precision: 3,
    };

    /// Layout used for the coordinate listing.
    pub const LISTING: CoordinateFormat = CoordinateFormat {
        width: 12,
        precision: 6,
    };

    /// Right-aligns `value` to the configured width and precision.
    pub fn format(&self, value: f64) -> String {
        format!(
            "{:>width$.precision$}",
            value,
            width = self.width,
            precision = self.precision
        )
    }
}

/// Reads the coordinates out of `entry` without modifying it.
pub fn coordinates(entry: &LogEntry) -> Option<Result<[f64; 3], LiteralError>> {
    entry.get(POSITION_FIELD).map(parse_triple)
}

/// Replaces `position` with formatted `x`, `y` and `z` fields.
///
/// Returns `Ok(false)` when the entry has no position. On a parse error the
/// entry is left untouched.
pub fn expand_position(entry: &mut LogEntry, format: CoordinateFormat) -> Result<bool, LiteralError> {
    let [x, y, z] = match coordinates(entry) {
        None => return Ok(false),
        Some(parsed) => parsed?,
    };

    entry.remove(POSITION_FIELD);
    entry.insert("x", format.format(x));
    entry.insert("y", format.format(y));
    entry.insert("z", format.format(z));
    Ok(true)
}
