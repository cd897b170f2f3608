//! Field discovery and column width tracking.

use crate::entry::LogEntry;
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// Returns the display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// A discovered field and the widest text seen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Never smaller than the display width of `name`.
    pub width: usize,
}

/// Every field name seen so far, in first-seen order, with its column width.
///
/// The registry only grows: fields are never removed and widths never
/// shrink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-seeded with `names`, in order, each sized to
    /// its header.
    pub fn with_fields<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.register(name.as_ref());
        }
        registry
    }

    /// Registers `name` if unseen and returns its column index.
    pub fn register(&mut self, name: &str) -> usize {
        if let Some(&index) = self.index.get(name) {
            return index;
        }
        let index = self.columns.len();
        self.columns.push(Column {
            name: name.to_string(),
            width: display_width(name),
        });
        self.index.insert(name.to_string(), index);
        index
    }

    /// Registers `name` and widens its column to fit `value`.
    pub fn observe(&mut self, name: &str, value: &str) {
        let index = self.register(name);
        let column = &mut self.columns[index];
        column.width = column.width.max(display_width(value));
    }

    /// Observes every field of `entry`.
    pub fn observe_entry(&mut self, entry: &LogEntry) {
        for (name, value) in entry.iter() {
            self.observe(name, value);
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn width(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|&index| self.columns[index].width)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fields_start_at_header_width() {
        let registry = FieldRegistry::with_fields(["vehicle", "x"]);
        assert_eq!(registry.width("vehicle"), Some(7));
        assert_eq!(registry.width("x"), Some(1));
    }

    #[test]
    fn new_fields_append_in_encounter_order() {
        let mut registry = FieldRegistry::with_fields(["speed"]);
        registry.observe("drive_rpm", "1200");
        registry.observe("speed", "10");
        registry.observe("train_grade", "0.01");
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["speed", "drive_rpm", "train_grade"]
        );
    }

    #[test]
    fn width_never_below_header() {
        let mut registry = FieldRegistry::new();
        registry.observe("acceleration", "1");
        assert_eq!(registry.width("acceleration"), Some(12));
    }

    #[test]
    fn width_grows_and_never_shrinks() {
        let mut registry = FieldRegistry::new();
        registry.observe("plate", "DE2-1234567");
        registry.observe("plate", "S");
        assert_eq!(registry.width("plate"), Some(11));
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("機関車"), 6);
    }
}
