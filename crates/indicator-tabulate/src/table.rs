//! Table assembly and output.

use crate::entry::LogEntry;
use crate::error::Result;
use crate::registry::{display_width, FieldRegistry};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for the tabulated entries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space-separated, right-aligned columns.
    #[default]
    Text,
    Csv,
    /// Array of objects holding only the fields each entry has.
    Json,
}

/// Right-aligns `s` to `width` display columns. Never truncates.
fn pad_left(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(padding), s)
}

/// Retained entries plus the registry describing their columns.
#[derive(Debug, Clone)]
pub struct Table {
    registry: FieldRegistry,
    rows: Vec<LogEntry>,
    placeholder: String,
}

impl Table {
    pub fn new(registry: FieldRegistry, placeholder: impl Into<String>) -> Self {
        Self {
            registry,
            rows: Vec::new(),
            placeholder: placeholder.into(),
        }
    }

    /// Appends a row, registering its fields and widening columns.
    pub fn push(&mut self, entry: LogEntry) {
        self.registry.observe_entry(&entry);
        self.rows.push(entry);
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn rows(&self) -> &[LogEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths at render time. A column missing from any row is at
    /// least as wide as the placeholder.
    fn widths(&self) -> Vec<usize> {
        let placeholder = display_width(&self.placeholder);
        self.registry
            .columns()
            .iter()
            .map(|column| {
                if self.rows.iter().any(|row| !row.contains(&column.name)) {
                    column.width.max(placeholder)
                } else {
                    column.width
                }
            })
            .collect()
    }

    fn cells<'a>(&'a self, row: &'a LogEntry) -> impl Iterator<Item = &'a str> {
        self.registry
            .names()
            .map(move |name| row.get(name).unwrap_or(self.placeholder.as_str()))
    }

    fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
        cells
            .zip(widths)
            .map(|(cell, &width)| format!(" {}", pad_left(cell, width)))
            .collect()
    }

    /// Header line: every field name right-aligned in its column.
    pub fn header(&self) -> String {
        Self::line(self.registry.names(), &self.widths())
    }

    /// Renders the whole table, one line per row after the header.
    pub fn render_text(&self) -> String {
        let widths = self.widths();
        let mut out = Self::line(self.registry.names(), &widths);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&Self::line(self.cells(row), &widths));
            out.push('\n');
        }
        out
    }

    /// Writes the table to `writer` in `format`.
    pub fn write_to<W: Write>(&self, mut writer: W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                writer.write_all(self.render_text().as_bytes())?;
            }
            OutputFormat::Csv => {
                let mut csv = csv::Writer::from_writer(writer);
                csv.write_record(self.registry.names())?;
                for row in &self.rows {
                    csv.write_record(self.cells(row))?;
                }
                csv.flush()?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &self.rows)?;
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
