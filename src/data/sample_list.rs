//! Sample and library identifier list extracted from a statistics table.

use crate::data::table::{format_number, StatsTable, Value};
use crate::error::{CovFilterError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column holding sample identifiers.
pub const SAMPLE_ID_COLUMN: &str = "SampleID";

/// Column holding library identifiers.
pub const LIBRARY_ID_COLUMN: &str = "LibraryID";

/// One sample/library identifier pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleEntry {
    pub sample_id: String,
    pub library_id: String,
}

/// Ordered list of sample/library pairs kept by a filter run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleList {
    entries: Vec<SampleEntry>,
}

impl SampleList {
    /// Extract the identifier columns from a table, preserving row order.
    ///
    /// Leading single-quote characters are stripped from each identifier,
    /// so a spreadsheet-escaped `'S1` comes out as `S1`.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if `SampleID` or `LibraryID` is absent.
    pub fn from_table(table: &StatsTable) -> Result<Self> {
        let sample_idx = table
            .column_index(SAMPLE_ID_COLUMN)
            .ok_or_else(|| CovFilterError::MissingColumn(SAMPLE_ID_COLUMN.to_string()))?;
        let library_idx = table
            .column_index(LIBRARY_ID_COLUMN)
            .ok_or_else(|| CovFilterError::MissingColumn(LIBRARY_ID_COLUMN.to_string()))?;

        let entries = table
            .rows()
            .iter()
            .map(|row| SampleEntry {
                sample_id: identifier_field(&row[sample_idx]),
                library_id: identifier_field(&row[library_idx]),
            })
            .collect();

        Ok(Self { entries })
    }

    /// Write the list as headerless two-column TSV, followed by a blank
    /// line and a comment recording the thresholds that produced it:
    ///
    /// ```text
    /// S1\tL1
    ///
    /// # Used filters: Coverage mean > 20.0, Coverage median > 10.0
    /// ```
    ///
    /// Parent directories are created if absent; an existing file is
    /// overwritten. An empty list still gets the trailer.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        mean_threshold: f64,
        median_threshold: f64,
    ) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for entry in &self.entries {
            writeln!(writer, "{}\t{}", entry.sample_id, entry.library_id)?;
        }
        writeln!(writer)?;
        writeln!(
            writer,
            "# Used filters: Coverage mean > {}, Coverage median > {}",
            format_number(mean_threshold),
            format_number(median_threshold)
        )?;
        writer.flush()?;

        Ok(())
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in row order.
    #[inline]
    pub fn entries(&self) -> &[SampleEntry] {
        &self.entries
    }
}

/// Render a cell as an identifier: text loses leading single quotes,
/// numbers render like any other output field, missing becomes empty.
fn identifier_field(value: &Value) -> String {
    match value {
        Value::Text(s) => s.trim_start_matches('\'').to_string(),
        Value::Number(v) => format_number(*v),
        Value::Missing => String::new(),
    }
}
