//! Row/column table for tab-separated statistics files.

use crate::error::{CovFilterError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A single table cell.
///
/// Cells load as `Text` and stay that way unless their column is coerced
/// with [`StatsTable::coerce_numeric`]. Coercion never fails a row: a value
/// that does not parse as a number becomes `Missing`, and `Missing` fails
/// every threshold comparison downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Raw field text, preserved byte-for-byte from the input.
    Text(String),
    /// Numeric value from a coerced column.
    Number(f64),
    /// Absent or non-numeric value.
    Missing,
}

impl Value {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Try to get as numeric f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as raw text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render this cell as a TSV field.
    ///
    /// `Text` is emitted verbatim, `Number` in the always-decimal form of
    /// [`format_number`], and `Missing` as an empty field.
    pub fn to_field(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(v) => format_number(*v),
            Value::Missing => String::new(),
        }
    }
}

/// Render a float the way the statistics writer does: shortest digits that
/// round-trip, with a forced decimal point for integral values (`100` is
/// written as `100.0`, `30.5` as `30.5`).
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value == value.trunc() && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// An ordered table of statistics rows loaded from tab-separated text.
///
/// The header row defines column names; data rows keep their input order
/// throughout. There is no keying: row identity is row order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    /// Column names in header order, whitespace- and quote-cleaned.
    columns: Vec<String>,
    /// Data rows, one `Value` per column.
    rows: Vec<Vec<Value>>,
}

impl StatsTable {
    /// Create a table from column names and rows.
    ///
    /// Every row must have exactly one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(CovFilterError::InvalidParameter(format!(
                    "Row {} has {} fields, expected {}",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Load a table from a TSV file.
    ///
    /// Expected format:
    /// - First row: header with column names
    /// - Subsequent rows: tab-separated values
    ///
    /// Header names are whitespace-trimmed and have all single-quote
    /// characters removed. Blank lines are skipped. Rows shorter than the
    /// header are padded with `Missing`; surplus fields are ignored. Every
    /// cell loads as `Text`.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        // Parse header
        let header_line = lines
            .next()
            .ok_or_else(|| CovFilterError::EmptyData("Empty statistics file".to_string()))??;
        let columns: Vec<String> = header_line
            .trim_end_matches('\r')
            .split('\t')
            .map(clean_header)
            .collect();
        let n_columns = columns.len();

        // Parse data rows
        let mut rows: Vec<Vec<Value>> = Vec::new();
        for line_result in lines {
            let line = line_result?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let mut row: Vec<Value> = line
                .split('\t')
                .take(n_columns)
                .map(|field| Value::Text(field.to_string()))
                .collect();
            row.resize(n_columns, Value::Missing);
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Coerce the named columns to numeric.
    ///
    /// For each cell of each named column, all leading single-quote
    /// characters are stripped and the remainder is parsed as a float.
    /// Values that fail to parse (or parse as NaN) become `Missing`; no
    /// error is raised for bad cell content.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if a named column is absent from the header.
    pub fn coerce_numeric(mut self, columns: &[&str]) -> Result<Self> {
        let mut indices = Vec::with_capacity(columns.len());
        for &name in columns {
            let idx = self
                .column_index(name)
                .ok_or_else(|| CovFilterError::MissingColumn(name.to_string()))?;
            indices.push(idx);
        }

        for row in &mut self.rows {
            for &idx in &indices {
                let coerced = match &row[idx] {
                    Value::Text(s) => parse_number(s.trim_start_matches('\'')),
                    Value::Number(v) => Value::Number(*v),
                    Value::Missing => Value::Missing,
                };
                row[idx] = coerced;
            }
        }

        Ok(self)
    }

    /// Write the table to a TSV file, header first.
    ///
    /// Parent directories are created if absent; an existing file at the
    /// path is overwritten.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", self.columns.join("\t"))?;
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(Value::to_field).collect();
            writeln!(writer, "{}", fields.join("\t"))?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Number of data rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in header order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in input order.
    #[inline]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Index of a column by name.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Get a cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }
}

/// Clean a header name: trim whitespace, drop every single-quote character.
fn clean_header(name: &str) -> String {
    name.trim().replace('\'', "")
}

/// Parse a field as a float, mapping failures (and NaN) to `Missing`.
fn parse_number(text: &str) -> Value {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_nan() => Value::Missing,
        Ok(v) => Value::Number(v),
        Err(_) => Value::Missing,
    }
}
