//! Coverage-threshold filtering for statistics tables.

use crate::data::{StatsTable, Value};
use crate::error::{CovFilterError, Result};
use serde::{Deserialize, Serialize};

/// Filter rows by coverage mean and coverage median thresholds.
///
/// Keeps rows whose values in both named columns are strictly greater than
/// the matching threshold. Rows with a missing or non-numeric value in
/// either column never pass; run [`StatsTable::coerce_numeric`] on the
/// columns first.
///
/// # Arguments
/// * `table` - The statistics table to filter
/// * `mean_column` - Name of the coverage mean column
/// * `mean_threshold` - Rows must exceed this value in `mean_column`
/// * `median_column` - Name of the coverage median column
/// * `median_threshold` - Rows must exceed this value in `median_column`
///
/// # Returns
/// A new StatsTable holding only the rows exceeding both thresholds, in
/// their original order. Zero surviving rows is a valid outcome, not an
/// error.
pub fn filter_coverage(
    table: &StatsTable,
    mean_column: &str,
    mean_threshold: f64,
    median_column: &str,
    median_threshold: f64,
) -> Result<StatsTable> {
    if mean_threshold.is_nan() {
        return Err(CovFilterError::InvalidParameter(
            "mean_threshold must not be NaN".to_string(),
        ));
    }
    if median_threshold.is_nan() {
        return Err(CovFilterError::InvalidParameter(
            "median_threshold must not be NaN".to_string(),
        ));
    }

    let mean_idx = table
        .column_index(mean_column)
        .ok_or_else(|| CovFilterError::MissingColumn(mean_column.to_string()))?;
    let median_idx = table
        .column_index(median_column)
        .ok_or_else(|| CovFilterError::MissingColumn(median_column.to_string()))?;

    let rows: Vec<Vec<Value>> = table
        .rows()
        .iter()
        .filter(|row| {
            exceeds(&row[mean_idx], mean_threshold) && exceeds(&row[median_idx], median_threshold)
        })
        .cloned()
        .collect();

    StatsTable::new(table.column_names().to_vec(), rows)
}

/// Strict greater-than against a threshold. Missing and non-numeric
/// values never pass.
fn exceeds(value: &Value, threshold: f64) -> bool {
    match value.as_number() {
        Some(v) => v > threshold,
        None => false,
    }
}

/// Result of coverage filtering with statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageFilterResult {
    /// Number of rows before filtering.
    pub n_before: usize,
    /// Number of rows after filtering.
    pub n_after: usize,
    /// Number of rows removed.
    pub n_removed: usize,
    /// Rows with a missing or non-numeric value in a coverage column.
    pub n_not_numeric: usize,
}

impl std::fmt::Display for CoverageFilterResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Coverage Filter Result")?;
        writeln!(f, "  Rows before:  {}", self.n_before)?;
        writeln!(f, "  Rows after:   {}", self.n_after)?;
        writeln!(f, "  Rows removed: {}", self.n_removed)?;
        writeln!(f, "  Non-numeric:  {}", self.n_not_numeric)?;
        Ok(())
    }
}

/// Filter with statistics about what was filtered.
pub fn filter_coverage_with_stats(
    table: &StatsTable,
    mean_column: &str,
    mean_threshold: f64,
    median_column: &str,
    median_threshold: f64,
) -> Result<(StatsTable, CoverageFilterResult)> {
    let n_before = table.n_rows();

    let filtered = filter_coverage(
        table,
        mean_column,
        mean_threshold,
        median_column,
        median_threshold,
    )?;

    // Indices are valid here since filter_coverage checked the columns
    let mean_idx = table
        .column_index(mean_column)
        .ok_or_else(|| CovFilterError::MissingColumn(mean_column.to_string()))?;
    let median_idx = table
        .column_index(median_column)
        .ok_or_else(|| CovFilterError::MissingColumn(median_column.to_string()))?;
    let n_not_numeric = table
        .rows()
        .iter()
        .filter(|row| {
            row[mean_idx].as_number().is_none() || row[median_idx].as_number().is_none()
        })
        .count();

    let n_after = filtered.n_rows();
    let result = CoverageFilterResult {
        n_before,
        n_after,
        n_removed: n_before - n_after,
        n_not_numeric,
    };

    Ok((filtered, result))
}
