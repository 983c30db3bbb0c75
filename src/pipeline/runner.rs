//! End-to-end coverage filter run over an analysis directory.

use crate::data::{SampleList, StatsTable};
use crate::error::{CovFilterError, Result};
use crate::filter::filter_coverage_with_stats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Subdirectory holding the input statistics table.
pub const INPUT_SUBDIR: &str = "Analysis/Statistics";

/// Subdirectory receiving the filtered outputs.
pub const OUTPUT_SUBDIR: &str = "Analysis/Filtered_Statistics";

/// File name of the statistics table, identical for input and output.
pub const STATISTICS_FILE: &str = "Mapping_and_Variant_Statistics.tab";

/// File name of the kept sample/library list.
pub const SAMPLES_FILE: &str = "filtered_samples.txt";

/// Column holding the mean coverage values.
pub const COVERAGE_MEAN_COLUMN: &str = "(Any) Coverage mean";

/// Column holding the median coverage values.
pub const COVERAGE_MEDIAN_COLUMN: &str = "(Any) Coverage median";

/// Configuration for a filter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Analysis root directory, containing `Analysis/Statistics/`.
    pub directory: PathBuf,
    /// Threshold for the coverage mean column (strictly greater than).
    pub coverage_mean: f64,
    /// Threshold for the coverage median column (strictly greater than).
    pub coverage_median: f64,
}

impl RunConfig {
    /// Create a config for the given analysis root and thresholds.
    pub fn new<P: Into<PathBuf>>(directory: P, coverage_mean: f64, coverage_median: f64) -> Self {
        Self {
            directory: directory.into(),
            coverage_mean,
            coverage_median,
        }
    }

    /// Path of the input statistics table.
    pub fn input_path(&self) -> PathBuf {
        self.directory.join(INPUT_SUBDIR).join(STATISTICS_FILE)
    }

    /// Directory receiving the filtered outputs.
    pub fn output_dir(&self) -> PathBuf {
        self.directory.join(OUTPUT_SUBDIR)
    }

    /// Path of the filtered statistics table.
    pub fn table_path(&self) -> PathBuf {
        self.output_dir().join(STATISTICS_FILE)
    }

    /// Path of the kept sample/library list.
    pub fn samples_path(&self) -> PathBuf {
        self.output_dir().join(SAMPLES_FILE)
    }
}

/// Summary of a completed filter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of rows in the input table.
    pub n_input: usize,
    /// Number of rows kept by the thresholds.
    pub n_kept: usize,
    /// Number of rows removed.
    pub n_removed: usize,
    /// Rows with a missing or non-numeric coverage value.
    pub n_not_numeric: usize,
    /// Where the filtered table was written.
    pub table_path: PathBuf,
    /// Where the sample list was written.
    pub samples_path: PathBuf,
}

impl RunSummary {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Coverage Filter Run")?;
        writeln!(f, "  Input rows:   {}", self.n_input)?;
        writeln!(f, "  Kept rows:    {}", self.n_kept)?;
        writeln!(f, "  Removed rows: {}", self.n_removed)?;
        writeln!(f, "  Non-numeric:  {}", self.n_not_numeric)?;
        writeln!(f, "  Table:        {}", self.table_path.display())?;
        writeln!(f, "  Samples:      {}", self.samples_path.display())?;
        Ok(())
    }
}

/// Run the coverage filter over an analysis directory.
///
/// Loads `Analysis/Statistics/Mapping_and_Variant_Statistics.tab` under the
/// configured directory, coerces the two coverage columns to numeric,
/// keeps rows strictly above both thresholds, and writes the filtered
/// table plus the sample/library list to `Analysis/Filtered_Statistics/`
/// (created if absent, overwritten if present).
///
/// # Errors
///
/// Returns `NotFound` if the input table does not exist, `MissingColumn`
/// if a coverage or identifier column is absent, and `Io` on read or
/// write failure. Nothing is written when an error is returned before
/// the output stage.
pub fn run_filter(config: &RunConfig) -> Result<RunSummary> {
    let input = config.input_path();
    if !input.is_file() {
        return Err(CovFilterError::NotFound(input));
    }

    let table = StatsTable::from_tsv(&input)?
        .coerce_numeric(&[COVERAGE_MEAN_COLUMN, COVERAGE_MEDIAN_COLUMN])?;

    let (filtered, stats) = filter_coverage_with_stats(
        &table,
        COVERAGE_MEAN_COLUMN,
        config.coverage_mean,
        COVERAGE_MEDIAN_COLUMN,
        config.coverage_median,
    )?;

    // Resolve the identifier columns before writing anything, so a bad
    // header leaves no partial output behind
    let samples = SampleList::from_table(&filtered)?;

    let table_path = config.table_path();
    filtered.to_tsv(&table_path)?;

    let samples_path = config.samples_path();
    samples.write(&samples_path, config.coverage_mean, config.coverage_median)?;

    Ok(RunSummary {
        n_input: stats.n_before,
        n_kept: stats.n_after,
        n_removed: stats.n_removed,
        n_not_numeric: stats.n_not_numeric,
        table_path,
        samples_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_test_input(root: &Path) {
        let stats_dir = root.join(INPUT_SUBDIR);
        fs::create_dir_all(&stats_dir).unwrap();
        fs::write(
            stats_dir.join(STATISTICS_FILE),
            "SampleID\tLibraryID\t(Any) Coverage mean\t(Any) Coverage median\n\
             'S1\t'L1\t30.5\t20.1\n\
             'S2\t'L2\t10.0\t5.0\n",
        )
        .unwrap();
    }

    #[test]
    fn test_run_filter() {
        let dir = TempDir::new().unwrap();
        create_test_input(dir.path());

        let config = RunConfig::new(dir.path(), 20.0, 10.0);
        let summary = run_filter(&config).unwrap();

        assert_eq!(summary.n_input, 2);
        assert_eq!(summary.n_kept, 1);
        assert_eq!(summary.n_removed, 1);
        assert_eq!(summary.n_not_numeric, 0);

        let table = fs::read_to_string(config.table_path()).unwrap();
        assert_eq!(
            table,
            "SampleID\tLibraryID\t(Any) Coverage mean\t(Any) Coverage median\n\
             'S1\t'L1\t30.5\t20.1\n"
        );

        let samples = fs::read_to_string(config.samples_path()).unwrap();
        assert_eq!(
            samples,
            "S1\tL1\n\n# Used filters: Coverage mean > 20.0, Coverage median > 10.0\n"
        );
    }

    #[test]
    fn test_run_filter_missing_input() {
        let dir = TempDir::new().unwrap();

        let config = RunConfig::new(dir.path(), 20.0, 10.0);
        let result = run_filter(&config);

        assert!(matches!(result, Err(CovFilterError::NotFound(_))));
        // Nothing written on failure
        assert!(!config.output_dir().exists());
    }

    #[test]
    fn test_run_filter_missing_identifier_column() {
        let dir = TempDir::new().unwrap();
        let stats_dir = dir.path().join(INPUT_SUBDIR);
        fs::create_dir_all(&stats_dir).unwrap();
        fs::write(
            stats_dir.join(STATISTICS_FILE),
            "SampleID\t(Any) Coverage mean\t(Any) Coverage median\n'S1\t30.5\t20.1\n",
        )
        .unwrap();

        let config = RunConfig::new(dir.path(), 20.0, 10.0);
        let result = run_filter(&config);

        assert!(matches!(result, Err(CovFilterError::MissingColumn(_))));
        assert!(!config.output_dir().exists());
    }

    #[test]
    fn test_run_filter_empty_result() {
        let dir = TempDir::new().unwrap();
        create_test_input(dir.path());

        // Thresholds nothing can pass; both outputs still get written
        let config = RunConfig::new(dir.path(), 1e9, 1e9);
        let summary = run_filter(&config).unwrap();

        assert_eq!(summary.n_kept, 0);

        let table = fs::read_to_string(config.table_path()).unwrap();
        assert_eq!(
            table,
            "SampleID\tLibraryID\t(Any) Coverage mean\t(Any) Coverage median\n"
        );

        let samples = fs::read_to_string(config.samples_path()).unwrap();
        assert_eq!(
            samples,
            "\n# Used filters: Coverage mean > 1000000000.0, Coverage median > 1000000000.0\n"
        );
    }

    #[test]
    fn test_run_filter_overwrites_existing_outputs() {
        let dir = TempDir::new().unwrap();
        create_test_input(dir.path());

        let config = RunConfig::new(dir.path(), 20.0, 10.0);
        run_filter(&config).unwrap();
        let first = fs::read_to_string(config.table_path()).unwrap();

        run_filter(&config).unwrap();
        let second = fs::read_to_string(config.table_path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_config_paths() {
        let config = RunConfig::new("/data/run1", 20.0, 10.0);

        assert_eq!(
            config.input_path(),
            PathBuf::from("/data/run1/Analysis/Statistics/Mapping_and_Variant_Statistics.tab")
        );
        assert_eq!(
            config.table_path(),
            PathBuf::from(
                "/data/run1/Analysis/Filtered_Statistics/Mapping_and_Variant_Statistics.tab"
            )
        );
        assert_eq!(
            config.samples_path(),
            PathBuf::from("/data/run1/Analysis/Filtered_Statistics/filtered_samples.txt")
        );
    }

    #[test]
    fn test_summary_json() {
        let dir = TempDir::new().unwrap();
        create_test_input(dir.path());

        let config = RunConfig::new(dir.path(), 20.0, 10.0);
        let summary = run_filter(&config).unwrap();

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"n_kept\": 1"));
    }
}
