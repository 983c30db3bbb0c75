//! Filter run composition over analysis directories.

mod runner;

pub use runner::{
    run_filter, RunConfig, RunSummary, COVERAGE_MEAN_COLUMN, COVERAGE_MEDIAN_COLUMN, INPUT_SUBDIR,
    OUTPUT_SUBDIR, SAMPLES_FILE, STATISTICS_FILE,
};
