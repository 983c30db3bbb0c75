//! Coverage-Threshold Filtering for Sequencing Statistics Tables
//!
//! This library filters per-sample mapping and variant statistics by
//! coverage thresholds and records which samples survived.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (StatsTable, SampleList)
//! - **filter**: Coverage-threshold filtering over table rows
//! - **pipeline**: End-to-end runs over analysis directories
//!
//! # Example
//!
//! ```no_run
//! use covfilter::prelude::*;
//!
//! // Keep samples with coverage mean > 20 and coverage median > 10
//! let config = RunConfig::new("/data/run1", 20.0, 10.0);
//! let summary = run_filter(&config).unwrap();
//! println!("{}", summary);
//! ```

pub mod data;
pub mod error;
pub mod filter;
pub mod pipeline;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{
        SampleEntry, SampleList, StatsTable, Value, LIBRARY_ID_COLUMN, SAMPLE_ID_COLUMN,
    };
    pub use crate::error::{CovFilterError, Result};
    pub use crate::filter::{filter_coverage, filter_coverage_with_stats, CoverageFilterResult};
    pub use crate::pipeline::{
        run_filter, RunConfig, RunSummary, COVERAGE_MEAN_COLUMN, COVERAGE_MEDIAN_COLUMN,
        INPUT_SUBDIR, OUTPUT_SUBDIR, SAMPLES_FILE, STATISTICS_FILE,
    };
}
