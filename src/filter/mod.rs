//! Filtering primitives for statistics tables.

pub mod coverage;

pub use coverage::{filter_coverage, filter_coverage_with_stats, CoverageFilterResult};
