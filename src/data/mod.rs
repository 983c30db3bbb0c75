//! Data structures for statistics tables and sample lists.

mod sample_list;
mod table;

pub use sample_list::{SampleEntry, SampleList, LIBRARY_ID_COLUMN, SAMPLE_ID_COLUMN};
pub use table::{StatsTable, Value};
