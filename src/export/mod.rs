//! Flattening and file export for crawl results.

pub mod csv;
pub mod flatten;
pub mod writer;

pub use flatten::{flatten, FlatRow, FIXED_COLUMNS, UNKNOWN};
pub use writer::ExportWriter;
