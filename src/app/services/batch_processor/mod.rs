//! Batch processing for multiple statement files
//!
//! This module combines multiple files' record lists into one output
//! stream with file provenance on every record, aggregated validation
//! issue counts, and per-file error attribution. An optional
//! group-and-sort pass regroups the merged stream by section and orders
//! records within each section by best-available timestamp.

pub mod merge;
pub mod processor;
pub mod progress;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use processor::{BatchProcessor, BatchResult};
pub use progress::{FileProgress, FileStatus, ProgressCallback};
