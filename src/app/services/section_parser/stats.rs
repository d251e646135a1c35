//! Scan statistics and result structures for section parsing

use crate::app::models::Record;

/// Result of scanning one file: the ordered record list plus statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Records in source-row order
    pub records: Vec<Record>,

    /// Scan statistics
    pub stats: ParseStats,
}

/// Per-file scan statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of rows scanned (including noise and markers)
    pub rows_scanned: usize,

    /// Number of records emitted
    pub records_parsed: usize,

    /// Rows dropped for arriving before any header mapping was live
    pub rows_dropped: usize,

    /// Sections suppressed for containing no data rows
    pub sections_skipped: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }
}
