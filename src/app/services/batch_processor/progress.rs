//! Progress notification types for batch runs
//!
//! The batch processor calls back once per file transition. Notifications
//! are pure: no return value is consumed and the callback cannot influence
//! processing.

/// Processing state of one file in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File scan is starting
    Processing,
    /// File scanned successfully
    Completed,
    /// File aborted; the batch continues with remaining files
    Failed,
}

/// Progress information for a single file being processed
#[derive(Debug, Clone)]
pub struct FileProgress {
    /// Path of the file being processed
    pub file_path: String,

    /// 0-based index of this file in the batch
    pub file_index: usize,

    /// Total number of files in the batch
    pub total_files: usize,

    /// Records parsed from this file so far
    pub records_parsed: usize,

    /// Current status
    pub status: FileStatus,

    /// Error message when status is `Failed`
    pub error: Option<String>,
}

/// Callback invoked with per-file progress updates
pub type ProgressCallback<'a> = dyn Fn(&FileProgress) + 'a;
