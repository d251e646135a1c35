//! Batch orchestration across multiple statement files
//!
//! Files are processed strictly in caller-supplied order. Every produced
//! record is tagged with the originating file's base name and batch
//! position, and validation issue counts are accumulated across files.
//! Per-file failures are caught individually and never abort the batch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::app::models::{Record, SourceFile};
use crate::app::services::section_parser::{SectionParser, SectionPatterns};
use crate::app::services::validator;
use crate::config::BatchOptions;
use crate::{Error, Result};

use super::merge::group_and_sort;
use super::progress::{FileProgress, FileStatus, ProgressCallback};

/// Results from a batch processing run
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Merged records from all successful files
    pub records: Vec<Record>,

    /// Total number of files submitted
    pub total_files: usize,

    /// Number of files processed successfully
    pub successful_files: usize,

    /// Number of files that failed to process
    pub failed_files: usize,

    /// Total number of records parsed across all files
    pub total_records: usize,

    /// Sections suppressed as empty, summed across files
    pub sections_skipped: usize,

    /// Validation issue counts summed per category across files
    pub validation_issues: BTreeMap<String, usize>,

    /// File path to error message for failed files
    pub file_errors: BTreeMap<String, String>,
}

/// Batch processor for multiple statement files
#[derive(Debug)]
pub struct BatchProcessor {
    parser: SectionParser,
    group_sections: bool,
}

impl BatchProcessor {
    /// Create a batch processor, compiling any caller-supplied section
    /// pattern override.
    pub fn new(options: BatchOptions) -> Result<Self> {
        let patterns = match &options.section_patterns {
            Some(pairs) => SectionPatterns::from_pairs(pairs)?,
            None => SectionPatterns::default_table(),
        };
        Ok(Self {
            parser: SectionParser::with_patterns(patterns, options.parse),
            group_sections: options.group_sections,
        })
    }

    /// Process files in order, merging their records.
    ///
    /// A failed file is recorded in the result's error map and processing
    /// continues with the remaining files; the batch itself only errors on
    /// an empty file list.
    pub fn process(
        &self,
        file_paths: &[PathBuf],
        progress: Option<&ProgressCallback>,
    ) -> Result<BatchResult> {
        if file_paths.is_empty() {
            return Err(Error::configuration("no input files supplied"));
        }

        let total_files = file_paths.len();
        let mut all_records: Vec<Record> = Vec::new();
        let mut successful_files = 0;
        let mut failed_files = 0;
        let mut sections_skipped = 0;
        let mut validation_issues: BTreeMap<String, usize> = BTreeMap::new();
        let mut file_errors: BTreeMap<String, String> = BTreeMap::new();

        for (file_index, file_path) in file_paths.iter().enumerate() {
            let path_display = file_path.display().to_string();
            notify(
                progress,
                &path_display,
                file_index,
                total_files,
                0,
                FileStatus::Processing,
                None,
            );

            match self.parser.parse_file(file_path) {
                Ok(mut result) => {
                    for (issue, count) in validator::validate(&result.records) {
                        *validation_issues.entry(issue).or_insert(0) += count;
                    }

                    let source_name = base_name(file_path);
                    for record in &mut result.records {
                        record.set_source(SourceFile {
                            name: source_name.clone(),
                            index: file_index,
                        });
                    }

                    let parsed = result.records.len();
                    sections_skipped += result.stats.sections_skipped;
                    all_records.extend(result.records);
                    successful_files += 1;

                    notify(
                        progress,
                        &path_display,
                        file_index,
                        total_files,
                        parsed,
                        FileStatus::Completed,
                        None,
                    );
                }
                Err(error) => {
                    let message = error.to_string();
                    warn!("Failed to process {}: {}", path_display, message);
                    failed_files += 1;
                    file_errors.insert(path_display.clone(), message.clone());

                    notify(
                        progress,
                        &path_display,
                        file_index,
                        total_files,
                        0,
                        FileStatus::Failed,
                        Some(message),
                    );
                }
            }
        }

        let total_records = all_records.len();
        let records = if self.group_sections {
            group_and_sort(all_records)
        } else {
            all_records
        };

        info!(
            "Batch complete: {}/{} files, {} records",
            successful_files, total_files, total_records
        );

        Ok(BatchResult {
            records,
            total_files,
            successful_files,
            failed_files,
            total_records,
            sections_skipped,
            validation_issues,
            file_errors,
        })
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[allow(clippy::too_many_arguments)]
fn notify(
    progress: Option<&ProgressCallback>,
    file_path: &str,
    file_index: usize,
    total_files: usize,
    records_parsed: usize,
    status: FileStatus,
    error: Option<String>,
) {
    if let Some(callback) = progress {
        callback(&FileProgress {
            file_path: file_path.to_string(),
            file_index,
            total_files,
            records_parsed,
            status,
            error,
        });
    }
}
