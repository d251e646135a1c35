//! Core section parser implementation
//!
//! One stateful sequential pass over a file's rows: section boundaries move
//! the section state, header rows replace the live column mapping, data and
//! amendment rows become canonical records, and the section buffer defers
//! marker emission until a section proves non-empty.

use std::path::Path;

use tracing::{debug, info};

use crate::app::models::{Record, SectionMarker};
use crate::config::ParseOptions;
use crate::constants::{canonical_section_name, sections};
use crate::{Error, Result};

use super::classifier::{RowClassifier, RowKind};
use super::column_map::ColumnMap;
use super::patterns::{SectionMatch, SectionPatterns};
use super::record_parser::{build_amendment_record, build_order_record};
use super::section_buffer::SectionBuffer;
use super::stats::{ParseResult, ParseStats};

/// Section parser for brokerage statement CSV exports
///
/// The parser holds only immutable configuration; scan state lives on the
/// stack of each `parse_*` call, so one parser can process any number of
/// files.
#[derive(Debug)]
pub struct SectionParser {
    patterns: SectionPatterns,
    classifier: RowClassifier,
    options: ParseOptions,
}

impl SectionParser {
    /// Create a parser with the default pattern table
    pub fn new(options: ParseOptions) -> Self {
        Self::with_patterns(SectionPatterns::default_table(), options)
    }

    /// Create a parser with a caller-supplied pattern table
    pub fn with_patterns(patterns: SectionPatterns, options: ParseOptions) -> Self {
        Self {
            patterns,
            classifier: RowClassifier::new(),
            options,
        }
    }

    /// Scan one file and return its ordered records plus statistics.
    ///
    /// File bytes are decoded permissively; invalid sequences are replaced
    /// rather than fatal.
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing statement file: {}", file_path.display());

        let bytes = std::fs::read(file_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(file_path.display().to_string())
            } else {
                Error::io(format!("Failed to read file {}", file_path.display()), e)
            }
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let result = self.parse_str(&content, &file_path.display().to_string())?;
        info!(
            "Parsed {} records from {} rows ({} sections skipped)",
            result.stats.records_parsed, result.stats.rows_scanned, result.stats.sections_skipped
        );
        Ok(result)
    }

    /// Scan CSV content already held in memory
    pub fn parse_str(&self, content: &str, file_label: &str) -> Result<ParseResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records: Vec<Record> = Vec::new();
        let mut stats = ParseStats::new();
        let mut buffer = SectionBuffer::new(self.options.skip_empty_sections);

        let mut current_section = sections::TOP.to_string();
        let mut active_map: Option<ColumnMap> = None;
        let mut excluded = false;
        // True once a boundary row has opened the current section; the
        // initial "Top" sentinel is not an opened section.
        let mut section_open = false;
        // Whether the current section instance has emitted a data or
        // amendment record yet; distinguishes a title row followed by its
        // own combined header from a genuinely new section.
        let mut section_has_data = false;
        let mut row_index = 0usize;

        for row in reader.records() {
            let row = row.map_err(|e| {
                Error::csv_parsing(file_label, format!("after row {}", row_index), Some(e))
            })?;
            // Blank lines never reach us, so the reader's line position is
            // the authoritative 1-based source row index.
            row_index = row
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_index + 1);
            if let Some(max_rows) = self.options.max_rows {
                if row_index > max_rows {
                    row_index -= 1;
                    break;
                }
            }

            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            let raw = cells.join(",");
            let joined = cells
                .iter()
                .map(|c| c.trim())
                .collect::<Vec<_>>()
                .join(",");

            // Boundary detection runs first: a bare section title would
            // otherwise classify as a data row.
            match self.patterns.match_row(&joined) {
                Some(SectionMatch::Ignored) => continue,
                Some(SectionMatch::Boundary(name)) => {
                    let canonical = canonical_section_name(name).to_string();
                    let is_header = matches!(self.classifier.classify(&cells), RowKind::Header);

                    if section_open && canonical == current_section && !section_has_data && !excluded
                    {
                        // Same section instance: a combined title+header row
                        // following its own bare title supplies the mapping
                        // without opening (and skipping) a new section.
                        if is_header {
                            debug!("Row {}: header for open section '{}'", row_index, canonical);
                            let map = ColumnMap::resolve(cells.iter().map(|s| s.as_str()));
                            let marker = Record::SectionMarker(SectionMarker {
                                section: canonical,
                                row_index,
                                raw,
                                source: None,
                            });
                            active_map = None;
                            if let Some(live) = buffer.set_header(marker, map, &mut records) {
                                active_map = Some(live);
                            }
                        }
                        continue;
                    }

                    debug!("Row {}: section boundary '{}'", row_index, canonical);

                    // Mapping is cleared at every boundary; a combined
                    // title+header row supplies the replacement in the same
                    // step.
                    active_map = None;
                    section_open = true;
                    section_has_data = false;
                    excluded = canonical == sections::ROLLING && !self.options.include_rolling;
                    current_section = canonical.clone();

                    if excluded {
                        buffer.start_section(None, None, &mut records);
                        continue;
                    }

                    let map = is_header
                        .then(|| ColumnMap::resolve(cells.iter().map(|s| s.as_str())));
                    let marker = Record::SectionMarker(SectionMarker {
                        section: canonical,
                        row_index,
                        raw,
                        source: None,
                    });
                    if let Some(live) = buffer.start_section(Some(marker), map, &mut records) {
                        active_map = Some(live);
                    }
                    continue;
                }
                None => {}
            }

            if excluded {
                continue;
            }

            match self.classifier.classify(&cells) {
                RowKind::Noise => continue,
                RowKind::Header => {
                    debug!("Row {}: column header for '{}'", row_index, current_section);
                    let map = ColumnMap::resolve(cells.iter().map(|s| s.as_str()));
                    let marker = Record::SectionMarker(SectionMarker {
                        section: current_section.clone(),
                        row_index,
                        raw,
                        source: None,
                    });
                    active_map = None;
                    if let Some(live) = buffer.set_header(marker, map, &mut records) {
                        active_map = Some(live);
                    }
                }
                RowKind::Amendment { reference } => {
                    let headered = active_map.is_some() || buffer.has_pending_map();
                    if current_section == sections::TOP || !headered {
                        stats.rows_dropped += 1;
                        debug!(
                            "Row {}: amendment outside headered section, dropped",
                            row_index
                        );
                        continue;
                    }
                    if let Some(live) = buffer.flush(&mut records) {
                        active_map = Some(live);
                    }
                    records.push(build_amendment_record(
                        &cells,
                        &current_section,
                        row_index,
                        &raw,
                        reference,
                    ));
                    section_has_data = true;
                }
                RowKind::Data => {
                    let map = match buffer.pending_map().or(active_map.as_ref()) {
                        Some(map) => map,
                        None => {
                            stats.rows_dropped += 1;
                            debug!("Row {}: no header mapping live, dropped", row_index);
                            continue;
                        }
                    };
                    let built = build_order_record(
                        &cells,
                        &current_section,
                        row_index,
                        &raw,
                        map,
                        &self.options,
                    );
                    if let Some(record) = built {
                        if let Some(live) = buffer.flush(&mut records) {
                            active_map = Some(live);
                        }
                        records.push(record);
                        section_has_data = true;
                    }
                }
            }
        }

        buffer.finish();

        stats.rows_scanned = row_index;
        stats.records_parsed = records.len();
        stats.sections_skipped = buffer.skipped();

        Ok(ParseResult { records, stats })
    }
}
