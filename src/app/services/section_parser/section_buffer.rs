//! Empty-section suppression
//!
//! A small state machine with three slots: a pending section marker, a
//! pending header-row marker, and the column mapping they imply. Markers are
//! held back until the section proves it contains at least one data row; a
//! section that reaches the next boundary (or end of file) with its markers
//! still pending is counted as skipped and contributes no records.
//!
//! The policy is configurable: when disabled, markers are emitted
//! immediately and no counting occurs.

use crate::app::models::Record;

use super::column_map::ColumnMap;

/// One-section lookahead buffer for marker emission
#[derive(Debug, Default)]
pub struct SectionBuffer {
    enabled: bool,
    pending_section: Option<Record>,
    pending_header: Option<Record>,
    pending_map: Option<ColumnMap>,
    skipped: usize,
}

impl SectionBuffer {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Begin a new section at a boundary row.
    ///
    /// Any previous section still pending is counted as skipped and its
    /// markers discarded. `marker` is `None` for excluded sections, which
    /// reset the buffer without queueing anything. `map` is present for
    /// combined title+header rows.
    ///
    /// Returns a mapping to activate immediately when buffering is
    /// disabled.
    pub fn start_section(
        &mut self,
        marker: Option<Record>,
        map: Option<ColumnMap>,
        out: &mut Vec<Record>,
    ) -> Option<ColumnMap> {
        if !self.enabled {
            if let Some(marker) = marker {
                out.push(marker);
            }
            return map;
        }

        self.discard_pending();
        self.pending_section = marker;
        self.pending_map = map;
        None
    }

    /// Record a column-header row for the current section.
    ///
    /// Replaces any previously pending header mapping wholesale. Returns the
    /// mapping to activate immediately when buffering is disabled.
    pub fn set_header(
        &mut self,
        marker: Record,
        map: ColumnMap,
        out: &mut Vec<Record>,
    ) -> Option<ColumnMap> {
        if !self.enabled {
            out.push(marker);
            return Some(map);
        }

        self.pending_header = Some(marker);
        self.pending_map = Some(map);
        None
    }

    /// True when a buffered header mapping is waiting to go live
    pub fn has_pending_map(&self) -> bool {
        self.pending_map.is_some()
    }

    /// The buffered mapping, used to build the data row that triggers the
    /// flush
    pub fn pending_map(&self) -> Option<&ColumnMap> {
        self.pending_map.as_ref()
    }

    /// Flush buffered markers ahead of the section's first data or
    /// amendment record, returning the mapping to switch live.
    pub fn flush(&mut self, out: &mut Vec<Record>) -> Option<ColumnMap> {
        if let Some(marker) = self.pending_section.take() {
            out.push(marker);
        }
        if let Some(marker) = self.pending_header.take() {
            out.push(marker);
        }
        self.pending_map.take()
    }

    /// End of file: a still-pending section is counted as skipped
    pub fn finish(&mut self) {
        self.discard_pending();
    }

    /// Number of sections suppressed for containing no data rows
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn discard_pending(&mut self) {
        if self.pending_section.is_some() || self.pending_header.is_some() {
            self.skipped += 1;
        }
        self.pending_section = None;
        self.pending_header = None;
        self.pending_map = None;
    }
}
