//! Row classification for the stateful section scan
//!
//! Each row is assigned one structural role. Evaluation order matters:
//! blank rows first, then amendment sub-rows, then column headers, and data
//! as the fallback. Whether a data row is actually admissible (a header
//! mapping must be live) is the parser's decision, not the classifier's.

use regex::Regex;

use crate::constants::{
    AMENDMENT_REF_PATTERN, QTY_HEADER_TOKENS, SIDE_HEADER_TOKEN, TIME_HEADER_TOKENS,
};

use super::column_map::normalize_header_cell;

/// Structural role of one raw row
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// All cells blank or whitespace; ignored without state change
    Noise,
    /// Sub-row refining the preceding order row, with its captured
    /// reference number
    Amendment { reference: Option<String> },
    /// Column-header row naming the fields for the rows that follow
    Header,
    /// Anything else; admissible only while a header mapping is live
    Data,
}

/// Classifies raw rows into structural roles
#[derive(Debug)]
pub struct RowClassifier {
    amendment_ref: Regex,
}

impl RowClassifier {
    pub fn new() -> Self {
        Self {
            amendment_ref: Regex::new(AMENDMENT_REF_PATTERN)
                .expect("amendment reference pattern compiles"),
        }
    }

    /// Classify one row's cells
    pub fn classify(&self, cells: &[String]) -> RowKind {
        if cells.iter().all(|c| c.trim().is_empty()) {
            return RowKind::Noise;
        }

        for cell in cells {
            if let Some(captures) = self.amendment_ref.captures(cell) {
                let reference = captures.get(1).map(|m| m.as_str().to_string());
                return RowKind::Amendment { reference };
            }
        }

        if self.is_header_row(cells) {
            return RowKind::Header;
        }

        RowKind::Data
    }

    /// A header row carries time-column vocabulary plus both a side and a
    /// quantity column signature.
    fn is_header_row(&self, cells: &[String]) -> bool {
        let normalized: Vec<String> = cells.iter().map(|c| normalize_header_cell(c)).collect();

        let has_time = normalized
            .iter()
            .any(|cell| TIME_HEADER_TOKENS.iter().any(|token| cell.contains(token)));
        let has_side = normalized
            .iter()
            .any(|cell| cell.contains(SIDE_HEADER_TOKEN));
        let has_qty = normalized
            .iter()
            .any(|cell| QTY_HEADER_TOKENS.iter().any(|token| cell.contains(token)));

        has_time && has_side && has_qty
    }
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self::new()
    }
}
