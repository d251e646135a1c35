//! Configuration for parse and batch runs.
//!
//! Options are plain data constructed from CLI flags and passed explicitly
//! into the parser and batch processor; there is no global mutable state.
//! Pattern and alias tables are likewise explicit data, so a caller-supplied
//! override is just a different table instance.

use serde::{Deserialize, Serialize};

/// Options controlling a single file scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Emit records for the Rolling Strategies section (excluded by default)
    pub include_rolling: bool,

    /// Stop scanning after this many rows (None = whole file)
    pub max_rows: Option<usize>,

    /// Report quantities as absolute values instead of signed
    pub qty_unsigned: bool,

    /// Buffer section/header markers and drop sections with no data rows
    pub skip_empty_sections: bool,

    /// Suppress rows whose status begins with TRIGGERED or REJECTED
    pub filter_status: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            include_rolling: false,
            max_rows: None,
            qty_unsigned: false,
            skip_empty_sections: true,
            filter_status: true,
        }
    }
}

/// Options controlling a multi-file batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Per-file scan options
    pub parse: ParseOptions,

    /// Regroup merged records by section and sort within each section by
    /// best-available timestamp
    pub group_sections: bool,

    /// Caller-supplied (pattern, section) table that wholly replaces the
    /// default section patterns for this run. `None` in the section slot
    /// means "recognized but intentionally ignored".
    pub section_patterns: Option<Vec<(String, Option<String>)>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let opts = ParseOptions::default();
        assert!(!opts.include_rolling);
        assert!(opts.max_rows.is_none());
        assert!(!opts.qty_unsigned);
        assert!(opts.skip_empty_sections);
        assert!(opts.filter_status);
    }

    #[test]
    fn test_batch_defaults() {
        let opts = BatchOptions::default();
        assert!(!opts.group_sections);
        assert!(opts.section_patterns.is_none());
    }
}
