//! Header resolution for ragged statement layouts
//!
//! This module maps raw column-header rows to canonical field slots. Header
//! cells vary across statement variants ("Exec Time" / "Execution Time",
//! "Qty" / "Quantity"), so resolution goes through an alias table with
//! substring matching.

use std::collections::HashMap;

use crate::constants::is_null_marker;

/// Known header-cell aliases, alias text to canonical field name.
///
/// Lookup is substring-based: a header cell resolves to canonical field X
/// when an alias for X appears anywhere in the normalized cell text. Some
/// aliases are substrings of others ("price" inside "net price"), so
/// resolution tries aliases longest-first and the most specific alias
/// claims the match.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    // Time fields
    ("exec time", "exec_time"),
    ("execution time", "exec_time"),
    ("time", "exec_time"),
    ("time canceled", "time_canceled"),
    ("time cancelled", "time_canceled"),
    ("time placed", "time_placed"),
    // Trade fields
    ("side", "side"),
    ("qty", "qty"),
    ("quantity", "qty"),
    ("pos effect", "pos_effect"),
    ("position effect", "pos_effect"),
    ("symbol", "symbol"),
    ("underlying", "symbol"),
    // Option fields
    ("exp", "exp"),
    ("expiration", "exp"),
    ("strike", "strike"),
    ("strike price", "strike"),
    ("type", "type"),
    ("spread", "spread"),
    // Price fields
    ("price", "price"),
    ("net price", "net_price"),
    ("netprice", "net_price"),
    ("price improvement", "price_improvement"),
    ("price_impr", "price_improvement"),
    // Order fields
    ("order type", "order_type"),
    ("ordertype", "order_type"),
    ("tif", "tif"),
    ("time in force", "tif"),
    ("status", "status"),
    // Other fields
    ("notes", "notes"),
    ("note", "notes"),
    ("mark", "mark"),
];

/// Normalize a header cell for alias lookup: strip a leading byte-order
/// marker, trim, collapse internal whitespace runs, lowercase.
pub fn normalize_header_cell(cell: &str) -> String {
    let stripped = cell.trim_start_matches('\u{feff}').trim();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Immutable mapping from canonical field name to column index, scoped to
/// the section instance currently in effect.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    field_to_index: HashMap<String, usize>,
}

impl ColumnMap {
    /// Resolve a raw header row into a canonical field mapping.
    ///
    /// Aliases are tried longest-first per cell. Once a canonical field has
    /// been claimed by an earlier (leftmost) column, later columns cannot
    /// overwrite it. Unresolvable cells are ignored.
    pub fn resolve<'a, I>(header_cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sorted_aliases: Vec<&(&str, &str)> = COLUMN_ALIASES.iter().collect();
        sorted_aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut field_to_index = HashMap::new();
        for (index, cell) in header_cells.into_iter().enumerate() {
            let normalized = normalize_header_cell(cell);
            if normalized.is_empty() {
                continue;
            }
            for &&(alias, field) in &sorted_aliases {
                if normalized.contains(alias) {
                    field_to_index.entry(field.to_string()).or_insert(index);
                    break;
                }
            }
        }

        Self { field_to_index }
    }

    /// Column index bound to a canonical field, if any
    pub fn get(&self, field: &str) -> Option<usize> {
        self.field_to_index.get(field).copied()
    }

    /// True when a canonical field resolved to a column
    pub fn has_field(&self, field: &str) -> bool {
        self.field_to_index.contains_key(field)
    }

    /// Number of resolved canonical fields
    pub fn len(&self) -> usize {
        self.field_to_index.len()
    }

    /// True when no field resolved
    pub fn is_empty(&self) -> bool {
        self.field_to_index.is_empty()
    }

    /// Fetch a canonical field's cell from a data row.
    ///
    /// Returns `None` for an unmapped field, an out-of-bounds index, or a
    /// cell whose trimmed text is a null marker (empty, `~`, `-`).
    pub fn cell<'a>(&self, row: &'a [String], field: &str) -> Option<&'a str> {
        let index = self.get(field)?;
        let value = row.get(index)?.trim();
        if is_null_marker(value) {
            None
        } else {
            Some(value)
        }
    }
}
