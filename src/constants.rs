//! Application constants for the statement processor
//!
//! This module contains canonical section names, null-value markers, token
//! vocabularies, and date format lists used throughout the application.

// =============================================================================
// Canonical Section Names
// =============================================================================

/// Canonical section names emitted in the output stream
pub mod sections {
    /// Top-of-file metadata block before any recognized boundary
    pub const TOP: &str = "Top";

    /// Orders that executed
    pub const FILLED: &str = "Filled Orders";

    /// Orders canceled before execution
    pub const CANCELED: &str = "Canceled Orders";

    /// Orders still working at export time
    pub const WORKING: &str = "Working Orders";

    /// Covered-call rolling strategy block (excluded by default)
    pub const ROLLING: &str = "Rolling Strategies";

    /// Deterministic emission order for the group-and-sort pass.
    /// Unknown sections follow in order of first appearance.
    pub const CANONICAL_ORDER: &[&str] = &[TOP, FILLED, CANCELED, WORKING, ROLLING];
}

/// Normalize statement-variant section titles to their canonical name.
///
/// Some statement formats label the filled-order block "Account Trade
/// History"; both layouts carry the same columns.
pub fn canonical_section_name(name: &str) -> &str {
    if name.eq_ignore_ascii_case("Account Trade History") {
        sections::FILLED
    } else {
        name
    }
}

// =============================================================================
// Null Markers and Cell Normalization
// =============================================================================

/// Cell values that represent "no value" rather than literal data
pub const NULL_MARKERS: &[&str] = &["", "~", "-"];

/// Check whether a raw cell is a null marker once trimmed
pub fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS.contains(&value.trim())
}

// =============================================================================
// Date and Time Formats
// =============================================================================

/// Calendar datetime formats attempted in order when normalizing time fields
pub const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Date-only formats attempted after the datetime formats
pub const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Canonical rendering for normalized datetimes
pub const CANONICAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Canonical rendering for normalized dates (option expiries)
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Two-digit years at or below this value expand to 20xx, above to 19xx
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

/// Three-letter month codes accepted in option expiry tokens ("15 JAN 26")
pub const MONTH_ABBREVIATIONS: &[(&str, u32)] = &[
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

// =============================================================================
// Row Vocabulary
// =============================================================================

/// Time-column vocabulary that identifies a column-header row
pub const TIME_HEADER_TOKENS: &[&str] = &["exec time", "time canceled", "time placed"];

/// Quantity-column signatures accepted in a header row
pub const QTY_HEADER_TOKENS: &[&str] = &["qty", "quantity"];

/// Side-column signature required in a header row
pub const SIDE_HEADER_TOKEN: &str = "side";

/// Amendment sub-row reference cell, e.g. "REF #1234"
pub const AMENDMENT_REF_PATTERN: &str = r"(?i)^\s*ref\s*#?\s*(\d+)\s*$";

/// Order-type tokens recognized anywhere in an amendment row
pub const ORDER_TYPE_TOKENS: &[&str] = &["MKT", "LMT", "STP", "STPLMT", "TRSTP"];

/// Time-in-force tokens recognized anywhere in an amendment row
pub const TIF_TOKENS: &[&str] = &["DAY", "GTC", "EXT", "GTC_EXT", "AM", "PM"];

/// Status prefixes suppressed by the status filter (order-management noise)
pub const FILTERED_STATUS_PREFIXES: &[&str] = &["TRIGGERED", "REJECTED"];

// =============================================================================
// Issue Tokens
// =============================================================================

/// Machine-readable issue tokens recorded against records
pub mod issues {
    /// Marker tag carried by section and header marker records
    pub const SECTION_HEADER: &str = "section_header";

    /// Quantity cell present but not parseable as an integer
    pub const QTY_PARSE_FAILED: &str = "qty_parse_failed";

    /// Data record with no symbol
    pub const MISSING_SYMBOL: &str = "missing_symbol";

    /// Data record with no side
    pub const MISSING_SIDE: &str = "missing_side";

    /// Data record with no quantity
    pub const MISSING_QTY: &str = "missing_qty";

    /// Option record lacking an expiry date
    pub const OPTION_MISSING_EXP: &str = "option_missing_exp";

    /// Option record lacking a strike price
    pub const OPTION_MISSING_STRIKE: &str = "option_missing_strike";

    /// Option record lacking a PUT/CALL right
    pub const OPTION_MISSING_RIGHT: &str = "option_missing_right";

    /// Non-amendment record whose type token maps to no known asset class
    pub const UNKNOWN_ASSET_TYPE: &str = "unknown_asset_type";

    /// Amendment row without a reference number
    pub const AMEND_MISSING_REF: &str = "amend_missing_ref";

    /// Amendment row without a stop price
    pub const AMEND_MISSING_STOP_PRICE: &str = "amend_missing_stop_price";
}

/// Issue token for a float field that failed to parse, e.g. "price_parse_failed"
pub fn float_parse_issue(field_name: &str) -> String {
    format!("{}_parse_failed", field_name)
}

// =============================================================================
// Output Defaults
// =============================================================================

/// Default output path when none is supplied
pub const DEFAULT_OUTPUT_FILENAME: &str = "output.ndjson";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_markers() {
        assert!(is_null_marker(""));
        assert!(is_null_marker("~"));
        assert!(is_null_marker("-"));
        assert!(is_null_marker("  ~  "));
        assert!(!is_null_marker("--"));
        assert!(!is_null_marker("0"));
    }

    #[test]
    fn test_canonical_section_name() {
        assert_eq!(canonical_section_name("Account Trade History"), "Filled Orders");
        assert_eq!(canonical_section_name("account trade history"), "Filled Orders");
        assert_eq!(canonical_section_name("Working Orders"), "Working Orders");
    }

    #[test]
    fn test_float_parse_issue_names_field() {
        assert_eq!(float_parse_issue("price"), "price_parse_failed");
        assert_eq!(float_parse_issue("net_price"), "net_price_parse_failed");
    }
}
