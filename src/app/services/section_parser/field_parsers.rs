//! Field normalization for statement cells
//!
//! Pure conversion functions for the typed slots of the canonical schema:
//! integer quantities, money/float fields, calendar datetimes, and option
//! expiry dates. Field-level failures never abort processing; they are
//! recorded as issue tokens or collapse to null per the policy of each
//! converter.

use chrono::{NaiveDate, NaiveDateTime};

use crate::app::models::Qty;
use crate::constants::{
    float_parse_issue, issues, CANONICAL_DATETIME_FORMAT, CANONICAL_DATE_FORMAT, DATETIME_FORMATS,
    DATE_FORMATS, MONTH_ABBREVIATIONS, TWO_DIGIT_YEAR_PIVOT,
};

/// Parse an integer quantity cell.
///
/// Strips thousands separators and a redundant leading plus sign, and
/// collapses a "-+" or "+-" prefix to a single minus. In unsigned mode the
/// absolute value is reported. An unparsable cell records
/// `qty_parse_failed` and keeps the original trimmed text, so the value is
/// never silently dropped.
pub fn parse_qty(raw: Option<&str>, unsigned: bool, issues_out: &mut Vec<String>) -> Option<Qty> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = trimmed.replace(',', "");
    let (negative, digits) = if let Some(rest) = cleaned
        .strip_prefix("-+")
        .or_else(|| cleaned.strip_prefix("+-"))
    {
        (true, rest)
    } else if let Some(rest) = cleaned.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = cleaned.strip_prefix('+') {
        (false, rest)
    } else {
        (false, cleaned.as_str())
    };

    match digits.parse::<i64>() {
        Ok(value) if value >= 0 => {
            let signed = if negative { -value } else { value };
            Some(Qty::Count(if unsigned { signed.abs() } else { signed }))
        }
        _ => {
            issues_out.push(issues::QTY_PARSE_FAILED.to_string());
            Some(Qty::Raw(trimmed.to_string()))
        }
    }
}

/// Parse a money/float cell (price, net price, price improvement, strike,
/// mark).
///
/// Dollar signs and commas are stripped; a bare leading decimal point gets
/// a zero prefix. Failure records an issue token named after the field and
/// collapses the value to null.
pub fn parse_float(
    raw: Option<&str>,
    field_name: &str,
    issues_out: &mut Vec<String>,
) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut cleaned: String = trimmed.chars().filter(|c| *c != '$' && *c != ',').collect();
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }

    match cleaned.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            issues_out.push(float_parse_issue(field_name));
            None
        }
    }
}

/// Normalize a calendar datetime cell to canonical ISO-8601.
///
/// Formats are tried in a fixed order (two- and four-digit-year
/// month/day/year with seconds, ISO variants, then date-only forms). A cell
/// matching no format is a silent null; malformed dates are common in real
/// exports and not always diagnostic.
pub fn normalize_datetime(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.format(CANONICAL_DATETIME_FORMAT).to_string());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            let dt = date.and_hms_opt(0, 0, 0)?;
            return Some(dt.format(CANONICAL_DATETIME_FORMAT).to_string());
        }
    }
    None
}

/// Parse an option expiry cell.
///
/// Accepts an ISO calendar date or a "day MONTH-abbreviation year" token
/// ("15 JAN 26", case insensitive). Two-digit years expand around a pivot:
/// values at or below 69 become 20xx, 70 and above become 19xx.
/// Unrecognized month codes or malformed tokens yield null.
pub fn parse_expiry(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, CANONICAL_DATE_FORMAT) {
        return Some(date.format(CANONICAL_DATE_FORMAT).to_string());
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month_code = parts[1].to_uppercase();
    let month = MONTH_ABBREVIATIONS
        .iter()
        .find(|(code, _)| *code == month_code)
        .map(|(_, number)| *number)?;
    let year_raw: i32 = parts[2].parse().ok()?;
    let year = if parts[2].len() <= 2 {
        if year_raw <= TWO_DIGIT_YEAR_PIVOT {
            2000 + year_raw
        } else {
            1900 + year_raw
        }
    } else {
        year_raw
    };

    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format(CANONICAL_DATE_FORMAT).to_string())
}
