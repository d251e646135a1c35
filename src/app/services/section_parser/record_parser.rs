//! Canonical record construction from classified rows
//!
//! Combines the classifier's verdict, the live column mapping, and the field
//! normalizers to emit one canonical record per admissible row, applying
//! status-based filtering and event/asset tag derivation.

use crate::app::models::{
    AmendmentDetail, AmendmentRecord, AssetType, EventType, OptionLeg, OrderRecord, Record,
};
use crate::config::ParseOptions;
use crate::constants::{FILTERED_STATUS_PREFIXES, ORDER_TYPE_TOKENS, TIF_TOKENS};

use super::column_map::ColumnMap;
use super::field_parsers::{normalize_datetime, parse_expiry, parse_float, parse_qty};

fn uppercased(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_uppercase())
}

/// Build an order record from a data row under the live column mapping.
///
/// Returns `None` for structurally empty rows (no side, quantity, symbol,
/// or type token) and for rows suppressed by the status filter; neither is
/// an error.
pub fn build_order_record(
    cells: &[String],
    section: &str,
    row_index: usize,
    raw: &str,
    map: &ColumnMap,
    options: &ParseOptions,
) -> Option<Record> {
    let side_raw = map.cell(cells, "side");
    let qty_raw = map.cell(cells, "qty");
    let symbol_raw = map.cell(cells, "symbol");
    let type_raw = map.cell(cells, "type");

    // Rows with none of the identifying fields are structural filler
    if side_raw.is_none() && qty_raw.is_none() && symbol_raw.is_none() && type_raw.is_none() {
        return None;
    }

    let status = uppercased(map.cell(cells, "status"));
    if options.filter_status {
        if let Some(status_value) = &status {
            if FILTERED_STATUS_PREFIXES
                .iter()
                .any(|prefix| status_value.starts_with(prefix))
            {
                return None;
            }
        }
    }

    let mut record = OrderRecord::new(section, row_index, raw);

    record.exec_time = normalize_datetime(map.cell(cells, "exec_time"));
    record.time_canceled = normalize_datetime(map.cell(cells, "time_canceled"));
    record.time_placed = normalize_datetime(map.cell(cells, "time_placed"));

    record.side = uppercased(side_raw);
    record.qty = parse_qty(qty_raw, options.qty_unsigned, &mut record.issues);
    record.pos_effect = uppercased(map.cell(cells, "pos_effect"));
    record.symbol = uppercased(symbol_raw);

    record.exp = map.cell(cells, "exp").map(|v| v.to_string());
    record.strike = parse_float(map.cell(cells, "strike"), "strike", &mut record.issues);
    record.type_code = uppercased(type_raw);
    record.spread = map.cell(cells, "spread").map(|v| v.to_string());

    record.price = parse_float(map.cell(cells, "price"), "price", &mut record.issues);
    record.net_price = parse_float(map.cell(cells, "net_price"), "net_price", &mut record.issues);
    record.price_improvement = parse_float(
        map.cell(cells, "price_improvement"),
        "price_improvement",
        &mut record.issues,
    );

    record.order_type = uppercased(map.cell(cells, "order_type"));
    record.tif = uppercased(map.cell(cells, "tif"));
    record.status = status;
    record.notes = map.cell(cells, "notes").map(|v| v.to_string());
    record.mark = parse_float(map.cell(cells, "mark"), "mark", &mut record.issues);

    record.asset_type = record
        .type_code
        .as_deref()
        .and_then(AssetType::from_type_token);

    if record.asset_type == Some(AssetType::Option) {
        record.option = Some(OptionLeg {
            exp_date: parse_expiry(record.exp.as_deref()),
            strike: record.strike,
            right: record.type_code.clone(),
        });
    }

    record.event_type = match &record.status {
        Some(status_value) => EventType::from_status(status_value),
        None => EventType::from_section(section),
    };

    Some(Record::Order(record))
}

/// Build an amendment record from a sub-row.
///
/// The reference number comes from the classifier's capture. The stop price
/// is the first cell that parses as a bare numeric token; order-type and
/// time-in-force tokens are recognized anywhere in the row. A missing
/// reference or stop price is left for the validator to count, not treated
/// as a parse failure.
pub fn build_amendment_record(
    cells: &[String],
    section: &str,
    row_index: usize,
    raw: &str,
    reference: Option<String>,
) -> Record {
    let mut detail = AmendmentDetail {
        reference,
        ..AmendmentDetail::default()
    };

    for cell in cells {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        if detail.stop_price.is_none() {
            if let Ok(value) = trimmed.parse::<f64>() {
                detail.stop_price = Some(value);
                continue;
            }
        }
        let token = trimmed.to_uppercase();
        if detail.order_type.is_none() && ORDER_TYPE_TOKENS.contains(&token.as_str()) {
            detail.order_type = Some(token);
        } else if detail.tif.is_none() && TIF_TOKENS.contains(&token.as_str()) {
            detail.tif = Some(token);
        }
    }

    Record::Amendment(AmendmentRecord {
        section: section.to_string(),
        row_index,
        raw: raw.to_string(),
        issues: Vec::new(),
        amendment: detail,
        source: None,
    })
}
