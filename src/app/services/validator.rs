//! Structural-completeness validation for record streams
//!
//! A stateless pass over a record list that counts issues per category.
//! Counts are informational: they are surfaced to the caller and never
//! raised as errors.

use std::collections::BTreeMap;

use crate::app::models::{AssetType, Record};
use crate::constants::issues;

fn bump(counts: &mut BTreeMap<String, usize>, issue: &str) {
    *counts.entry(issue.to_string()).or_insert(0) += 1;
}

/// Count structural-completeness issues across a record list.
///
/// Section-marker records are always skipped. Amendment records are checked
/// for their reference number and stop price; order records for symbol,
/// side, quantity, option completeness, and a recognizable asset type.
pub fn validate(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for record in records {
        match record {
            Record::SectionMarker(_) => {}
            Record::Amendment(amendment) => {
                if amendment.amendment.reference.is_none() {
                    bump(&mut counts, issues::AMEND_MISSING_REF);
                }
                if amendment.amendment.stop_price.is_none() {
                    bump(&mut counts, issues::AMEND_MISSING_STOP_PRICE);
                }
            }
            Record::Order(order) => {
                if order.symbol.is_none() {
                    bump(&mut counts, issues::MISSING_SYMBOL);
                }
                if order.side.is_none() {
                    bump(&mut counts, issues::MISSING_SIDE);
                }
                if order.qty.is_none() {
                    bump(&mut counts, issues::MISSING_QTY);
                }

                match order.asset_type {
                    Some(AssetType::Option) => {
                        let leg = order.option.as_ref();
                        if leg.and_then(|l| l.exp_date.as_ref()).is_none() {
                            bump(&mut counts, issues::OPTION_MISSING_EXP);
                        }
                        if leg.and_then(|l| l.strike).is_none() {
                            bump(&mut counts, issues::OPTION_MISSING_STRIKE);
                        }
                        let right = leg.and_then(|l| l.right.as_deref());
                        if !matches!(right, Some("PUT") | Some("CALL")) {
                            bump(&mut counts, issues::OPTION_MISSING_RIGHT);
                        }
                    }
                    Some(_) => {}
                    None => bump(&mut counts, issues::UNKNOWN_ASSET_TYPE),
                }
            }
        }
    }

    counts
}
