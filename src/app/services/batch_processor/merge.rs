//! Cross-file regrouping and in-section ordering
//!
//! The optional group-and-sort pass partitions merged records by canonical
//! section, keeps only the first marker seen per section as that section's
//! single header row, and orders each section's data records by their
//! best-available timestamp. Records lacking any resolvable timestamp keep
//! their relative order after all timestamped records.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::app::models::Record;
use crate::constants::sections;

#[derive(Debug, Default)]
struct SectionGroup {
    marker: Option<Record>,
    data: Vec<Record>,
}

/// Regroup records by section and sort within each section.
///
/// Sections are re-emitted in a deterministic order: the canonical sections
/// first, then unknown sections in order of first appearance in the merged
/// stream.
pub fn group_and_sort(records: Vec<Record>) -> Vec<Record> {
    let mut groups: HashMap<String, SectionGroup> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for record in records {
        let section = record.section().to_string();
        let group = groups.entry(section.clone()).or_insert_with(|| {
            first_seen.push(section.clone());
            SectionGroup::default()
        });
        if record.is_marker() {
            // Only the first marker survives as the section's header row
            if group.marker.is_none() {
                group.marker = Some(record);
            }
        } else {
            group.data.push(record);
        }
    }

    let mut ordered_sections: Vec<String> = Vec::new();
    for canonical in sections::CANONICAL_ORDER {
        if groups.contains_key(*canonical) {
            ordered_sections.push(canonical.to_string());
        }
    }
    for section in &first_seen {
        if !sections::CANONICAL_ORDER.contains(&section.as_str()) {
            ordered_sections.push(section.clone());
        }
    }

    let mut output = Vec::new();
    for section in ordered_sections {
        let mut group = match groups.remove(&section) {
            Some(group) => group,
            None => continue,
        };
        if let Some(marker) = group.marker.take() {
            output.push(marker);
        }
        group.data.sort_by(compare_timestamps);
        output.append(&mut group.data);
    }

    output
}

/// Timestamped records sort ascending; untimed records sort after all
/// timestamped ones. The sort is stable, so equal keys and the untimed
/// group keep their merged order.
fn compare_timestamps(a: &Record, b: &Record) -> Ordering {
    match (a.timestamp(), b.timestamp()) {
        (Some(ta), Some(tb)) => ta.cmp(tb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
