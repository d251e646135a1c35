//! Tests for the group-and-sort pass

use crate::app::models::{OrderRecord, Record, SectionMarker};
use crate::app::services::batch_processor::merge::group_and_sort;

fn marker(section: &str, row_index: usize) -> Record {
    Record::SectionMarker(SectionMarker {
        section: section.to_string(),
        row_index,
        raw: section.to_string(),
        source: None,
    })
}

fn order(section: &str, row_index: usize, symbol: &str, exec_time: Option<&str>) -> Record {
    let mut record = OrderRecord::new(section, row_index, symbol);
    record.symbol = Some(symbol.to_string());
    record.exec_time = exec_time.map(|t| t.to_string());
    Record::Order(record)
}

#[test]
fn test_one_marker_per_section_survives() {
    let records = vec![
        marker("Filled Orders", 1),
        order("Filled Orders", 2, "NEUP", Some("2025-10-24T09:51:38")),
        marker("Filled Orders", 10),
        order("Filled Orders", 11, "ACME", Some("2025-10-24T10:15:02")),
    ];
    let merged = group_and_sort(records);

    let markers: Vec<&Record> = merged.iter().filter(|r| r.is_marker()).collect();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].row_index(), 1);
    assert!(merged[0].is_marker());
}

#[test]
fn test_records_sort_by_timestamp_across_files() {
    // Later file contributed the earlier trade
    let records = vec![
        marker("Filled Orders", 1),
        order("Filled Orders", 2, "LATE", Some("2025-10-24T10:15:02")),
        marker("Filled Orders", 1),
        order("Filled Orders", 2, "EARLY", Some("2025-10-24T09:51:38")),
    ];
    let merged = group_and_sort(records);

    assert_eq!(merged.len(), 3);
    assert!(merged[0].is_marker());
    assert!(matches!(&merged[1], Record::Order(o) if o.symbol.as_deref() == Some("EARLY")));
    assert!(matches!(&merged[2], Record::Order(o) if o.symbol.as_deref() == Some("LATE")));
}

#[test]
fn test_untimed_records_follow_timestamped_ones() {
    let records = vec![
        order("Filled Orders", 2, "NOTIME1", None),
        order("Filled Orders", 3, "TIMED", Some("2025-10-24T09:51:38")),
        order("Filled Orders", 4, "NOTIME2", None),
    ];
    let merged = group_and_sort(records);

    assert!(matches!(&merged[0], Record::Order(o) if o.symbol.as_deref() == Some("TIMED")));
    // Stable order preserved among the untimed group
    assert!(matches!(&merged[1], Record::Order(o) if o.symbol.as_deref() == Some("NOTIME1")));
    assert!(matches!(&merged[2], Record::Order(o) if o.symbol.as_deref() == Some("NOTIME2")));
}

#[test]
fn test_cancellation_time_serves_as_sort_key() {
    let mut canceled = OrderRecord::new("Canceled Orders", 2, "raw");
    canceled.symbol = Some("CXL".to_string());
    canceled.time_canceled = Some("2025-10-24T09:00:00".to_string());
    let mut canceled_later = OrderRecord::new("Canceled Orders", 3, "raw");
    canceled_later.symbol = Some("CXL2".to_string());
    canceled_later.time_canceled = Some("2025-10-24T09:30:00".to_string());

    let merged = group_and_sort(vec![
        Record::Order(canceled_later),
        Record::Order(canceled),
    ]);
    assert!(matches!(&merged[0], Record::Order(o) if o.symbol.as_deref() == Some("CXL")));
    assert!(matches!(&merged[1], Record::Order(o) if o.symbol.as_deref() == Some("CXL2")));
}

#[test]
fn test_sections_emit_in_canonical_order() {
    let records = vec![
        marker("Canceled Orders", 1),
        order("Canceled Orders", 2, "C", None),
        marker("Filled Orders", 5),
        order("Filled Orders", 6, "F", None),
        marker("Working Orders", 9),
        order("Working Orders", 10, "W", None),
    ];
    let merged = group_and_sort(records);

    let sections: Vec<&str> = merged.iter().map(|r| r.section()).collect();
    assert_eq!(
        sections,
        vec![
            "Filled Orders",
            "Filled Orders",
            "Canceled Orders",
            "Canceled Orders",
            "Working Orders",
            "Working Orders",
        ]
    );
}

#[test]
fn test_unknown_sections_follow_in_first_seen_order() {
    let records = vec![
        marker("Zeta Block", 1),
        marker("Alpha Block", 3),
        marker("Filled Orders", 5),
    ];
    let merged = group_and_sort(records);

    let sections: Vec<&str> = merged.iter().map(|r| r.section()).collect();
    assert_eq!(sections, vec!["Filled Orders", "Zeta Block", "Alpha Block"]);
}

#[test]
fn test_empty_input_stays_empty() {
    assert!(group_and_sort(Vec::new()).is_empty());
}
