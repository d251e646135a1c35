//! End-to-end integration tests for the statement conversion pipeline
//!
//! These tests exercise the public library surface the way the CLI does:
//! statement files on disk in, flat NDJSON records out.

use std::path::PathBuf;

use tempfile::TempDir;

use statement_processor::app::services::ndjson_writer::{self, OutputFormat};
use statement_processor::app::services::validator;
use statement_processor::{BatchOptions, BatchProcessor, ParseOptions, Record, SectionParser};

const FILLED_HEADER: &str =
    ",,Exec Time,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,Price,Net Price,Price Improvement,Order Type";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn filled_statement(exec_time: &str, symbol: &str) -> String {
    format!(
        "Today's Trade Activity\n\
         \n\
         Filled Orders\n\
         {FILLED_HEADER}\n\
         ,,{exec_time},STOCK,SELL,-75,TO CLOSE,{symbol},,,STOCK,8.30,8.30,-,MKT\n"
    )
}

#[test]
fn test_single_file_to_ndjson() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "statement.csv",
        &filled_statement("10/24/25 09:51:38", "NEUP"),
    );
    let output = dir.path().join("output.ndjson");

    let parser = SectionParser::new(ParseOptions::default());
    let result = parser.parse_file(&input).unwrap();
    ndjson_writer::write_to_path(&result.records, &output, OutputFormat::Ndjson, false).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("section").is_some());
        assert!(value.get("row_index").is_some());
        assert!(value.get("raw").is_some());
        assert!(value.get("issues").is_some());
    }

    // Marker first, then the data row with normalized fields
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["issues"][0], "section_header");

    let data: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
    assert_eq!(data["section"], "Filled Orders");
    assert_eq!(data["side"], "SELL");
    assert_eq!(data["qty"], -75);
    assert_eq!(data["symbol"], "NEUP");
    assert_eq!(data["asset_type"], "STOCK");
    assert_eq!(data["price"], 8.30);
    assert!(data["price_improvement"].is_null());
    assert_eq!(data["event_type"], "fill");
}

#[test]
fn test_group_and_sort_across_two_files() {
    let dir = TempDir::new().unwrap();
    // The file submitted first holds the later trade
    let late = write_file(
        &dir,
        "late.csv",
        &filled_statement("10/24/25 10:15:02", "LATE"),
    );
    let early = write_file(
        &dir,
        "early.csv",
        &filled_statement("10/24/25 09:51:38", "EARLY"),
    );

    let options = BatchOptions {
        group_sections: true,
        ..BatchOptions::default()
    };
    let processor = BatchProcessor::new(options).unwrap();
    let result = processor.process(&[late, early], None).unwrap();

    // Exactly one marker leads the section, data follows in time order
    let markers: Vec<&Record> = result.records.iter().filter(|r| r.is_marker()).collect();
    assert_eq!(markers.len(), 1);
    assert!(result.records[0].is_marker());

    let symbols: Vec<String> = result
        .records
        .iter()
        .filter_map(|r| match r {
            Record::Order(o) => o.symbol.clone(),
            _ => None,
        })
        .collect();
    assert_eq!(symbols, vec!["EARLY".to_string(), "LATE".to_string()]);
}

#[test]
fn test_batch_with_missing_file_keeps_going() {
    let dir = TempDir::new().unwrap();
    let good1 = write_file(
        &dir,
        "good1.csv",
        &filled_statement("10/24/25 09:51:38", "NEUP"),
    );
    let missing = dir.path().join("missing.csv");
    let good2 = write_file(
        &dir,
        "good2.csv",
        &filled_statement("10/24/25 10:15:02", "ACME"),
    );

    let processor = BatchProcessor::new(BatchOptions::default()).unwrap();
    let result = processor
        .process(&[good1, missing.clone(), good2], None)
        .unwrap();

    assert_eq!(result.successful_files, 2);
    assert_eq!(result.failed_files, 1);
    assert!(result
        .file_errors
        .contains_key(&missing.display().to_string()));

    let symbols: Vec<String> = result
        .records
        .iter()
        .filter_map(|r| match r {
            Record::Order(o) => o.symbol.clone(),
            _ => None,
        })
        .collect();
    assert_eq!(symbols, vec!["NEUP".to_string(), "ACME".to_string()]);
}

#[test]
fn test_triggered_and_rejected_rows_filtered_by_default() {
    let dir = TempDir::new().unwrap();
    let content = format!(
        "Working Orders\n\
         Notes,,Time Placed,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,PRICE,,TIF,Mark,Status\n\
         ,,10/27/25 08:12:00,STOCK,BUY,+100,TO OPEN,ACME,,,STOCK,12.50,LMT,DAY,12.40,WORKING\n\
         ,,10/27/25 08:13:00,STOCK,BUY,+10,TO OPEN,NEUP,,,STOCK,9.00,LMT,DAY,9.10,TRIGGERED\n\
         ,,10/27/25 08:14:00,STOCK,SELL,-10,TO CLOSE,NEUP,,,STOCK,9.50,LMT,DAY,9.40,REJECTED: too late\n"
    );
    let input = write_file(&dir, "working.csv", &content);

    let parser = SectionParser::new(ParseOptions::default());
    let result = parser.parse_file(&input).unwrap();
    let statuses: Vec<String> = result
        .records
        .iter()
        .filter_map(|r| match r {
            Record::Order(o) => o.status.clone(),
            _ => None,
        })
        .collect();
    assert_eq!(statuses, vec!["WORKING".to_string()]);

    // With the filter disabled the rows survive with their derived tags
    let parser = SectionParser::new(ParseOptions {
        filter_status: false,
        ..ParseOptions::default()
    });
    let result = parser.parse_file(&input).unwrap();
    let tagged: Vec<(String, &'static str)> = result
        .records
        .iter()
        .filter_map(|r| match r {
            Record::Order(o) => Some((o.status.clone().unwrap(), o.event_type.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        tagged,
        vec![
            ("WORKING".to_string(), "other"),
            ("TRIGGERED".to_string(), "other"),
            ("REJECTED: TOO LATE".to_string(), "cancel"),
        ]
    );
}

#[test]
fn test_validator_counts_surface_through_batch() {
    let dir = TempDir::new().unwrap();
    let content = format!(
        "Filled Orders\n\
         {FILLED_HEADER}\n\
         ,,10/24/25 09:51:38,STOCK,SELL,-75,TO CLOSE,,,,STOCK,8.30,8.30,-,MKT\n\
         ,,10/24/25 09:52:00,STOCK,BUY,,TO OPEN,NEUP,,,STOCK,8.40,8.40,-,MKT\n"
    );
    let input = write_file(&dir, "issues.csv", &content);

    let processor = BatchProcessor::new(BatchOptions::default()).unwrap();
    let result = processor.process(&[input], None).unwrap();

    assert_eq!(result.validation_issues.get("missing_symbol"), Some(&1));
    assert_eq!(result.validation_issues.get("missing_qty"), Some(&1));
}

#[test]
fn test_validator_direct_pass_matches_spec_categories() {
    let dir = TempDir::new().unwrap();
    let content = format!(
        "Filled Orders\n\
         {FILLED_HEADER}\n\
         ,,10/24/25 10:02:11,SINGLE,BUY,+2,TO OPEN,NEUP,16 JAN 26,,CALL,1.25,1.25,-,LMT\n"
    );
    let input = write_file(&dir, "option.csv", &content);

    let parser = SectionParser::new(ParseOptions::default());
    let result = parser.parse_file(&input).unwrap();
    let counts = validator::validate(&result.records);

    // Strike cell is blank: the option is incomplete but the record emits
    assert_eq!(counts.get("option_missing_strike"), Some(&1));
    assert_eq!(counts.get("option_missing_exp"), None);
    assert_eq!(counts.get("option_missing_right"), None);
}

#[test]
fn test_json_array_output_round_trips() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "statement.csv",
        &filled_statement("10/24/25 09:51:38", "NEUP"),
    );
    let output = dir.path().join("output.json");

    let parser = SectionParser::new(ParseOptions::default());
    let result = parser.parse_file(&input).unwrap();
    ndjson_writer::write_to_path(&result.records, &output, OutputFormat::JsonArray, true).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(values[2]["symbol"], "NEUP");
}
