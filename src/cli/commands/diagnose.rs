//! Diagnose command: inspect a converted output file for validation issues
//!
//! Reads NDJSON output produced by the convert command, recomputes the
//! validator's issue categories from the flat records, and prints the
//! offending records for investigation.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};

use colored::Colorize;
use serde_json::Value;

use crate::cli::args::DiagnoseArgs;
use crate::constants::issues;
use crate::{Error, Result};

/// Fields shown for a problem record unless --show-all-fields is set
const RELEVANT_FIELDS: &[&str] = &[
    "source_file",
    "row_index",
    "section",
    "event_type",
    "symbol",
    "side",
    "qty",
    "type",
    "asset_type",
    "exec_time",
    "time_canceled",
    "price",
    "order_type",
    "amendment",
];

/// Run the diagnose command
pub fn run_diagnose(args: DiagnoseArgs) -> Result<()> {
    let records = load_records(&args)?;

    let mut issue_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut records_by_issue: BTreeMap<String, Vec<&Value>> = BTreeMap::new();
    for record in &records {
        for issue in record_issues(record) {
            *issue_counts.entry(issue.clone()).or_insert(0) += 1;
            records_by_issue.entry(issue).or_default().push(record);
        }
    }

    println!("{}", "=".repeat(80));
    println!("Validation Issue Summary for {}", args.input.display());
    println!("{}", "=".repeat(80));
    println!("Total records: {}", records.len());
    println!("Issue types found: {}", issue_counts.len());
    println!();

    if issue_counts.is_empty() {
        println!("{}", "No validation issues found!".green());
        return Ok(());
    }

    for (issue, count) in &issue_counts {
        println!("  {}: {}", issue, count);
    }
    println!();

    let issues_to_show: Vec<String> = if args.issue_types.is_empty() {
        issue_counts.keys().cloned().collect()
    } else {
        args.issue_types.clone()
    };

    for issue in issues_to_show {
        let Some(problem_records) = records_by_issue.get(&issue) else {
            println!("{}", format!("No records found for issue type: {}", issue).yellow());
            continue;
        };

        println!("{}", "=".repeat(80));
        println!("Issue: {} ({} record(s))", issue.red(), problem_records.len());
        println!("{}", "=".repeat(80));

        for (index, record) in problem_records.iter().enumerate() {
            println!("\n--- Record {} ---", index + 1);
            if args.show_all_fields {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                let filtered: serde_json::Map<String, Value> = RELEVANT_FIELDS
                    .iter()
                    .filter_map(|field| {
                        record
                            .get(field)
                            .map(|value| (field.to_string(), value.clone()))
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&Value::Object(filtered))?);
                if let Some(raw) = record.get("raw").and_then(Value::as_str) {
                    let shown: String = raw.chars().take(120).collect();
                    println!("\nRaw CSV: {}...", shown);
                }
            }
        }
    }

    Ok(())
}

fn load_records(args: &DiagnoseArgs) -> Result<Vec<Value>> {
    let file = std::fs::File::open(&args.input).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(args.input.display().to_string())
        } else {
            Error::io(format!("Failed to open {}", args.input.display()), e)
        }
    })?;

    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        records.push(serde_json::from_str(trimmed)?);
    }
    Ok(records)
}

/// Recompute the validator's issue categories from one flat record
fn record_issues(record: &Value) -> Vec<String> {
    let mut found = Vec::new();

    let has_marker_tag = record
        .get("issues")
        .and_then(Value::as_array)
        .map(|list| list.iter().any(|v| v == issues::SECTION_HEADER))
        .unwrap_or(false);
    if has_marker_tag {
        return found;
    }

    let event_type = record.get("event_type").and_then(Value::as_str);
    if event_type == Some("amend") {
        let amendment = record.get("amendment");
        let reference = amendment.and_then(|a| a.get("ref")).filter(|v| !v.is_null());
        if reference.is_none() {
            found.push(issues::AMEND_MISSING_REF.to_string());
        }
        let stop_price = amendment
            .and_then(|a| a.get("stop_price"))
            .filter(|v| !v.is_null());
        if stop_price.is_none() {
            found.push(issues::AMEND_MISSING_STOP_PRICE.to_string());
        }
        return found;
    }

    if is_null_field(record, "symbol") {
        found.push(issues::MISSING_SYMBOL.to_string());
    }
    if is_null_field(record, "side") {
        found.push(issues::MISSING_SIDE.to_string());
    }
    if is_null_field(record, "qty") {
        found.push(issues::MISSING_QTY.to_string());
    }

    match record.get("asset_type").and_then(Value::as_str) {
        Some("OPTION") => {
            let option = record.get("option");
            if option
                .and_then(|o| o.get("exp_date"))
                .map(Value::is_null)
                .unwrap_or(true)
            {
                found.push(issues::OPTION_MISSING_EXP.to_string());
            }
            if option
                .and_then(|o| o.get("strike"))
                .map(Value::is_null)
                .unwrap_or(true)
            {
                found.push(issues::OPTION_MISSING_STRIKE.to_string());
            }
            let right = option.and_then(|o| o.get("right")).and_then(Value::as_str);
            if !matches!(right, Some("PUT") | Some("CALL")) {
                found.push(issues::OPTION_MISSING_RIGHT.to_string());
            }
        }
        Some(_) => {}
        None => found.push(issues::UNKNOWN_ASSET_TYPE.to_string()),
    }

    found
}

fn is_null_field(record: &Value, field: &str) -> bool {
    record.get(field).map(Value::is_null).unwrap_or(true)
}
