//! Convert command: statement CSVs in, flat NDJSON/JSON out

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::app::services::batch_processor::{BatchProcessor, FileStatus};
use crate::app::services::ndjson_writer::{self, OutputFormat};
use crate::cli::args::ConvertArgs;
use crate::cli::input;
use crate::config::{BatchOptions, ParseOptions};
use crate::constants::DEFAULT_OUTPUT_FILENAME;
use crate::{Error, Result};

/// Run the convert command end to end
pub fn run_convert(args: ConvertArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME));

    // Collision with an input and a missing output directory are fatal;
    // missing inputs are attributed per-file by the batch instead.
    if !args.force {
        if let Some(message) = input::validate_output_not_input(&inputs, &output) {
            return Err(Error::data_validation(message));
        }
    }
    if let Some(message) = input::validate_output_directory(&output) {
        return Err(Error::data_validation(message));
    }
    if let Some(message) = input::validate_csv_extension_warning(&output) {
        warn!("{}", message);
    }

    let options = build_batch_options(&args)?;
    let processor = BatchProcessor::new(options)?;

    let bar = ProgressBar::new(inputs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let bar_ref = &bar;
    let progress = move |progress: &crate::app::services::batch_processor::FileProgress| {
        match progress.status {
            FileStatus::Processing => bar_ref.set_message(progress.file_path.clone()),
            FileStatus::Completed | FileStatus::Failed => bar_ref.inc(1),
        }
    };

    let result = processor.process(&inputs, Some(&progress))?;
    bar.finish_and_clear();

    let format = if args.output_json {
        OutputFormat::JsonArray
    } else {
        OutputFormat::Ndjson
    };
    ndjson_writer::write_to_path(&result.records, &output, format, args.pretty)?;

    if args.preview > 0 {
        print_preview(&output, args.preview)?;
    }
    print_summary(&result, &output);

    if result.successful_files == 0 {
        return Err(Error::data_validation(
            "no input file could be processed".to_string(),
        ));
    }
    Ok(())
}

/// Expand glob patterns, keeping plain paths and unmatched patterns as
/// literal paths so per-file errors stay attributable.
fn expand_inputs(raw_inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for raw in raw_inputs {
        if raw.contains('*') || raw.contains('?') || raw.contains('[') {
            let mut matches: Vec<PathBuf> = glob::glob(raw)
                .map_err(|e| Error::configuration(format!("bad glob pattern '{}': {}", raw, e)))?
                .filter_map(|entry| entry.ok())
                .collect();
            matches.sort();
            if matches.is_empty() {
                paths.push(PathBuf::from(raw));
            } else {
                paths.extend(matches);
            }
        } else {
            paths.push(PathBuf::from(raw));
        }
    }
    Ok(paths)
}

fn build_batch_options(args: &ConvertArgs) -> Result<BatchOptions> {
    let section_patterns = match &args.section_patterns_file {
        Some(path) => Some(load_patterns_file(path)?),
        None => None,
    };

    Ok(BatchOptions {
        parse: ParseOptions {
            include_rolling: args.include_rolling,
            max_rows: args.max_rows.filter(|n| *n > 0),
            qty_unsigned: args.qty_unsigned,
            skip_empty_sections: !args.keep_empty_sections,
            filter_status: !args.no_status_filter,
        },
        group_sections: args.group_sections,
        section_patterns,
    })
}

/// Load a pattern override file: one JSON object, keys tried in file order,
/// values either a section name or null for "recognized but ignored".
fn load_patterns_file(path: &std::path::Path) -> Result<Vec<(String, Option<String>)>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read patterns file {}", path.display()), e))?;
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| {
            Error::pattern_table(format!(
                "patterns file {} is not a JSON object: {}",
                path.display(),
                e
            ))
        })?;

    let mut pairs = Vec::with_capacity(object.len());
    for (pattern, value) in object {
        let section = match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(name) => Some(name),
            other => {
                return Err(Error::pattern_table(format!(
                    "pattern '{}' maps to {}, expected a string or null",
                    pattern, other
                )))
            }
        };
        pairs.push((pattern, section));
    }
    Ok(pairs)
}

fn print_preview(output: &std::path::Path, count: usize) -> Result<()> {
    println!("\nPreview of first {} output records:\n", count);
    let file = std::fs::File::open(output)
        .map_err(|e| Error::io(format!("Failed to reopen {}", output.display()), e))?;
    for line in BufReader::new(file).lines().take(count) {
        println!("{}", line?);
    }
    Ok(())
}

fn print_summary(result: &crate::app::services::batch_processor::BatchResult, output: &std::path::Path) {
    println!("\n{} Wrote: {}", "Done.".green().bold(), output.display());
    println!(
        "Files: {} processed, {} failed",
        result.successful_files.to_string().green(),
        if result.failed_files > 0 {
            result.failed_files.to_string().red()
        } else {
            result.failed_files.to_string().normal()
        }
    );
    println!("Records: {}", result.total_records);
    if result.sections_skipped > 0 {
        println!("Empty sections skipped: {}", result.sections_skipped);
    }

    let mut section_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &result.records {
        *section_counts.entry(record.section()).or_insert(0) += 1;
    }
    if !section_counts.is_empty() {
        println!("Records per section:");
        for (section, count) in section_counts {
            println!("  {}: {}", section, count);
        }
    }

    if !result.validation_issues.is_empty() {
        println!("{}", "Validation issues:".yellow());
        for (issue, count) in &result.validation_issues {
            println!("  {}: {}", issue, count);
        }
    }

    if !result.file_errors.is_empty() {
        println!("{}", "Failed files:".red());
        for (path, message) in &result.file_errors {
            println!("  {}: {}", path, message);
        }
    }
}
