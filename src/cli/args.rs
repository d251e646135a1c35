//! Command-line argument definitions for the statement processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the brokerage statement processor
///
/// Converts sectioned trade-activity CSV exports into flat NDJSON or JSON
/// records with a unified schema across all sections.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "statement-processor",
    version,
    about = "Flatten sectioned brokerage trade-activity CSV exports into canonical NDJSON records",
    long_about = "A tool that converts brokerage statement CSV exports into flat NDJSON or JSON \
                  records. Statement files interleave several sections (filled orders, canceled \
                  orders, working orders) with differing column layouts; the processor detects \
                  section boundaries and column headers from row content, normalizes quantities, \
                  prices and dates, and emits one canonical record per row with full provenance."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

/// Available subcommands for the statement processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert statement CSV files to flat NDJSON/JSON (main command)
    Convert(ConvertArgs),
    /// Inspect a converted output file for validation issues
    Diagnose(DiagnoseArgs),
}

/// Arguments for the convert command (main data processing)
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input statement CSV files or glob patterns
    ///
    /// Files are processed in the order given; glob patterns expand to
    /// their matches sorted by path.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Destination path for the converted records
    ///
    /// Defaults to output.ndjson in the current directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Destination path for converted records"
    )]
    pub output: Option<PathBuf>,

    /// Write a single JSON array instead of newline-delimited JSON
    #[arg(long = "output-json", help = "Write a single JSON array instead of NDJSON")]
    pub output_json: bool,

    /// Pretty-print JSON output (array mode only)
    #[arg(long = "pretty", help = "Pretty-print JSON (only applies to array mode)")]
    pub pretty: bool,

    /// Print a preview of the first N output records after conversion
    #[arg(
        long = "preview",
        value_name = "N",
        default_value_t = 0,
        help = "Print preview of first N output records after conversion"
    )]
    pub preview: usize,

    /// Only process the first N rows of each file (0 = all)
    #[arg(
        long = "max-rows",
        value_name = "N",
        help = "Only process the first N rows of each file"
    )]
    pub max_rows: Option<usize>,

    /// Report quantities as absolute values instead of signed
    #[arg(long = "qty-unsigned", help = "Report quantities as absolute values")]
    pub qty_unsigned: bool,

    /// Include the Rolling Strategies section, excluded by default
    #[arg(long = "include-rolling", help = "Include the Rolling Strategies section")]
    pub include_rolling: bool,

    /// Emit markers for sections that contain no data rows
    ///
    /// By default, a section whose boundary and header rows are followed by
    /// no data rows contributes nothing to the output.
    #[arg(
        long = "keep-empty-sections",
        help = "Emit markers for sections with no data rows"
    )]
    pub keep_empty_sections: bool,

    /// Regroup output by section and sort within each section by timestamp
    #[arg(
        long = "group-sections",
        help = "Regroup output by section, sorted by best-available timestamp"
    )]
    pub group_sections: bool,

    /// Keep rows whose status begins with TRIGGERED or REJECTED
    #[arg(
        long = "no-status-filter",
        help = "Keep rows whose status begins with TRIGGERED or REJECTED"
    )]
    pub no_status_filter: bool,

    /// JSON file mapping regex to section name, replacing the defaults
    ///
    /// The file holds one JSON object; keys are content patterns tried in
    /// order, values are section names or null for "recognized but
    /// ignored". The supplied table wholly replaces the default patterns.
    #[arg(
        long = "section-patterns-file",
        value_name = "FILE",
        help = "JSON file of regex-to-section patterns replacing the defaults"
    )]
    pub section_patterns_file: Option<PathBuf>,

    /// Allow the output path to overwrite an input file
    #[arg(long = "force", help = "Allow the output path to overwrite an input file")]
    pub force: bool,
}

/// Arguments for the diagnose command
#[derive(Debug, Clone, Parser)]
pub struct DiagnoseArgs {
    /// Converted NDJSON file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Only show records with these issue types
    #[arg(
        short = 't',
        long = "issue-type",
        value_name = "TYPE",
        help = "Filter by specific issue type(s)"
    )]
    pub issue_types: Vec<String>,

    /// Show every field of each problem record
    #[arg(
        short = 'a',
        long = "show-all-fields",
        help = "Show all fields instead of the relevant subset"
    )]
    pub show_all_fields: bool,
}
