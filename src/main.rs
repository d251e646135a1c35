use clap::Parser;
use statement_processor::cli::{args::Args, commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging; --verbose raises the filter to debug
    let default_filter = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => {
            // Success - the command has already reported its summary
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Statement Processor - Brokerage Trade Activity Converter");
    println!("========================================================");
    println!();
    println!("Flatten sectioned brokerage trade-activity CSV exports into");
    println!("canonical NDJSON or JSON records with a unified schema.");
    println!();
    println!("USAGE:");
    println!("    statement-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert statement CSV files to NDJSON/JSON (main command)");
    println!("    diagnose    Inspect a converted output file for validation issues");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert one statement to NDJSON:");
    println!("    statement-processor convert statement.csv -o trades.ndjson");
    println!();
    println!("    # Merge a month of statements, grouped by section:");
    println!("    statement-processor convert '2025-10-*.csv' --group-sections -o october.ndjson");
    println!();
    println!("    # Investigate validation issues in converted output:");
    println!("    statement-processor diagnose trades.ndjson -t unknown_asset_type");
    println!();
    println!("For detailed help on any command, use:");
    println!("    statement-processor <COMMAND> --help");
}
