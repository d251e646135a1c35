//! Command implementations for the statement processor CLI
//!
//! Each subcommand lives in its own module. Commands return the crate
//! `Result`; the binary maps errors to exit codes.

pub mod convert;
pub mod diagnose;

use crate::cli::args::{Args, Commands};
use crate::Result;

/// Dispatch to the appropriate subcommand handler
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Convert(convert_args)) => convert::run_convert(convert_args),
        Some(Commands::Diagnose(diagnose_args)) => diagnose::run_diagnose(diagnose_args),
        None => Ok(()),
    }
}
