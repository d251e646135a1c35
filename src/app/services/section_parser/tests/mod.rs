//! Test utilities and sample statements for section parser testing
//!
//! This module provides statement builders and helper functions shared
//! across the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::services::section_parser::stats::ParseResult;
use crate::app::services::section_parser::SectionParser;
use crate::config::ParseOptions;


/// Combined title+header row for a Filled Orders section
pub const FILLED_HEADER: &str =
    ",,Exec Time,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,Price,Net Price,Price Improvement,Order Type";

/// Header row for a Canceled Orders section
pub const CANCELED_HEADER: &str =
    "Notes,,Time Canceled,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,PRICE,,TIF,Status";

/// Header row for a Working Orders section
pub const WORKING_HEADER: &str =
    "Notes,,Time Placed,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,PRICE,,TIF,Mark,Status";

/// Helper to build a statement with a single filled-orders section
pub fn create_filled_statement() -> String {
    format!(
        "Today's Trade Activity for account 1234\n\
         \n\
         Filled Orders\n\
         {FILLED_HEADER}\n\
         ,,10/24/25 09:51:38,STOCK,SELL,-75,TO CLOSE,NEUP,,,STOCK,8.30,8.30,-,MKT\n\
         ,,10/24/25 09:38:00,STOCK,BUY,+75,TO OPEN,NEUP,,,STOCK,8.21,8.21,-,MKT\n"
    )
}

/// Helper to build a statement exercising every default section
pub fn create_multi_section_statement() -> String {
    format!(
        "Today's Trade Activity for account 1234\n\
         \n\
         Working Orders\n\
         {WORKING_HEADER}\n\
         ,,10/27/25 08:12:00,STOCK,BUY,+100,TO OPEN,ACME,,,STOCK,12.50,LMT,DAY,12.40,WORKING\n\
         \n\
         Filled Orders\n\
         {FILLED_HEADER}\n\
         ,,10/24/25 09:51:38,STOCK,SELL,-75,TO CLOSE,NEUP,,,STOCK,8.30,8.30,-,MKT\n\
         \n\
         Canceled Orders\n\
         {CANCELED_HEADER}\n\
         ,,10/24/25 09:51:36,STOCK,SELL,-75,TO CLOSE,NEUP,,,STOCK,8.51,LMT,DAY,CANCELED\n\
         ,,10/24/25 09:50:58,STOCK,BUY,+25,TO OPEN,NEUP,,,STOCK,~,MKT,DAY,CANCELED\n"
    )
}

/// Helper to parse content with the given options
pub fn parse(content: &str, options: ParseOptions) -> ParseResult {
    SectionParser::new(options)
        .parse_str(content, "test")
        .expect("sample statement parses")
}

/// Helper to parse content with default options
pub fn parse_default(content: &str) -> ParseResult {
    parse(content, ParseOptions::default())
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
