//! Test utilities for batch processor testing

use std::path::PathBuf;

use tempfile::TempDir;

// Test modules
mod merge_tests;

/// Combined title+header row for a Filled Orders section
pub const FILLED_HEADER: &str =
    ",,Exec Time,Spread,Side,Qty,Pos Effect,Symbol,Exp,Strike,Type,Price,Net Price,Price Improvement,Order Type";

/// Write a one-section statement with a single filled data row
pub fn write_statement(dir: &TempDir, name: &str, exec_time: &str, symbol: &str) -> PathBuf {
    let content = format!(
        "Filled Orders\n\
         {FILLED_HEADER}\n\
         ,,{exec_time},STOCK,SELL,-75,TO CLOSE,{symbol},,,STOCK,8.30,8.30,-,MKT\n"
    );
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}
