//! Section parser for multi-section brokerage statement exports
//!
//! Statement CSVs interleave several logically distinct sections in one
//! physical file, with no out-of-band schema: structure must be inferred
//! from row content alone. The parser is organized into focused components:
//!
//! - [`patterns`] - section boundary recognition from joined row text
//! - [`column_map`] - header-cell alias resolution to canonical fields
//! - [`classifier`] - per-row structural role assignment
//! - [`field_parsers`] - quantity/price/date/expiry normalization
//! - [`record_parser`] - canonical record construction and tag derivation
//! - [`section_buffer`] - deferred marker emission for empty-section skipping
//! - [`parser`] - single-pass scan orchestration
//! - [`stats`] - scan statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use statement_processor::app::services::section_parser::SectionParser;
//! use statement_processor::config::ParseOptions;
//!
//! # fn example() -> statement_processor::Result<()> {
//! let parser = SectionParser::new(ParseOptions::default());
//! let result = parser.parse_file(std::path::Path::new("statement.csv"))?;
//!
//! println!(
//!     "Parsed {} records from {} rows",
//!     result.stats.records_parsed, result.stats.rows_scanned
//! );
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod column_map;
pub mod field_parsers;
pub mod patterns;
pub mod record_parser;
pub mod section_buffer;
pub mod stats;

pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_map::ColumnMap;
pub use parser::SectionParser;
pub use patterns::{SectionMatch, SectionPatterns};
pub use section_buffer::SectionBuffer;
pub use stats::{ParseResult, ParseStats};
