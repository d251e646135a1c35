//! Statement Processor Library
//!
//! A Rust library for flattening brokerage trade-activity CSV exports into a
//! canonical, typed record stream suitable for downstream storage or analysis.
//!
//! Brokerage statement exports interleave several logically distinct sections
//! (filled orders, canceled orders, working orders, rolling strategies) inside
//! one physical CSV file, with no schema contract between sections and ragged
//! column layouts across statement variants. This library provides tools for:
//! - Detecting section boundaries and column headers from row content alone
//! - Resolving header cells to canonical field slots via alias matching
//! - Classifying rows into data / amendment / header / noise roles
//! - Normalizing quantities, prices, dates, and option expiries
//! - Suppressing sections that contain no data rows
//! - Merging multiple files with provenance tagging and per-section ordering
//! - Counting structural-completeness issues across a record stream

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_processor;
        pub mod ndjson_writer;
        pub mod section_parser;
        pub mod validator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{AmendmentRecord, OrderRecord, Record};
pub use app::services::batch_processor::{BatchProcessor, BatchResult};
pub use app::services::section_parser::SectionParser;
pub use config::{BatchOptions, ParseOptions};

/// Result type alias for the statement processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for statement processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Section pattern table error (bad override regex, malformed table file)
    #[error("Section pattern error: {message}")]
    PatternTable { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Output serialization or write error
    #[error("Output write error: {message}")]
    OutputWrite {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message_str = message.into();
        Self::Io {
            message: message_str.clone(),
            source: std::io::Error::new(std::io::ErrorKind::Other, message_str),
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a section pattern table error
    pub fn pattern_table(message: impl Into<String>) -> Self {
        Self::PatternTable {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an output write error
    pub fn output_write(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::OutputWrite {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::OutputWrite {
            message: "JSON serialization failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::PatternTable {
            message: format!("invalid pattern: {}", error),
        }
    }
}
