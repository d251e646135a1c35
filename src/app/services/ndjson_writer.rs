//! NDJSON and JSON-array output for record streams
//!
//! Records serialize to the unified flat schema, one object per record.
//! NDJSON is the default wire format; a single JSON array (optionally
//! pretty-printed) is available for consumers that want one document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::app::models::Record;
use crate::{Error, Result};

/// Output layout for the converted record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Newline-delimited JSON, one object per line
    Ndjson,
    /// One JSON array containing every record
    JsonArray,
}

/// Write records as newline-delimited JSON
pub fn write_ndjson<W: Write>(records: &[Record], writer: &mut W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, &record.to_flat_json())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Write records as a single JSON array
pub fn write_json_array<W: Write>(records: &[Record], writer: &mut W, pretty: bool) -> Result<()> {
    let values: Vec<serde_json::Value> = records.iter().map(Record::to_flat_json).collect();
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &values)?;
    } else {
        serde_json::to_writer(&mut *writer, &values)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write records to a file in the requested format
pub fn write_to_path(
    records: &[Record],
    path: &Path,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create output file {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Ndjson => write_ndjson(records, &mut writer)?,
        OutputFormat::JsonArray => write_json_array(records, &mut writer, pretty)?,
    }

    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush output file {}", path.display()), e))?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
