//! JSON output writer and event file reader.
//!
//! Diagrams are written inside a small envelope that records the schema
//! version and the generation time.

use super::validate_path;
use crate::aggregator::Diagram;
use crate::parser::{parse_batch, EventBatch};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Top-level structure written to JSON
#[derive(Debug, Serialize)]
pub struct DiagramDocument<'a> {
    /// Schema version for compatibility checking
    pub version: &'static str,

    /// Timestamp when the document was generated
    pub generated_at: String,

    /// The diagram itself
    pub diagram: &'a Diagram,
}

impl<'a> DiagramDocument<'a> {
    pub fn new(diagram: &'a Diagram) -> Self {
        Self {
            version: SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            diagram,
        }
    }
}

/// Write a diagram to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_diagram(diagram: &Diagram, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} diagram to: {}", diagram.kind(), output_path.display());

    validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &DiagramDocument::new(diagram))
        .map_err(OutputError::SerializationFailed)?;

    info!(
        "Diagram written successfully ({} bytes)",
        std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0)
    );

    Ok(())
}

/// Serialize a diagram document to a string
pub fn diagram_to_string(diagram: &Diagram) -> Result<String, OutputError> {
    serde_json::to_string_pretty(&DiagramDocument::new(diagram))
        .map_err(OutputError::SerializationFailed)
}

/// Read an event batch from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - File is not JSON
/// * `OutputError::Parse` - JSON is not an event batch
pub fn read_events(input_path: impl AsRef<Path>) -> Result<EventBatch, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading events from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    let batch = parse_batch(&value)?;
    debug!("Loaded {} events", batch.events.len());

    Ok(batch)
}
