//! Output writers for diagram data.
//!
//! This module handles:
//! - Reading event batch files
//! - Writing diagrams as JSON
//! - Text summaries for the terminal

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{diagram_to_string, read_events, write_diagram, DiagramDocument};
pub use text::generate_text_summary;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
