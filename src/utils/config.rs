//! Configuration and constants for the library and CLI.
//!
//! Settings come from three layers: built-in defaults, an optional TOML
//! file, and CLI flags (highest priority).

use super::error::ConfigError;
use crate::aggregator::DiagramKind;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Package depth used when nothing else is configured
pub const DEFAULT_PACKAGE_DEPTH: usize = 2;

/// Deepest package depth the depth selector offers
pub const MAX_PACKAGE_DEPTH: usize = 10;

/// Chord diagrams keep at most this many edges
pub const MAX_CHORD_EDGES: usize = 500;

/// Upper bound accepted for a configured edge cap
pub const MAX_CONFIGURABLE_EDGES: usize = 10_000;

/// Name of the sentinel root node of every graph
pub const ROOT_NODE_NAME: &str = "root";

/// Settings loaded from a TOML config file
///
/// Every field is optional so a file can override just what it names.
///
/// ```toml
/// levels = 3
/// max_edges = 200
/// kind = "EDGE_BUNDLING"
/// skip_malformed = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub levels: Option<usize>,
    pub max_edges: Option<usize>,
    pub kind: Option<DiagramKind>,
    pub skip_malformed: Option<bool>,
}

impl FileConfig {
    /// Check values against the accepted ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(levels) = self.levels {
            if levels > MAX_PACKAGE_DEPTH {
                return Err(ConfigError::InvalidValue(format!(
                    "levels must be at most {}, got {}",
                    MAX_PACKAGE_DEPTH, levels
                )));
            }
        }

        if let Some(max_edges) = self.max_edges {
            if max_edges == 0 || max_edges > MAX_CONFIGURABLE_EDGES {
                return Err(ConfigError::InvalidValue(format!(
                    "max_edges must be within 1..={}, got {}",
                    MAX_CONFIGURABLE_EDGES, max_edges
                )));
            }
        }

        Ok(())
    }
}

/// Load settings from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidValue` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<FileConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "levels = 3").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.levels, Some(3));
        assert_eq!(config.max_edges, None);
        assert_eq!(config.kind, None);
    }

    #[test]
    fn test_load_config_full() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "levels = 1\nmax_edges = 50\nkind = \"EDGE_BUNDLING\"\nskip_malformed = true"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.max_edges, Some(50));
        assert_eq!(config.kind, Some(DiagramKind::EdgeBundling));
        assert_eq!(config.skip_malformed, Some(true));
    }

    #[test]
    fn test_load_config_rejects_unknown_key() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "depth = 3").unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_load_config_out_of_range() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "levels = 42").unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
