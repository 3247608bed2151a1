//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding stack frames
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Frame has no '#' method separator: {frame}")]
    MissingMethodSeparator { frame: String },

    #[error("Frame has no package qualifier (default package): {frame}")]
    DefaultPackage { frame: String },

    #[error("Event {index}: {source}")]
    InEvent {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// The raw frame descriptor that failed to decode
    pub fn frame(&self) -> &str {
        match self {
            DecodeError::MissingMethodSeparator { frame } => frame,
            DecodeError::DefaultPackage { frame } => frame,
            DecodeError::InEvent { source, .. } => source.frame(),
        }
    }
}

/// Errors that can occur during event payload parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid event payload: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during file input/output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to parse events: {0}")]
    Parse(#[from] ParseError),
}

/// Errors that can occur while loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Errors that can occur while building a diagram from a raw payload
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
