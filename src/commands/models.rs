use crate::aggregator::DiagramKind;
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
///
/// `None` fields fall back to the config file, then to built-in defaults.
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Path to the event batch JSON
    pub input: PathBuf,

    /// Output path for the diagram JSON (stdout if omitted)
    pub output: Option<PathBuf>,

    /// Package depth to truncate to
    pub levels: Option<usize>,

    /// Diagram to build
    pub kind: Option<DiagramKind>,

    /// Maximum number of chord edges
    pub max_edges: Option<usize>,

    /// Drop events with malformed frames instead of failing
    pub skip_malformed: bool,

    /// Optional TOML config file
    pub config: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Rows in the text summary
    pub summary_rows: usize,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("events.json"),
            output: None,
            levels: None,
            kind: None,
            max_edges: None,
            skip_malformed: false,
            config: None,
            print_summary: false,
            summary_rows: 10,
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Default)]
pub struct InspectArgs {
    /// Path to the event batch JSON
    pub input: PathBuf,
}
