//! depview
//!
//! Package dependency diagrams from profiling-event stack traces.
//!
//! An event batch goes through three steps:
//! - [`parser`] decodes every frame descriptor into package/class/method
//! - [`aggregator`] folds the decoded stacks into a chord edge list or an
//!   edge-bundling graph, truncated to a package depth
//! - [`output`] writes the result as JSON for the renderer
//!
//! ```
//! use depview::aggregator::{build_diagram_from_json, Diagram, DiagramOptions};
//!
//! let payload = serde_json::json!({ "events": [] });
//! let diagram = build_diagram_from_json(&payload, &DiagramOptions::default()).unwrap();
//! assert!(matches!(diagram, Diagram::Chord(_)));
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
