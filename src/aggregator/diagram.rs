//! One-call pipeline from an event batch to a renderer-ready diagram.

use super::bilink::{bilink, Hierarchy};
use super::graph_builder::{build_graph, Graph, TreeNode};
use super::matrix::{build_edge_matrix, Edge};
use crate::parser::{normalize_batch, parse_batch, DecodePolicy, EventBatch};
use crate::utils::config::{DEFAULT_PACKAGE_DEPTH, MAX_CHORD_EDGES};
use crate::utils::error::{DecodeError, DiagramError};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diagram the renderer asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagramKind {
    #[default]
    Chord,
    EdgeBundling,
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramKind::Chord => write!(f, "CHORD"),
            DiagramKind::EdgeBundling => write!(f, "EDGE_BUNDLING"),
        }
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "chord" => Ok(DiagramKind::Chord),
            "edge-bundling" | "bundling" => Ok(DiagramKind::EdgeBundling),
            other => Err(format!(
                "unknown diagram kind '{}' (expected chord or edge-bundling)",
                other
            )),
        }
    }
}

/// Parameters of one transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    pub levels: usize,
    pub kind: DiagramKind,
    pub max_edges: usize,
    pub policy: DecodePolicy,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            levels: DEFAULT_PACKAGE_DEPTH,
            kind: DiagramKind::default(),
            max_edges: MAX_CHORD_EDGES,
            policy: DecodePolicy::default(),
        }
    }
}

impl DiagramOptions {
    pub fn new(levels: usize, kind: DiagramKind) -> Self {
        Self {
            levels,
            kind,
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_edges(mut self, max_edges: usize) -> Self {
        self.max_edges = max_edges;
        self
    }
}

/// Chord diagram data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordDiagram {
    pub levels: usize,
    pub edges: Vec<Edge>,
    pub pairs_seen: u64,
    pub distinct_pairs: usize,
}

/// A bilink between two leaves, by package name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLink {
    pub source: String,
    pub target: String,
}

/// Edge-bundling diagram data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundlingDiagram {
    pub levels: usize,
    pub root: TreeNode,
    pub links: Vec<NamedLink>,
    #[serde(skip)]
    pub graph: Graph,
    #[serde(skip)]
    pub hierarchy: Hierarchy,
}

/// Either diagram, tagged by `kind` when serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Diagram {
    Chord(ChordDiagram),
    EdgeBundling(BundlingDiagram),
}

impl Diagram {
    pub fn kind(&self) -> DiagramKind {
        match self {
            Diagram::Chord(_) => DiagramKind::Chord,
            Diagram::EdgeBundling(_) => DiagramKind::EdgeBundling,
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        match self {
            Diagram::Chord(chord) => format!(
                "Chord | Levels: {} | Edges: {} of {} | Calls: {}",
                chord.levels,
                chord.edges.len(),
                chord.distinct_pairs,
                chord.pairs_seen
            ),
            Diagram::EdgeBundling(bundling) => format!(
                "Edge bundling | Levels: {} | Nodes: {} | Leaves: {} | Links: {}",
                bundling.levels,
                bundling.graph.len() - 1,
                bundling.hierarchy.leaves().len(),
                bundling.links.len()
            ),
        }
    }
}

/// Run the full pipeline on a parsed batch
///
/// **Public** - main entry point for diagram building
///
/// # Errors
/// * `DecodeError::InEvent` - a malformed frame under the strict policy
pub fn build_diagram(batch: &EventBatch, options: &DiagramOptions) -> Result<Diagram, DecodeError> {
    info!(
        "Building {} diagram from {} events (levels={})",
        options.kind,
        batch.events.len(),
        options.levels
    );

    let stacks = normalize_batch(batch, options.policy)?;

    let diagram = match options.kind {
        DiagramKind::Chord => {
            let matrix = build_edge_matrix(&stacks, options.levels, options.max_edges);
            Diagram::Chord(ChordDiagram {
                levels: options.levels,
                edges: matrix.edges,
                pairs_seen: matrix.pairs_seen,
                distinct_pairs: matrix.distinct_pairs,
            })
        }
        DiagramKind::EdgeBundling => {
            let graph = build_graph(&stacks, options.levels);
            let mut hierarchy = Hierarchy::from_graph(&graph);
            bilink(&mut hierarchy);

            let links = hierarchy
                .links()
                .into_iter()
                .map(|link| NamedLink {
                    source: hierarchy.node(link.source).name.clone(),
                    target: hierarchy.node(link.target).name.clone(),
                })
                .collect();

            Diagram::EdgeBundling(BundlingDiagram {
                levels: options.levels,
                root: graph.to_tree(),
                links,
                graph,
                hierarchy,
            })
        }
    };

    info!("{}", diagram.summary());
    Ok(diagram)
}

/// Run the full pipeline on a raw JSON payload
///
/// # Errors
/// * `DiagramError::Parse` - payload is not an event batch
/// * `DiagramError::Decode` - a malformed frame under the strict policy
pub fn build_diagram_from_json(
    payload: &serde_json::Value,
    options: &DiagramOptions,
) -> Result<Diagram, DiagramError> {
    let batch = parse_batch(payload)?;
    Ok(build_diagram(&batch, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagram_kind_parse() {
        assert_eq!("chord".parse::<DiagramKind>().unwrap(), DiagramKind::Chord);
        assert_eq!("CHORD".parse::<DiagramKind>().unwrap(), DiagramKind::Chord);
        assert_eq!(
            "EDGE_BUNDLING".parse::<DiagramKind>().unwrap(),
            DiagramKind::EdgeBundling
        );
        assert_eq!(
            "edge-bundling".parse::<DiagramKind>().unwrap(),
            DiagramKind::EdgeBundling
        );
        assert!("pie".parse::<DiagramKind>().is_err());
    }

    #[test]
    fn test_diagram_kind_display_roundtrips() {
        for kind in [DiagramKind::Chord, DiagramKind::EdgeBundling] {
            assert_eq!(kind.to_string().parse::<DiagramKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_empty_batch() {
        let batch = EventBatch::default();

        let chord = build_diagram(&batch, &DiagramOptions::default()).unwrap();
        match chord {
            Diagram::Chord(c) => assert!(c.edges.is_empty()),
            _ => panic!("expected chord"),
        }

        let options = DiagramOptions::new(2, DiagramKind::EdgeBundling);
        match build_diagram(&batch, &options).unwrap() {
            Diagram::EdgeBundling(b) => {
                assert_eq!(b.root.name, "root");
                assert!(b.root.children.is_empty());
                assert!(b.links.is_empty());
            }
            _ => panic!("expected edge bundling"),
        }
    }

    #[test]
    fn test_serialized_kind_tag() {
        let payload = json!({ "events": [] });
        let diagram = build_diagram_from_json(&payload, &DiagramOptions::default()).unwrap();
        let value = serde_json::to_value(&diagram).unwrap();

        assert_eq!(value["kind"], "CHORD");
        assert_eq!(value["edges"], json!([]));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let result = build_diagram_from_json(&json!("nope"), &DiagramOptions::default());
        assert!(matches!(result, Err(DiagramError::Parse(_))));
    }
}
