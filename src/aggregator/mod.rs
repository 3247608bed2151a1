//! Aggregation of decoded stacks into diagram structures.
//!
//! This module transforms decoded stacks into:
//! - A weighted package edge list (chord diagrams)
//! - A package node graph with callee/caller links (edge-bundling diagrams)
//! - A laid-out hierarchy with bilinks between its leaves

pub mod bilink;
pub mod diagram;
pub mod graph_builder;
pub mod matrix;
pub mod package;

// Re-export main types and functions
pub use bilink::{bilink, Hierarchy, HierarchyId, HierarchyNode, Link};
pub use diagram::{
    build_diagram, build_diagram_from_json, BundlingDiagram, ChordDiagram, Diagram, DiagramKind,
    DiagramOptions, NamedLink,
};
pub use graph_builder::{build_graph, Graph, GraphBuilder, GraphNode, NodeId, TreeNode};
pub use matrix::{build_edge_matrix, count_edges, Edge, EdgeMatrix};
pub use package::{lineage, truncate};
