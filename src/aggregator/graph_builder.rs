//! Build the package call graph for edge-bundling diagrams.
//!
//! Nodes live in a flat arena and are identified by their truncated package
//! name: two frames that truncate to the same name resolve to the same node,
//! whatever call path they came from. Children and cross-links are stored as
//! `NodeId` lists.
//!
//! Cross-links point from callee to caller: a node's `outgoing` set holds the
//! packages that called into it, the caller's `incoming` set holds the callee.

use super::package::lineage;
use crate::parser::DecodedStack;
use crate::utils::config::ROOT_NODE_NAME;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Serialize};

/// Index of a node inside one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// The sentinel root of every graph
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Node under construction
#[derive(Debug)]
struct NodeBuilder {
    name: String,
    children: Vec<NodeId>,
    outgoing: IndexSet<NodeId>,
    incoming: IndexSet<NodeId>,
    leaf: bool,
}

impl NodeBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            outgoing: IndexSet::new(),
            incoming: IndexSet::new(),
            leaf: false,
        }
    }

    fn freeze(self) -> GraphNode {
        GraphNode {
            name: self.name,
            children: self.children,
            outgoing: self.outgoing.into_iter().collect(),
            incoming: self.incoming.into_iter().collect(),
            leaf: self.leaf,
        }
    }
}

/// Mutable graph state for one build
///
/// **Public** - feed stacks with `add_stack`, then `finish` to freeze
#[derive(Debug)]
pub struct GraphBuilder {
    levels: usize,
    nodes: Vec<NodeBuilder>,
    // the root is not indexed, so a package literally named "root" stays distinct
    index: IndexMap<String, NodeId>,
}

impl GraphBuilder {
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            nodes: vec![NodeBuilder::new(ROOT_NODE_NAME)],
            index: IndexMap::new(),
        }
    }

    /// Walk `lineage` from the root, creating missing nodes
    ///
    /// Returns the node for the last lineage entry, or `None` for an empty
    /// lineage. Calling it twice with the same lineage returns the same node.
    pub fn ensure_node(&mut self, lineage: &[String]) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for name in lineage {
            current = self.ensure_child(current, name);
        }
        (!lineage.is_empty()).then_some(current)
    }

    fn ensure_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = match self.index.get(name) {
            Some(&id) => id,
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(NodeBuilder::new(name));
                self.index.insert(name.to_string(), id);
                id
            }
        };

        let children = &mut self.nodes[parent.0].children;
        if !children.contains(&id) {
            children.push(id);
        }

        id
    }

    /// Fold one decoded stack into the graph
    pub fn add_stack(&mut self, stack: &DecodedStack) {
        let frames = stack.caller_order();
        let mut previous: Option<NodeId> = None;
        let mut current: Option<NodeId> = None;

        for frame in &frames {
            current = self.ensure_node(&lineage(&frame.package, self.levels));

            if let (Some(parent), Some(node)) = (previous, current) {
                if parent != node {
                    self.nodes[parent.0].incoming.insert(node);
                    self.nodes[node.0].outgoing.insert(parent);
                }
            }

            previous = current;
        }

        if let Some(leaf) = current {
            self.nodes[leaf.0].leaf = true;
        }
    }

    /// Freeze into an immutable graph
    pub fn finish(self) -> Graph {
        Graph {
            levels: self.levels,
            nodes: self.nodes.into_iter().map(NodeBuilder::freeze).collect(),
            index: self.index,
        }
    }
}

/// A frozen package node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub children: Vec<NodeId>,
    /// Callers of this package (first-seen order)
    pub outgoing: Vec<NodeId>,
    /// Callees of this package (first-seen order)
    pub incoming: Vec<NodeId>,
    /// Innermost frame of at least one stack
    pub leaf: bool,
}

/// Immutable package graph handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    levels: usize,
    nodes: Vec<GraphNode>,
    index: IndexMap<String, NodeId>,
}

impl Graph {
    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn root(&self) -> &GraphNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    /// Node id for a truncated package name
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&GraphNode> {
        self.id_of(name).map(|id| self.node(id))
    }

    /// All nodes in creation order, root first
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Nodes flagged as sampled stack termini
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes().filter(|(_, node)| node.leaf)
    }

    /// Number of distinct callee → caller links
    pub fn link_count(&self) -> usize {
        self.nodes.iter().map(|node| node.outgoing.len()).sum()
    }

    /// Nested, name-based view of the graph for serialization
    pub fn to_tree(&self) -> TreeNode {
        self.tree_at(NodeId::ROOT)
    }

    fn tree_at(&self, id: NodeId) -> TreeNode {
        let node = self.node(id);
        let names = |ids: &[NodeId]| -> Vec<String> {
            ids.iter().map(|&i| self.node(i).name.clone()).collect()
        };

        TreeNode {
            name: node.name.clone(),
            children: node.children.iter().map(|&child| self.tree_at(child)).collect(),
            outgoing: names(&node.outgoing),
            incoming: names(&node.incoming),
            leaf: node.leaf,
        }
    }
}

/// Serializable node of the nested graph view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(default)]
    pub outgoing: Vec<String>,
    #[serde(default)]
    pub incoming: Vec<String>,
    #[serde(default)]
    pub leaf: bool,
}

/// Build the package graph from decoded stacks
///
/// **Public** - main entry point for the edge-bundling view
pub fn build_graph(stacks: &[DecodedStack], levels: usize) -> Graph {
    debug!("Building graph from {} stacks (levels={})", stacks.len(), levels);

    let mut builder = GraphBuilder::new(levels);
    for stack in stacks {
        builder.add_stack(stack);
    }
    let graph = builder.finish();

    debug!(
        "Built graph with {} nodes and {} links",
        graph.len() - 1,
        graph.link_count()
    );

    graph
}
