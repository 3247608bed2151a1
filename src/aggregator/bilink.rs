//! Laid-out hierarchy and bilinks for edge-bundling diagrams.
//!
//! The renderer lays the graph out as a strict tree and draws one bundled
//! curve per link between leaves. Each laid-out node carries the names of
//! the packages its graph node links to. `bilink` resolves those names
//! against the leaves and records every link on both of its endpoints so
//! hover highlighting can walk either direction.

use super::graph_builder::{Graph, NodeId};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Index of a node inside one hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HierarchyId(usize);

impl HierarchyId {
    pub const ROOT: HierarchyId = HierarchyId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A link between two hierarchy leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub source: HierarchyId,
    pub target: HierarchyId,
}

/// One node of the laid-out hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub name: String,
    pub depth: usize,
    pub parent: Option<HierarchyId>,
    pub children: Vec<HierarchyId>,
    /// Graph node this entry was laid out from
    pub graph_node: NodeId,
    /// Names of the callers recorded on the graph node
    pub targets: Vec<String>,
    pub outgoing: Vec<Link>,
    pub incoming: Vec<Link>,
}

impl HierarchyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An owned, tree-shaped copy of a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Lay a graph out in pre-order, children in graph order
    pub fn from_graph(graph: &Graph) -> Self {
        let mut hierarchy = Self { nodes: Vec::with_capacity(graph.len()) };
        hierarchy.push_subtree(graph, NodeId::ROOT, None, 0);
        hierarchy
    }

    fn push_subtree(
        &mut self,
        graph: &Graph,
        node: NodeId,
        parent: Option<HierarchyId>,
        depth: usize,
    ) -> HierarchyId {
        let id = HierarchyId(self.nodes.len());
        let source = graph.node(node);
        self.nodes.push(HierarchyNode {
            name: source.name.clone(),
            depth,
            parent,
            children: Vec::new(),
            graph_node: node,
            targets: source
                .outgoing
                .iter()
                .map(|&target| graph.node(target).name.clone())
                .collect(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        });

        for &child in &source.children {
            let child_id = self.push_subtree(graph, child, Some(id), depth + 1);
            self.nodes[id.0].children.push(child_id);
        }

        id
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[HierarchyId::ROOT.0]
    }

    pub fn node(&self, id: HierarchyId) -> &HierarchyNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Childless nodes in pre-order
    pub fn leaves(&self) -> Vec<HierarchyId> {
        (0..self.nodes.len())
            .map(HierarchyId)
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }

    /// All outgoing links of all leaves, leaf by leaf
    pub fn links(&self) -> Vec<Link> {
        self.nodes
            .iter()
            .flat_map(|node| node.outgoing.iter().copied())
            .collect()
    }

    /// Ancestors of `id`, from `id` itself up to the root
    pub fn ancestors(&self, id: HierarchyId) -> Vec<HierarchyId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Tree path from `from` to `to` through their lowest common ancestor
    ///
    /// This is the control path a bundled curve follows.
    pub fn path(&self, from: HierarchyId, to: HierarchyId) -> Vec<HierarchyId> {
        let up = self.ancestors(from);
        let down = self.ancestors(to);

        let common = up
            .iter()
            .copied()
            .find(|id| down.contains(id))
            .unwrap_or(HierarchyId::ROOT);

        let mut path: Vec<HierarchyId> = up.into_iter().take_while(|&id| id != common).collect();
        path.push(common);

        let mut tail: Vec<HierarchyId> = down.into_iter().take_while(|&id| id != common).collect();
        tail.reverse();
        path.extend(tail);
        path
    }
}

/// Populate `outgoing`/`incoming` links on every leaf
///
/// **Public** - call after layout; calling it again rebuilds the same links
///
/// Targets that are not hierarchy leaves are dropped.
pub fn bilink(hierarchy: &mut Hierarchy) {
    let leaves = hierarchy.leaves();

    let by_name: HashMap<&str, HierarchyId> = leaves
        .iter()
        .map(|&id| (hierarchy.node(id).name.as_str(), id))
        .collect();

    let mut outgoing: Vec<(HierarchyId, Vec<Link>)> = Vec::with_capacity(leaves.len());
    let mut dropped = 0usize;

    for &leaf in &leaves {
        let node = hierarchy.node(leaf);
        let mut links = Vec::with_capacity(node.targets.len());

        for target in &node.targets {
            match by_name.get(target.as_str()) {
                Some(&target) => links.push(Link { source: leaf, target }),
                None => dropped += 1,
            }
        }

        outgoing.push((leaf, links));
    }

    for node in &mut hierarchy.nodes {
        node.outgoing.clear();
        node.incoming.clear();
    }

    for (leaf, links) in outgoing {
        for link in &links {
            hierarchy.nodes[link.target.0].incoming.push(*link);
        }
        hierarchy.nodes[leaf.0].outgoing = links;
    }

    debug!(
        "Bilinked {} leaves ({} links, {} dropped non-leaf targets)",
        leaves.len(),
        hierarchy.links().len(),
        dropped
    );
}
