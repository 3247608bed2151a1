//! Flat weighted edge list for chord diagrams.
//!
//! Every adjacent pair of frames contributes one call from the callee's
//! truncated package (source) to its caller's truncated package (target).
//! Self-loops are kept.

use crate::parser::DecodedStack;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// A weighted call edge between two truncated package names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub value: u64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: u64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Edge list plus the number of pairs it was folded from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMatrix {
    /// Kept edges, heaviest first
    pub edges: Vec<Edge>,

    /// Adjacent frame pairs seen across all stacks (before the cap)
    pub pairs_seen: u64,

    /// Distinct (source, target) pairs before the cap
    pub distinct_pairs: usize,
}

/// Count calls between truncated packages, unfiltered, in first-seen order
///
/// **Public** - the total of all values equals the number of adjacent
/// frame pairs in `stacks`
pub fn count_edges(stacks: &[DecodedStack], levels: usize) -> IndexMap<(String, String), u64> {
    let mut counts: IndexMap<(String, String), u64> = IndexMap::new();

    for stack in stacks {
        let frames = stack.caller_order();

        for i in (1..frames.len()).rev() {
            let source = super::package::truncate(&frames[i].package, levels);
            let target = super::package::truncate(&frames[i - 1].package, levels);
            *counts.entry((source, target)).or_insert(0) += 1;
        }
    }

    counts
}

/// Build the chord edge list
///
/// **Public** - main entry point for the chord view
///
/// # Arguments
/// * `stacks` - Decoded stacks, one per event
/// * `levels` - Package depth to truncate to
/// * `max_edges` - Keep at most this many edges (heaviest first)
///
/// # Returns
/// Edges sorted by descending value, ties in first-seen order
pub fn build_edge_matrix(stacks: &[DecodedStack], levels: usize, max_edges: usize) -> EdgeMatrix {
    debug!(
        "Building edge matrix from {} stacks (levels={}, max_edges={})",
        stacks.len(),
        levels,
        max_edges
    );

    let counts = count_edges(stacks, levels);
    let pairs_seen: u64 = counts.values().sum();
    let distinct_pairs = counts.len();

    let mut edges: Vec<Edge> = counts
        .into_iter()
        .map(|((source, target), value)| Edge {
            source,
            target,
            value,
        })
        .collect();

    // sort_by is stable, so equal values stay in first-seen order
    edges.sort_by(|a, b| b.value.cmp(&a.value));
    edges.truncate(max_edges);

    debug!(
        "Kept {} of {} distinct edges ({} calls)",
        edges.len(),
        distinct_pairs,
        pairs_seen
    );

    EdgeMatrix {
        edges,
        pairs_seen,
        distinct_pairs,
    }
}
