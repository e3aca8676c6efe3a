use std::collections::BTreeSet;

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{Gamma, HyperEdge, HyperGraph, Node};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shape of a randomly generated hypergraph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    /// Number of nodes, ids `1..=nodes`.
    pub nodes: usize,
    /// Number of hyperedges, ids `1..=edges`.
    pub edges: usize,
    /// Upper bound on hyperedge size; every hyperedge has at least two members.
    pub max_edge_size: usize,
    /// Draw γ from `[0.5, 2.0)` instead of using unit weights.
    pub weighted: bool,
}

impl Default for GeneratorSpec {
    fn default() -> Self {
        Self {
            nodes: 12,
            edges: 6,
            max_edge_size: 4,
            weighted: true,
        }
    }
}

/// Generates a hypergraph with non-simple hyperedges and complete weights.
///
/// ω is drawn from `[1, 10)`. Nodes left unreferenced by every hyperedge are
/// kept; callers that need a connected input should preprocess the result.
pub fn gen_random_hypergraph<R: Rng + ?Sized>(
    spec: &GeneratorSpec,
    rng: &mut R,
) -> Result<HyperGraph, HmError> {
    if spec.nodes < 2 {
        return Err(HmError::Graph(
            ErrorInfo::new(
                "empty-hypergraph",
                "random generator requires at least two nodes",
            )
            .with_context("nodes", spec.nodes.to_string()),
        ));
    }
    let max_size = spec.max_edge_size.clamp(2, spec.nodes);
    let ids: Vec<u64> = (1..=spec.nodes as u64).collect();
    let nodes: Vec<Node> = ids
        .iter()
        .map(|id| Node::new(*id, format!("v{id}")))
        .collect();

    let mut edges = Vec::with_capacity(spec.edges);
    let mut weights = Vec::new();
    for edge_id in 1..=spec.edges as u64 {
        let size = rng.gen_range(2..=max_size);
        let members: BTreeSet<u64> = ids.choose_multiple(rng, size).copied().collect();
        let omega = rng.gen_range(1.0..10.0);
        for member in &members {
            let gamma = if spec.weighted {
                rng.gen_range(0.5..2.0)
            } else {
                1.0
            };
            weights.push(Gamma::new(edge_id, *member, gamma));
        }
        edges.push(HyperEdge::new(edge_id, members, omega));
    }

    HyperGraph::new(nodes, edges, weights)
}
