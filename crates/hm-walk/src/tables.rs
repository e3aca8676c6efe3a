use std::collections::{BTreeSet, HashMap};

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{EdgeId, Gamma, HyperEdge, NodeId};
use tracing::debug;

/// γ_e(v): exact lookup of the edge-dependent weight of a vertex.
#[derive(Debug, Clone, Default)]
pub struct GammaTable {
    values: HashMap<(EdgeId, NodeId), f64>,
}

impl GammaTable {
    /// Indexes the provided weights.
    pub fn new(weights: &[Gamma]) -> Self {
        let values = weights
            .iter()
            .map(|weight| ((weight.edge, weight.node), weight.gamma))
            .collect();
        debug!(entries = weights.len(), "gamma table ready");
        Self { values }
    }

    /// Returns γ_edge(node), failing when the pair has no weight.
    pub fn get(&self, edge: EdgeId, node: NodeId) -> Result<f64, HmError> {
        self.values.get(&(edge, node)).copied().ok_or_else(|| {
            missing_weight(edge)
                .with_context("node", node)
                .with_hint("supply a weight for every (edge, member) pair")
        })
    }

    /// Number of indexed (edge, node) pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no weight is indexed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// δ(e) = Σ_{v∈e} γ_e(v): total weight mass of each hyperedge.
#[derive(Debug, Clone, Default)]
pub struct DeltaTable {
    totals: HashMap<EdgeId, f64>,
}

impl DeltaTable {
    /// Sums the provided weights per hyperedge in a single pass.
    pub fn new(weights: &[Gamma]) -> Self {
        let mut totals: HashMap<EdgeId, f64> = HashMap::new();
        for weight in weights {
            *totals.entry(weight.edge).or_insert(0.0) += weight.gamma;
        }
        debug!(edges = totals.len(), "delta table ready");
        Self { totals }
    }

    /// Returns δ(edge), failing when the hyperedge has no weights at all.
    pub fn get(&self, edge: EdgeId) -> Result<f64, HmError> {
        self.totals
            .get(&edge)
            .copied()
            .ok_or_else(|| missing_weight(edge))
    }
}

/// E(v): the set of hyperedges incident to each vertex.
#[derive(Debug, Clone, Default)]
pub struct Incidence {
    edges: HashMap<NodeId, BTreeSet<EdgeId>>,
}

impl Incidence {
    /// Builds the incidence index in a single pass over the hyperedges.
    pub fn new(edges: &[HyperEdge]) -> Self {
        let mut index: HashMap<NodeId, BTreeSet<EdgeId>> = HashMap::new();
        for edge in edges {
            for node in &edge.nodes {
                index.entry(*node).or_default().insert(edge.id);
            }
        }
        debug!(nodes = index.len(), "incidence index ready");
        Self { edges: index }
    }

    /// E(v). Empty for vertices that no hyperedge contains.
    pub fn edges_of(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.get(&node).into_iter().flatten().copied()
    }

    /// E(u, v): hyperedges containing both vertices, in id order.
    pub fn shared(&self, u: NodeId, v: NodeId) -> Vec<EdgeId> {
        match (self.edges.get(&u), self.edges.get(&v)) {
            (Some(a), Some(b)) => a.intersection(b).copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Number of hyperedges incident to `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.edges.get(&node).map(BTreeSet::len).unwrap_or(0)
    }
}

/// d(v) = Σ_{e∋v} ω(e): total ω mass incident to each vertex.
#[derive(Debug, Clone, Default)]
pub struct Strength {
    values: HashMap<NodeId, f64>,
}

impl Strength {
    /// Accumulates ω over every (edge, member) pair.
    pub fn new(edges: &[HyperEdge]) -> Self {
        let mut values: HashMap<NodeId, f64> = HashMap::new();
        for edge in edges {
            for node in &edge.nodes {
                *values.entry(*node).or_insert(0.0) += edge.omega;
            }
        }
        debug!(nodes = values.len(), "strength table ready");
        Self { values }
    }

    /// d(node); zero for vertices outside every hyperedge.
    pub fn get(&self, node: NodeId) -> f64 {
        self.values.get(&node).copied().unwrap_or(0.0)
    }
}

fn missing_weight(edge: EdgeId) -> HmError {
    HmError::Transition(ErrorInfo::new(
        "missing-weight",
        "no edge-dependent weight for the requested pair",
    ))
    .with_context("edge", edge)
}
