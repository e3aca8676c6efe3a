use std::collections::HashMap;

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{EdgeId, Gamma, HyperEdge, HyperGraph, NodeId};

use crate::tables::{DeltaTable, GammaTable, Incidence, Strength};

/// Precomputed transition model of a hypergraph.
///
/// Holds the lookup tables once and answers probability queries from them.
/// Borrowing the hyperedges keeps construction cheap; the tables themselves
/// are owned.
#[derive(Debug, Clone)]
pub struct Transition<'a> {
    edges: HashMap<EdgeId, &'a HyperEdge>,
    gamma: GammaTable,
    delta: DeltaTable,
    incidence: Incidence,
    strength: Strength,
}

impl<'a> Transition<'a> {
    /// Builds the transition model of a validated hypergraph.
    pub fn new(graph: &'a HyperGraph) -> Self {
        Self::from_parts(graph.edges(), graph.weights())
    }

    /// Builds the transition model from raw hyperedges and weights.
    pub fn from_parts(edges: &'a [HyperEdge], weights: &[Gamma]) -> Self {
        Self {
            edges: edges.iter().map(|edge| (edge.id, edge)).collect(),
            gamma: GammaTable::new(weights),
            delta: DeltaTable::new(weights),
            incidence: Incidence::new(edges),
            strength: Strength::new(edges),
        }
    }

    /// γ lookup table.
    pub fn gamma(&self) -> &GammaTable {
        &self.gamma
    }

    /// δ lookup table.
    pub fn delta(&self) -> &DeltaTable {
        &self.delta
    }

    /// E(v) incidence index.
    pub fn incidence(&self) -> &Incidence {
        &self.incidence
    }

    /// d(v) lookup table.
    pub fn strength(&self) -> &Strength {
        &self.strength
    }

    /// Resolves a hyperedge by id.
    pub fn edge(&self, id: EdgeId) -> Result<&'a HyperEdge, HmError> {
        self.edges.get(&id).copied().ok_or_else(|| {
            HmError::Transition(ErrorInfo::new("unknown-edge", "hyperedge does not exist"))
                .with_context("edge", id)
        })
    }

    /// δ'(e): the normaliser of a step out of `edge` that starts at `origin`.
    ///
    /// Equals δ(e) when self-links are allowed and δ(e) - γ_e(origin) otherwise.
    pub fn normalizer(
        &self,
        edge: &HyperEdge,
        origin: NodeId,
        self_links: bool,
    ) -> Result<f64, HmError> {
        let delta = self.delta.get(edge.id)?;
        if self_links {
            Ok(delta)
        } else {
            Ok(delta - self.gamma.get(edge.id, origin)?)
        }
    }

    /// Directed single-step probability of moving from `u` (reached through
    /// `e1`) to `v` through `e2`.
    ///
    /// Zero when `u == v` and self-links are disallowed, and zero when `u` is
    /// not a member of `e2`. Otherwise `γ_{e2}(v) / δ'(e2) * ω(e2) / d(u)`.
    /// A vanishing normaliser or strength yields zero rather than a division by zero.
    pub fn p(
        &self,
        _e1: &HyperEdge,
        u: NodeId,
        e2: &HyperEdge,
        v: NodeId,
        self_links: bool,
    ) -> Result<f64, HmError> {
        if !self_links && u == v {
            return Ok(0.0);
        }
        if !e2.contains(u) {
            return Ok(0.0);
        }
        let d_u = self.strength.get(u);
        let delta_e = self.normalizer(e2, u, self_links)?;
        if d_u <= 0.0 || delta_e <= 0.0 {
            return Ok(0.0);
        }
        Ok(self.gamma.get(e2.id, v)? / delta_e * e2.omega / d_u)
    }

    /// Clique-graph weight between `u` and `v`:
    /// `Σ_{e∈E(u,v)} ω(e)·γ_e(u)·γ_e(v) / δ'(e)` with δ' taken relative to `u`.
    pub fn w(&self, u: NodeId, v: NodeId, self_links: bool) -> Result<f64, HmError> {
        if !self_links && u == v {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for edge_id in self.incidence.shared(u, v) {
            let edge = self.edge(edge_id)?;
            let delta_e = self.normalizer(edge, u, self_links)?;
            if delta_e <= 0.0 {
                continue;
            }
            total +=
                edge.omega * self.gamma.get(edge.id, u)? * self.gamma.get(edge.id, v)? / delta_e;
        }
        Ok(total)
    }
}
