use std::collections::HashMap;

use hm_core::errors::HmError;
use hm_core::{HyperGraph, NodeId};
use serde::{Deserialize, Serialize};

/// Weighting π(u) applied to the outgoing transitions of a vertex when a
/// directed unipartite network is built.
pub trait VisitRate: Send + Sync {
    /// Returns π(node).
    fn rate(&self, node: NodeId) -> Result<f64, HmError>;
}

/// π(u) = 1 for every vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl VisitRate for Uniform {
    fn rate(&self, _node: NodeId) -> Result<f64, HmError> {
        Ok(1.0)
    }
}

/// π(u) = Σ_{e∋u} ω(e)·γ_e(u), the unnormalised stationary visit rate of a
/// lazy walk on the hypergraph.
#[derive(Debug, Clone, Default)]
pub struct StrengthRate {
    values: HashMap<NodeId, f64>,
}

impl StrengthRate {
    /// Computes the visit rates of every vertex.
    pub fn new(graph: &HyperGraph) -> Self {
        let omega: HashMap<_, _> = graph
            .edges()
            .iter()
            .map(|edge| (edge.id, edge.omega))
            .collect();
        let mut values: HashMap<NodeId, f64> = HashMap::new();
        for weight in graph.weights() {
            if let Some(omega_e) = omega.get(&weight.edge) {
                *values.entry(weight.node).or_insert(0.0) += omega_e * weight.gamma;
            }
        }
        Self { values }
    }
}

impl VisitRate for StrengthRate {
    fn rate(&self, node: NodeId) -> Result<f64, HmError> {
        Ok(self.values.get(&node).copied().unwrap_or(0.0))
    }
}

impl<F> VisitRate for F
where
    F: Fn(NodeId) -> f64 + Send + Sync,
{
    fn rate(&self, node: NodeId) -> Result<f64, HmError> {
        Ok(self(node))
    }
}

/// Configurable choice of [`VisitRate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitRateKind {
    /// See [`Uniform`].
    #[default]
    Uniform,
    /// See [`StrengthRate`].
    Strength,
}

impl VisitRateKind {
    /// Instantiates the weighting for `graph`.
    pub fn build(&self, graph: &HyperGraph) -> Box<dyn VisitRate> {
        match self {
            VisitRateKind::Uniform => Box::new(Uniform),
            VisitRateKind::Strength => Box::new(StrengthRate::new(graph)),
        }
    }
}
