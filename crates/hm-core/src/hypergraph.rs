use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HmError};
use crate::{EdgeId, NodeId};

/// A physical vertex of the hypergraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Unique positive identifier.
    pub id: NodeId,
    /// Display name.
    pub name: String,
}

impl Node {
    /// Creates a node from a raw identifier and a name.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::from_raw(id),
            name: name.into(),
        }
    }
}

/// A hyperedge: an unordered node set carrying a total transition mass `omega`.
///
/// Equality and hashing only consider the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HyperEdge {
    /// Unique identifier, also used as the layer id in multilayer networks.
    pub id: EdgeId,
    /// Member nodes. Stored sorted so that every iteration is deterministic.
    pub nodes: BTreeSet<NodeId>,
    /// Total transition mass ω(e).
    pub omega: f64,
}

impl HyperEdge {
    /// Creates a hyperedge from raw identifiers.
    pub fn new(id: u64, nodes: impl IntoIterator<Item = u64>, omega: f64) -> Self {
        Self {
            id: EdgeId::from_raw(id),
            nodes: nodes.into_iter().map(NodeId::from_raw).collect(),
            omega,
        }
    }

    /// Returns whether `node` is a member of the hyperedge.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Number of member nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the hyperedge has no members.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A simple hyperedge has exactly one member and carries no transitions.
    pub fn is_simple(&self) -> bool {
        self.nodes.len() == 1
    }
}

impl PartialEq for HyperEdge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HyperEdge {}

impl Hash for HyperEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Edge-dependent vertex weight γ_e(v).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gamma {
    /// Hyperedge the weight belongs to.
    pub edge: EdgeId,
    /// Member node the weight applies to.
    pub node: NodeId,
    /// The weight itself.
    pub gamma: f64,
}

impl Gamma {
    /// Creates a weight entry from raw identifiers.
    pub fn new(edge: u64, node: u64, gamma: f64) -> Self {
        Self {
            edge: EdgeId::from_raw(edge),
            node: NodeId::from_raw(node),
            gamma,
        }
    }
}

/// Validated, immutable hypergraph with edge-dependent vertex weights.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperGraph {
    nodes: Vec<Node>,
    edges: Vec<HyperEdge>,
    weights: Vec<Gamma>,
}

impl HyperGraph {
    /// Builds a hypergraph after checking its structural invariants.
    ///
    /// Node and edge ids must be unique, every hyperedge must be non-empty and
    /// reference known nodes, and every weight must refer to a member of an
    /// existing hyperedge with at most one entry per (edge, node) pair. Weight
    /// completeness is not enforced here; incomplete weights surface as
    /// `missing-weight` errors when transition tables are queried.
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<HyperEdge>,
        weights: Vec<Gamma>,
    ) -> Result<Self, HmError> {
        let mut node_ids = BTreeSet::new();
        for node in &nodes {
            if !node_ids.insert(node.id) {
                return Err(graph_error("duplicate-node", "node id appears more than once")
                    .with_context("node", node.id));
            }
        }

        let mut edge_members: BTreeMap<EdgeId, &BTreeSet<NodeId>> = BTreeMap::new();
        for edge in &edges {
            if edge.is_empty() {
                return Err(graph_error("empty-edge", "hyperedge has no member nodes")
                    .with_context("edge", edge.id));
            }
            if let Some(node) = edge.nodes.iter().find(|node| !node_ids.contains(node)) {
                return Err(
                    graph_error("unknown-node", "hyperedge references an unknown node")
                        .with_context("edge", edge.id)
                        .with_context("node", node),
                );
            }
            if edge_members.insert(edge.id, &edge.nodes).is_some() {
                return Err(graph_error("duplicate-edge", "edge id appears more than once")
                    .with_context("edge", edge.id));
            }
        }

        let mut seen = BTreeSet::new();
        for weight in &weights {
            let is_member = edge_members
                .get(&weight.edge)
                .map(|members| members.contains(&weight.node))
                .unwrap_or(false);
            if !is_member {
                return Err(graph_error(
                    "dangling-weight",
                    "weight does not refer to a member of an existing hyperedge",
                )
                .with_context("edge", weight.edge)
                .with_context("node", weight.node));
            }
            if !seen.insert((weight.edge, weight.node)) {
                return Err(graph_error(
                    "duplicate-weight",
                    "more than one weight for the same (edge, node) pair",
                )
                .with_context("edge", weight.edge)
                .with_context("node", weight.node));
            }
        }

        Ok(Self {
            nodes,
            edges,
            weights,
        })
    }

    /// Builds an unweighted hypergraph where every γ_e(v) equals 1.0.
    pub fn with_unit_weights(nodes: Vec<Node>, edges: Vec<HyperEdge>) -> Result<Self, HmError> {
        let weights = edges
            .iter()
            .flat_map(|edge| edge.nodes.iter().map(move |node| (edge.id, *node)))
            .map(|(edge, node)| Gamma {
                edge,
                node,
                gamma: 1.0,
            })
            .collect();
        Self::new(nodes, edges, weights)
    }

    /// Adds `default` for every (edge, member) pair that has no weight yet.
    pub fn fill_missing_weights(mut self, default: f64) -> Self {
        let present: BTreeSet<(EdgeId, NodeId)> = self
            .weights
            .iter()
            .map(|weight| (weight.edge, weight.node))
            .collect();
        for edge in &self.edges {
            for node in &edge.nodes {
                if !present.contains(&(edge.id, *node)) {
                    self.weights.push(Gamma {
                        edge: edge.id,
                        node: *node,
                        gamma: default,
                    });
                }
            }
        }
        self
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Hyperedges in input order.
    pub fn edges(&self) -> &[HyperEdge] {
        &self.edges
    }

    /// Edge-dependent vertex weights in input order.
    pub fn weights(&self) -> &[Gamma] {
        &self.weights
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Looks up a hyperedge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&HyperEdge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Largest node id, if any node exists.
    pub fn max_node_id(&self) -> Option<NodeId> {
        self.nodes.iter().map(|node| node.id).max()
    }

    /// Returns whether the hypergraph has neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Splits the hypergraph into its parts.
    pub fn into_parts(self) -> (Vec<Node>, Vec<HyperEdge>, Vec<Gamma>) {
        (self.nodes, self.edges, self.weights)
    }
}

fn graph_error(code: impl Into<String>, message: impl Into<String>) -> HmError {
    HmError::Graph(ErrorInfo::new(code, message))
}
