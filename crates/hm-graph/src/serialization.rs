use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{Gamma, HyperEdge, HyperGraph, Node};
use serde::{Deserialize, Serialize};

/// Serializes the hypergraph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &HyperGraph) -> Result<Vec<u8>, HmError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| HmError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a hypergraph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<HyperGraph, HmError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| HmError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the hypergraph to a JSON string.
pub fn graph_to_json(graph: &HyperGraph) -> Result<String, HmError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| HmError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a hypergraph from a JSON string.
///
/// A missing `weights` field means every member carries unit weight.
pub fn graph_from_json(json: &str) -> Result<HyperGraph, HmError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| HmError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    nodes: Vec<Node>,
    edges: Vec<HyperEdge>,
    #[serde(default)]
    weights: Option<Vec<Gamma>>,
}

impl SerializableGraph {
    fn from_graph(graph: &HyperGraph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            weights: Some(graph.weights().to_vec()),
        }
    }

    fn into_graph(self) -> Result<HyperGraph, HmError> {
        match self.weights {
            Some(weights) => HyperGraph::new(self.nodes, self.edges, weights),
            None => HyperGraph::with_unit_weights(self.nodes, self.edges),
        }
    }
}
