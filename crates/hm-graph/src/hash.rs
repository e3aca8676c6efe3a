use hm_core::HyperGraph;
use sha2::{Digest, Sha256};

/// Computes the canonical structural hash for the provided hypergraph.
///
/// Nodes, hyperedges and weights are hashed in id order, so two hypergraphs that
/// only differ in input ordering share the same hash.
pub fn canonical_hash(graph: &HyperGraph) -> String {
    let mut hasher = Sha256::new();

    let mut nodes: Vec<_> = graph.nodes().iter().collect();
    nodes.sort_by_key(|node| node.id);
    hasher.update((nodes.len() as u64).to_le_bytes());
    for node in nodes {
        hasher.update(node.id.as_raw().to_le_bytes());
        update_str(&node.name, &mut hasher);
    }

    let mut edges: Vec<_> = graph.edges().iter().collect();
    edges.sort_by_key(|edge| edge.id);
    hasher.update((edges.len() as u64).to_le_bytes());
    for edge in edges {
        hasher.update(edge.id.as_raw().to_le_bytes());
        let members: Vec<u64> = edge.nodes.iter().map(|id| id.as_raw()).collect();
        update_slice(&members, &mut hasher);
        hasher.update(edge.omega.to_bits().to_le_bytes());
    }

    let mut weights: Vec<_> = graph.weights().iter().collect();
    weights.sort_by_key(|weight| (weight.edge, weight.node));
    hasher.update((weights.len() as u64).to_le_bytes());
    for weight in weights {
        hasher.update(weight.edge.as_raw().to_le_bytes());
        hasher.update(weight.node.as_raw().to_le_bytes());
        hasher.update(weight.gamma.to_bits().to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_slice(values: &[u64], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}
