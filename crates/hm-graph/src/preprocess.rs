use std::collections::{BTreeMap, BTreeSet};

use hm_core::errors::HmError;
use hm_core::{HyperGraph, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters applied to a parsed hypergraph before any representation is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    /// Remove hyperedges with a single member; they carry no transitions.
    #[serde(default = "default_true")]
    pub drop_simple_edges: bool,
    /// Remove nodes that no remaining hyperedge references.
    #[serde(default = "default_true")]
    pub drop_dangling_nodes: bool,
    /// Keep only the largest connected component of the clique projection.
    #[serde(default)]
    pub largest_component: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            drop_simple_edges: true,
            drop_dangling_nodes: true,
            largest_component: false,
        }
    }
}

/// Applies the configured filters in a fixed order: simple edges, dangling
/// nodes, then the largest component.
pub fn preprocess(graph: HyperGraph, opts: &PreprocessOptions) -> Result<HyperGraph, HmError> {
    let mut graph = graph;
    if opts.drop_simple_edges {
        graph = drop_simple_edges(graph)?;
    }
    if opts.drop_dangling_nodes {
        graph = drop_dangling_nodes(graph)?;
    }
    if opts.largest_component {
        graph = largest_connected_component(graph)?;
    }
    Ok(graph)
}

/// Removes every hyperedge with exactly one member together with its weights.
pub fn drop_simple_edges(graph: HyperGraph) -> Result<HyperGraph, HmError> {
    let (nodes, edges, weights) = graph.into_parts();
    let before = edges.len();
    let (edges, simple): (Vec<_>, Vec<_>) = edges.into_iter().partition(|edge| !edge.is_simple());
    let dropped: BTreeSet<_> = simple.iter().map(|edge| edge.id).collect();
    let weights = weights
        .into_iter()
        .filter(|weight| !dropped.contains(&weight.edge))
        .collect();
    debug!(before, after = edges.len(), "dropped simple hyperedges");
    HyperGraph::new(nodes, edges, weights)
}

/// Removes every node that is not a member of any hyperedge.
pub fn drop_dangling_nodes(graph: HyperGraph) -> Result<HyperGraph, HmError> {
    let (nodes, edges, weights) = graph.into_parts();
    let referenced: BTreeSet<NodeId> = edges
        .iter()
        .flat_map(|edge| edge.nodes.iter().copied())
        .collect();
    let before = nodes.len();
    let nodes: Vec<_> = nodes
        .into_iter()
        .filter(|node| referenced.contains(&node.id))
        .collect();
    debug!(before, after = nodes.len(), "dropped dangling nodes");
    HyperGraph::new(nodes, edges, weights)
}

/// Restricts the hypergraph to its largest connected component.
///
/// Two nodes are connected when they share a hyperedge. Ties between equally
/// large components go to the one containing the smallest node id. Input order
/// of the surviving nodes, edges and weights is preserved.
pub fn largest_connected_component(graph: HyperGraph) -> Result<HyperGraph, HmError> {
    let mut components = DisjointSets::new(graph.nodes().iter().map(|node| node.id));
    for edge in graph.edges() {
        let mut members = edge.nodes.iter();
        if let Some(first) = members.next() {
            for other in members {
                components.union(*first, *other);
            }
        }
    }

    let mut sizes: BTreeMap<NodeId, (usize, NodeId)> = BTreeMap::new();
    for node in graph.nodes() {
        let root = components.find(node.id);
        let entry = sizes.entry(root).or_insert((0, node.id));
        entry.0 += 1;
        entry.1 = entry.1.min(node.id);
    }
    if sizes.len() <= 1 {
        return Ok(graph);
    }

    let largest = sizes
        .iter()
        .max_by(|(_, (size_a, min_a)), (_, (size_b, min_b))| {
            size_a.cmp(size_b).then_with(|| min_b.cmp(min_a))
        })
        .map(|(root, _)| *root);

    let keep: BTreeSet<NodeId> = graph
        .nodes()
        .iter()
        .map(|node| node.id)
        .filter(|id| Some(components.find(*id)) == largest)
        .collect();

    let (nodes, edges, weights) = graph.into_parts();
    let components_found = sizes.len();
    let nodes: Vec<_> = nodes
        .into_iter()
        .filter(|node| keep.contains(&node.id))
        .collect();
    let edges: Vec<_> = edges
        .into_iter()
        .filter(|edge| edge.nodes.iter().any(|node| keep.contains(node)))
        .collect();
    let edge_ids: BTreeSet<_> = edges.iter().map(|edge| edge.id).collect();
    let weights = weights
        .into_iter()
        .filter(|weight| edge_ids.contains(&weight.edge) && keep.contains(&weight.node))
        .collect();
    debug!(
        components = components_found,
        kept_nodes = nodes.len(),
        "restricted to largest connected component"
    );
    HyperGraph::new(nodes, edges, weights)
}

struct DisjointSets {
    parent: BTreeMap<NodeId, NodeId>,
}

impl DisjointSets {
    fn new(nodes: impl Iterator<Item = NodeId>) -> Self {
        Self {
            parent: nodes.map(|node| (node, node)).collect(),
        }
    }

    fn find(&mut self, node: NodeId) -> NodeId {
        let mut root = node;
        while let Some(&parent) = self.parent.get(&root) {
            if parent == root {
                break;
            }
            root = parent;
        }
        let mut current = node;
        while current != root {
            match self.parent.insert(current, root) {
                Some(next) => current = next,
                None => break,
            }
        }
        root
    }

    fn union(&mut self, a: NodeId, b: NodeId) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            let (low, high) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            self.parent.insert(high, low);
        }
    }
}
