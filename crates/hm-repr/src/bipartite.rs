use std::collections::HashMap;

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{EdgeId, HyperGraph, Node, NodeId, StateId};
use hm_walk::{is_negligible, Transition};
use tracing::{debug, info};

use crate::links::LinkAccumulator;
use crate::map_items;
use crate::network::{BipartiteNetwork, BipartiteStateNetwork, StateNode};
use crate::states::{StateIdAllocator, StateKey};

/// One feature node per hyperedge, with ids contiguous from `max(node id) + 1`.
///
/// Returns the feature nodes in hyperedge order together with the
/// hyperedge-to-feature mapping.
pub fn feature_nodes(graph: &HyperGraph) -> Result<(Vec<Node>, HashMap<EdgeId, NodeId>), HmError> {
    let max = graph.max_node_id().ok_or_else(|| {
        HmError::Representation(ErrorInfo::new(
            "empty-hypergraph",
            "a bipartite network needs at least one node",
        ))
    })?;
    let overflow = || {
        HmError::Representation(ErrorInfo::new(
            "feature-id-overflow",
            "feature node ids do not fit above the largest node id",
        ))
        .with_context("max_node", max)
        .with_context("edges", graph.edges().len())
    };
    let start = max.as_raw().checked_add(1).ok_or_else(overflow)?;

    let mut features = Vec::with_capacity(graph.edges().len());
    let mut by_edge = HashMap::with_capacity(graph.edges().len());
    for (i, edge) in graph.edges().iter().enumerate() {
        let id = start.checked_add(i as u64).ok_or_else(overflow)?;
        let feature = Node::new(id, format!("Hyperedge {}", i + 1));
        by_edge.insert(edge.id, feature.id);
        features.push(feature);
    }
    Ok((features, by_edge))
}

struct Step {
    edge: EdgeId,
    u: NodeId,
    v: NodeId,
    weight: f64,
}

/// Every non-negligible `(e1, u, e2, v)` transition, in hyperedge order.
fn steps(
    graph: &HyperGraph,
    transition: &Transition<'_>,
    skip_self: bool,
    self_links: bool,
    parallel: bool,
) -> Result<Vec<Step>, HmError> {
    let per_edge = map_items(graph.edges(), parallel, |e1| {
        let mut out = Vec::new();
        for &u in &e1.nodes {
            for e2_id in transition.incidence().edges_of(u) {
                let e2 = transition.edge(e2_id)?;
                for &v in &e2.nodes {
                    if skip_self && u == v {
                        continue;
                    }
                    let weight = transition.p(e1, u, e2, v, self_links)?;
                    if is_negligible(weight) {
                        continue;
                    }
                    out.push(Step {
                        edge: e2.id,
                        u,
                        v,
                        weight,
                    });
                }
            }
        }
        Ok(out)
    })?;
    Ok(per_edge.into_iter().flatten().collect())
}

fn feature_of(features: &HashMap<EdgeId, NodeId>, edge: EdgeId) -> Result<NodeId, HmError> {
    features.get(&edge).copied().ok_or_else(|| {
        HmError::Representation(ErrorInfo::new(
            "unknown-edge",
            "no feature node for hyperedge",
        ))
        .with_context("edge", edge)
    })
}

/// Bipartite network: every step `u -> v` through `e2` adds its probability
/// to `u -> f(e2)` and to `f(e2) -> v`.
pub fn bipartite(
    graph: &HyperGraph,
    self_links: bool,
    parallel: bool,
) -> Result<BipartiteNetwork, HmError> {
    debug!(self_links, parallel, "building bipartite network");
    let (features, by_edge) = feature_nodes(graph)?;
    let transition = Transition::new(graph);

    let mut links = LinkAccumulator::new();
    for step in steps(graph, &transition, !self_links, self_links, parallel)? {
        let feature = feature_of(&by_edge, step.edge)?;
        links.add(step.u, feature, step.weight);
        links.add(feature, step.v, step.weight);
    }

    let network = BipartiteNetwork {
        nodes: graph.nodes().to_vec(),
        features,
        links: links.into_links(),
    };
    info!(
        nodes = network.nodes.len(),
        features = network.features.len(),
        links = network.links.len(),
        "bipartite network ready"
    );
    Ok(network)
}

struct States {
    alloc: StateIdAllocator,
    nodes: Vec<StateNode>,
}

impl States {
    fn id(&mut self, key: StateKey) -> StateId {
        let (state_id, created) = self.alloc.get_or_insert(key);
        if created {
            self.nodes.push(StateNode {
                state_id,
                node_id: key.node_id(),
            });
        }
        state_id
    }
}

/// Non-backtracking bipartite network.
///
/// Every physical node gets a state (in node order); every feature gets one
/// state per incoming state. A feature state spreads the step weight evenly
/// over the members of the hyperedge other than the origin, so the walk never
/// returns to the node it came from. Steps are normalised by δ(e) - γ_e(u)
/// whatever `self_links` says; the flag only matters for the plain builder.
pub fn bipartite_non_backtracking(
    graph: &HyperGraph,
    self_links: bool,
    parallel: bool,
) -> Result<BipartiteStateNetwork, HmError> {
    debug!(self_links, parallel, "building non-backtracking bipartite network");
    let (features, by_edge) = feature_nodes(graph)?;
    let transition = Transition::new(graph);

    let mut states = States {
        alloc: StateIdAllocator::new(),
        nodes: Vec::new(),
    };
    for node in graph.nodes() {
        states.id(StateKey::Physical(node.id));
    }

    let mut links = LinkAccumulator::new();
    // u -> u is never a step here, so δ' always excludes the origin.
    for step in steps(graph, &transition, true, false, parallel)? {
        let e2 = transition.edge(step.edge)?;
        let feature = feature_of(&by_edge, e2.id)?;
        let source = states.id(StateKey::Physical(step.u));
        let target = states.id(StateKey::Physical(step.v));
        let feature_state = states.id(StateKey::Feature { feature, source });

        let target_weight = if e2.len() > 1 {
            step.weight / (e2.len() - 1) as f64
        } else {
            step.weight
        };
        for &other in &e2.nodes {
            if other == step.u || other == step.v {
                continue;
            }
            let other_state = states.id(StateKey::Physical(other));
            links.add(feature_state, other_state, target_weight);
        }
        links.add(source, feature_state, step.weight);
        links.add(feature_state, target, target_weight);
    }

    let network = BipartiteStateNetwork {
        nodes: graph.nodes().to_vec(),
        features,
        states: states.nodes,
        links: links.into_links(),
    };
    info!(
        nodes = network.nodes.len(),
        states = network.states.len(),
        links = network.links.len(),
        "non-backtracking bipartite network ready"
    );
    Ok(network)
}
