use hm_core::{NodeId, StateId};

use crate::network::{MultilayerLink, Representation};

/// Sink for a community-detection solver.
///
/// Link endpoints are raw ids: node ids for physical networks, state ids for
/// state networks.
pub trait Solver {
    /// Adds a physical node.
    fn add_node(&mut self, id: NodeId, name: &str);
    /// Names a node without adding it; used when states carry the structure.
    fn set_name(&mut self, id: NodeId, name: &str);
    /// Adds a state node of `node`.
    fn add_state_node(&mut self, state: StateId, node: NodeId);
    /// Adds a weighted link.
    fn add_link(&mut self, source: u64, target: u64, weight: f64);
    /// Adds a link between two (layer, node) pairs.
    fn add_multilayer_link(&mut self, link: &MultilayerLink);
    /// Marks the first feature node id of a bipartite network.
    fn set_bipartite_start_id(&mut self, id: NodeId);
}

impl Representation {
    /// Hands the representation to `solver`.
    pub fn apply<S: Solver + ?Sized>(&self, solver: &mut S) {
        match self {
            Representation::Network(net) => {
                for node in &net.nodes {
                    solver.add_node(node.id, &node.name);
                }
                for link in &net.links {
                    solver.add_link(link.source.into(), link.target.into(), link.weight);
                }
            }
            Representation::StateNetwork(net) => {
                for node in &net.nodes {
                    solver.set_name(node.id, &node.name);
                }
                for state in &net.states {
                    solver.add_state_node(state.state_id, state.node_id);
                }
                for link in &net.links {
                    solver.add_link(link.source.into(), link.target.into(), link.weight);
                }
            }
            Representation::Bipartite(net) => {
                for node in net.nodes.iter().chain(&net.features) {
                    solver.add_node(node.id, &node.name);
                }
                for link in &net.links {
                    solver.add_link(link.source.into(), link.target.into(), link.weight);
                }
                if let Some(start) = net.bipartite_start_id() {
                    solver.set_bipartite_start_id(start);
                }
            }
            Representation::BipartiteState(net) => {
                for node in net.nodes.iter().chain(&net.features) {
                    solver.set_name(node.id, &node.name);
                }
                for state in &net.states {
                    solver.add_state_node(state.state_id, state.node_id);
                }
                for link in &net.links {
                    solver.add_link(link.source.into(), link.target.into(), link.weight);
                }
                if let Some(start) = net.bipartite_start_id() {
                    solver.set_bipartite_start_id(start);
                }
            }
            Representation::Multilayer(net) => {
                for node in &net.nodes {
                    solver.set_name(node.id, &node.name);
                }
                for link in net.links() {
                    solver.add_multilayer_link(link);
                }
            }
        }
    }
}
