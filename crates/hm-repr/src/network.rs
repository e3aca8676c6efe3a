use hm_core::{EdgeId, Node, NodeId, StateId};
use serde::{Deserialize, Serialize};

/// Weighted link between two vertices of a flat network.
///
/// `I` is [`NodeId`] for physical networks and [`StateId`] once states are
/// expanded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link<I = NodeId> {
    /// Source vertex.
    pub source: I,
    /// Target vertex.
    pub target: I,
    /// Accumulated link weight.
    pub weight: f64,
}

impl<I> Link<I> {
    /// Creates a link.
    pub fn new(source: I, target: I, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// A state node: a walk-history-specific copy of a physical node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateNode {
    /// Identifier of the state.
    pub state_id: StateId,
    /// Physical node (or feature node) the state belongs to.
    pub node_id: NodeId,
}

/// Link between two (layer, node) pairs; layers are hyperedge ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultilayerLink {
    /// Layer of the source.
    pub layer1: EdgeId,
    /// Source node.
    pub node1: NodeId,
    /// Layer of the target.
    pub layer2: EdgeId,
    /// Target node.
    pub node2: NodeId,
    /// Transition weight.
    pub weight: f64,
}

impl MultilayerLink {
    /// Whether both endpoints live in the same layer.
    pub fn is_intra(&self) -> bool {
        self.layer1 == self.layer2
    }

    pub(crate) fn key(&self) -> (EdgeId, NodeId, EdgeId, NodeId) {
        (self.layer1, self.node1, self.layer2, self.node2)
    }
}

/// Physical nodes and weighted links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Physical nodes.
    pub nodes: Vec<Node>,
    /// Links sorted by `(source, target)`.
    pub links: Vec<Link>,
    /// Whether links are directed.
    pub directed: bool,
}

/// Network whose links connect explicit state nodes.
///
/// None of the builders here emit it. It carries state-expanded unipartite
/// networks produced elsewhere, read through [`Representation::from_json`],
/// so they can be written or handed to a [`crate::Solver`] like the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateNetwork {
    /// Physical nodes.
    pub nodes: Vec<Node>,
    /// State nodes in allocation order.
    pub states: Vec<StateNode>,
    /// Links between states.
    pub links: Vec<Link<StateId>>,
    /// Whether links are directed.
    pub directed: bool,
}

/// Bipartite network with one feature node per hyperedge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipartiteNetwork {
    /// Physical nodes.
    pub nodes: Vec<Node>,
    /// Feature nodes, contiguous above the largest physical id.
    pub features: Vec<Node>,
    /// Links between physical and feature nodes.
    pub links: Vec<Link>,
}

impl BipartiteNetwork {
    /// Smallest feature id, `None` without features.
    pub fn bipartite_start_id(&self) -> Option<NodeId> {
        bipartite_start_id(&self.features)
    }
}

/// Bipartite network expanded into states for non-backtracking walks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BipartiteStateNetwork {
    /// Physical nodes.
    pub nodes: Vec<Node>,
    /// Feature nodes, contiguous above the largest physical id.
    pub features: Vec<Node>,
    /// Physical states first, then one state per (feature, incoming state).
    pub states: Vec<StateNode>,
    /// Links between states.
    pub links: Vec<Link<StateId>>,
}

impl BipartiteStateNetwork {
    /// Smallest feature id, `None` without features.
    pub fn bipartite_start_id(&self) -> Option<NodeId> {
        bipartite_start_id(&self.features)
    }
}

fn bipartite_start_id(features: &[Node]) -> Option<NodeId> {
    features.iter().map(|node| node.id).min()
}

/// Multilayer network with one layer per hyperedge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultilayerNetwork {
    /// Physical nodes.
    pub nodes: Vec<Node>,
    /// Links with `layer1 == layer2`, sorted by layer/node tuple.
    pub intra: Vec<MultilayerLink>,
    /// Links with `layer1 != layer2`, sorted by layer/node tuple.
    pub inter: Vec<MultilayerLink>,
}

impl MultilayerNetwork {
    /// Splits `links` into intra- and inter-layer groups and sorts each group.
    pub fn from_links(nodes: Vec<Node>, links: Vec<MultilayerLink>) -> Self {
        let (mut intra, mut inter): (Vec<_>, Vec<_>) =
            links.into_iter().partition(MultilayerLink::is_intra);
        intra.sort_by_key(MultilayerLink::key);
        inter.sort_by_key(MultilayerLink::key);
        Self { nodes, intra, inter }
    }

    /// All links in output order: intra-layer first.
    pub fn links(&self) -> impl Iterator<Item = &MultilayerLink> + '_ {
        self.intra.iter().chain(&self.inter)
    }
}

/// Every network shape a hypergraph can be turned into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Representation {
    /// Unipartite (clique) network.
    Network(Network),
    /// Unipartite network over state nodes.
    StateNetwork(StateNetwork),
    /// Bipartite node/feature network.
    Bipartite(BipartiteNetwork),
    /// Non-backtracking bipartite network.
    BipartiteState(BipartiteStateNetwork),
    /// Multilayer network.
    Multilayer(MultilayerNetwork),
}

impl Representation {
    /// Physical nodes of the representation.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Representation::Network(net) => &net.nodes,
            Representation::StateNetwork(net) => &net.nodes,
            Representation::Bipartite(net) => &net.nodes,
            Representation::BipartiteState(net) => &net.nodes,
            Representation::Multilayer(net) => &net.nodes,
        }
    }

    /// State nodes, empty for representations without states.
    pub fn states(&self) -> &[StateNode] {
        match self {
            Representation::StateNetwork(net) => &net.states,
            Representation::BipartiteState(net) => &net.states,
            _ => &[],
        }
    }

    /// Number of links of any kind.
    pub fn link_count(&self) -> usize {
        match self {
            Representation::Network(net) => net.links.len(),
            Representation::StateNetwork(net) => net.links.len(),
            Representation::Bipartite(net) => net.links.len(),
            Representation::BipartiteState(net) => net.links.len(),
            Representation::Multilayer(net) => net.intra.len() + net.inter.len(),
        }
    }

    /// Short name used in logs and file headers.
    pub fn kind(&self) -> &'static str {
        match self {
            Representation::Network(_) => "network",
            Representation::StateNetwork(_) => "state-network",
            Representation::Bipartite(_) => "bipartite",
            Representation::BipartiteState(_) => "bipartite-state",
            Representation::Multilayer(_) => "multilayer",
        }
    }
}
