use hm_core::{HyperEdge, HyperGraph, Node, NodeId};
use hm_repr::{
    build, directed_unipartite, undirected_unipartite, BuildConfig, Link, Representation,
    RepresentationKind,
};
use hm_walk::{StrengthRate, Uniform, VisitRate};

fn node(id: u64) -> NodeId {
    NodeId::from_raw(id)
}

fn single_pair() -> HyperGraph {
    let nodes = vec![Node::new(1, "u"), Node::new(2, "v")];
    HyperGraph::with_unit_weights(nodes, vec![HyperEdge::new(1, [1, 2], 1.0)]).unwrap()
}

fn two_edges() -> HyperGraph {
    let nodes = (1..=3).map(|id| Node::new(id, format!("n{id}"))).collect();
    let edges = vec![HyperEdge::new(1, [1, 2], 1.0), HyperEdge::new(2, [1, 3], 1.0)];
    HyperGraph::with_unit_weights(nodes, edges).unwrap()
}

#[test]
fn directed_pair_has_two_symmetric_links() {
    let network = directed_unipartite(&single_pair(), false, &Uniform, false).unwrap();
    assert!(network.directed);
    assert_eq!(
        network.links,
        vec![Link::new(node(1), node(2), 1.0), Link::new(node(2), node(1), 1.0)]
    );
    assert!(network.links.iter().all(|link| link.source != link.target));
    assert!(network.links.iter().all(|link| link.weight >= 1e-10));
}

#[test]
fn directed_contributions_accumulate_over_arrival_edges() {
    let network = directed_unipartite(&two_edges(), false, &Uniform, false).unwrap();
    // Node 1 sits in both hyperedges: each arrival edge contributes p = 1/2.
    let weight = |s, t| {
        network
            .links
            .iter()
            .find(|link| link.source == node(s) && link.target == node(t))
            .map(|link| link.weight)
    };
    assert_eq!(weight(1, 2), Some(1.0));
    assert_eq!(weight(1, 3), Some(1.0));
    assert_eq!(weight(2, 1), Some(1.0));
    assert_eq!(weight(2, 3), None);
}

#[test]
fn visit_rate_scales_outgoing_links() {
    let graph = two_edges();
    let uniform = directed_unipartite(&graph, false, &Uniform, false).unwrap();
    let pi = StrengthRate::new(&graph);
    let strength = directed_unipartite(&graph, false, &pi, false).unwrap();
    assert_eq!(uniform.links.len(), strength.links.len());
    for (a, b) in uniform.links.iter().zip(&strength.links) {
        let rate = pi.rate(a.source).unwrap();
        assert_eq!((a.source, a.target), (b.source, b.target));
        assert!((a.weight * rate - b.weight).abs() < 1e-12);
    }
}

#[test]
fn self_links_allow_loops() {
    let network = directed_unipartite(&single_pair(), true, &Uniform, false).unwrap();
    assert_eq!(network.links.len(), 4);
    assert!(network.links.iter().all(|link| link.weight == 0.5));
}

#[test]
fn undirected_pair_uses_full_normaliser() {
    let without = undirected_unipartite(&single_pair(), false, false).unwrap();
    assert!(!without.directed);
    assert_eq!(without.links, vec![Link::new(node(1), node(2), 0.5)]);

    let with = undirected_unipartite(&single_pair(), true, false).unwrap();
    assert_eq!(
        with.links,
        vec![
            Link::new(node(1), node(1), 0.5),
            Link::new(node(1), node(2), 0.5),
            Link::new(node(2), node(2), 0.5),
        ]
    );
}

#[test]
fn undirected_links_follow_node_order() {
    let nodes = vec![Node::new(3, "c"), Node::new(1, "a"), Node::new(2, "b")];
    let graph =
        HyperGraph::with_unit_weights(nodes, vec![HyperEdge::new(1, [1, 2, 3], 3.0)]).unwrap();
    let network = undirected_unipartite(&graph, false, false).unwrap();
    let pairs: Vec<_> = network
        .links
        .iter()
        .map(|link| (link.source.as_raw(), link.target.as_raw()))
        .collect();
    assert_eq!(pairs, vec![(1, 2), (3, 1), (3, 2)]);
    assert!(network.links.iter().all(|link| link.weight == 1.0));
}

#[test]
fn config_dispatches_to_unipartite() {
    let config = BuildConfig {
        representation: RepresentationKind::Unipartite,
        ..BuildConfig::default()
    };
    match build(&single_pair(), &config).unwrap() {
        Representation::Network(network) => assert!(network.directed),
        other => panic!("unexpected representation {}", other.kind()),
    }

    let undirected = BuildConfig {
        directed: false,
        ..config
    };
    match build(&single_pair(), &undirected).unwrap() {
        Representation::Network(network) => assert!(!network.directed),
        other => panic!("unexpected representation {}", other.kind()),
    }
}

#[test]
fn empty_hypergraph_is_rejected() {
    let graph = HyperGraph::with_unit_weights(Vec::new(), Vec::new()).unwrap();
    let err = build(&graph, &BuildConfig::default()).unwrap_err();
    assert_eq!(err.code(), "empty-hypergraph");
}
