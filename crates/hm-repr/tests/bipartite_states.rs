use hm_core::{HyperEdge, HyperGraph, Node, NodeId, StateId};
use hm_repr::{
    bipartite, bipartite_non_backtracking, build, feature_nodes, BuildConfig, Link,
    Representation, RepresentationKind,
};

fn triangle() -> HyperGraph {
    let nodes = (1..=3).map(|id| Node::new(id, format!("n{id}"))).collect();
    HyperGraph::with_unit_weights(nodes, vec![HyperEdge::new(1, [1, 2, 3], 1.0)]).unwrap()
}

fn out_weight<I: PartialEq + Copy>(links: &[Link<I>], source: I) -> f64 {
    links
        .iter()
        .filter(|link| link.source == source)
        .map(|link| link.weight)
        .sum()
}

#[test]
fn feature_ids_start_above_the_largest_node() {
    let network = bipartite(&triangle(), false, false).unwrap();
    assert_eq!(network.features.len(), 1);
    assert_eq!(network.features[0].id, NodeId::from_raw(4));
    assert_eq!(network.features[0].name, "Hyperedge 1");
    assert_eq!(network.bipartite_start_id(), Some(NodeId::from_raw(4)));

    let nodes = vec![Node::new(5, "a"), Node::new(2, "b"), Node::new(9, "c")];
    let edges = vec![HyperEdge::new(10, [5, 2], 1.0), HyperEdge::new(20, [2, 9], 1.0)];
    let graph = HyperGraph::with_unit_weights(nodes, edges).unwrap();
    let network = bipartite(&graph, false, false).unwrap();
    let ids: Vec<u64> = network.features.iter().map(|f| f.id.as_raw()).collect();
    assert_eq!(ids, vec![10, 11]);
}

#[test]
fn flow_into_features_is_conserved_across_modes() {
    let graph = triangle();
    let plain = bipartite(&graph, false, false).unwrap();
    let expanded = bipartite_non_backtracking(&graph, false, false).unwrap();

    for node in graph.nodes() {
        let into_feature = out_weight(&plain.links, node.id);
        assert!((into_feature - 1.0).abs() < 1e-12);

        let state = expanded
            .states
            .iter()
            .find(|state| state.node_id == node.id)
            .unwrap()
            .state_id;
        let into_feature_state = out_weight(&expanded.links, state);
        assert!((into_feature_state - 1.0).abs() < 1e-12);
    }
}

#[test]
fn self_links_do_not_leak_flow_from_non_backtracking_states() {
    let graph = triangle();
    for self_links in [false, true] {
        let plain = bipartite(&graph, self_links, false).unwrap();
        let expanded = bipartite_non_backtracking(&graph, self_links, false).unwrap();
        for node in graph.nodes() {
            let state = expanded
                .states
                .iter()
                .find(|state| state.node_id == node.id)
                .unwrap()
                .state_id;
            let plain_out = out_weight(&plain.links, node.id);
            let expanded_out = out_weight(&expanded.links, state);
            assert!(
                (plain_out - expanded_out).abs() < 1e-12,
                "self_links={self_links}: {plain_out} vs {expanded_out}"
            );
            assert!((expanded_out - 1.0).abs() < 1e-12);
        }
    }

    let with = bipartite_non_backtracking(&graph, true, false).unwrap();
    let without = bipartite_non_backtracking(&graph, false, false).unwrap();
    assert_eq!(with.links, without.links);
}

#[test]
fn feature_ids_past_u64_max_are_rejected() {
    let top = u64::MAX;
    let nodes = vec![Node::new(1, "a"), Node::new(top, "z")];
    let graph =
        HyperGraph::with_unit_weights(nodes, vec![HyperEdge::new(1, [1, top], 1.0)]).unwrap();
    let err = feature_nodes(&graph).unwrap_err();
    assert_eq!(err.code(), "feature-id-overflow");
    assert!(bipartite(&graph, false, false).is_err());

    let nodes = vec![Node::new(1, "a"), Node::new(top - 1, "y")];
    let edges = vec![
        HyperEdge::new(1, [1, top - 1], 1.0),
        HyperEdge::new(2, [1, top - 1], 1.0),
    ];
    let graph = HyperGraph::with_unit_weights(nodes, edges).unwrap();
    assert_eq!(feature_nodes(&graph).unwrap_err().code(), "feature-id-overflow");

    let nodes = vec![Node::new(1, "a"), Node::new(top - 1, "y")];
    let graph =
        HyperGraph::with_unit_weights(nodes, vec![HyperEdge::new(1, [1, top - 1], 1.0)])
            .unwrap();
    let (features, _) = feature_nodes(&graph).unwrap();
    assert_eq!(features[0].id, NodeId::from_raw(top));
}

#[test]
fn backtracking_features_return_to_every_member() {
    let network = bipartite(&triangle(), false, false).unwrap();
    let feature = NodeId::from_raw(4);
    let targets: Vec<(u64, f64)> = network
        .links
        .iter()
        .filter(|link| link.source == feature)
        .map(|link| (link.target.as_raw(), link.weight))
        .collect();
    // Each member is reached from the two others with p = 1/2.
    assert_eq!(targets, vec![(1, 1.0), (2, 1.0), (3, 1.0)]);
}

#[test]
fn non_backtracking_states_are_allocated_in_order() {
    let network = bipartite_non_backtracking(&triangle(), false, false).unwrap();
    let states: Vec<(u64, u64)> = network
        .states
        .iter()
        .map(|state| (state.state_id.as_raw(), state.node_id.as_raw()))
        .collect();
    assert_eq!(states, vec![(1, 1), (2, 2), (3, 3), (4, 4), (5, 4), (6, 4)]);
    assert_eq!(network.bipartite_start_id(), Some(NodeId::from_raw(4)));
}

#[test]
fn non_backtracking_feature_states_never_return_to_their_origin() {
    let network = bipartite_non_backtracking(&triangle(), false, false).unwrap();
    let feature_state = StateId::from_raw(4);
    let out: Vec<(u64, f64)> = network
        .links
        .iter()
        .filter(|link| link.source == feature_state)
        .map(|link| (link.target.as_raw(), link.weight))
        .collect();
    // Entered from state 1: the weight is split between states 2 and 3 only.
    assert_eq!(out, vec![(2, 0.5), (3, 0.5)]);
    assert!(network
        .links
        .iter()
        .all(|link| !(link.source == feature_state && link.target == StateId::from_raw(1))));
}

#[test]
fn config_selects_state_expansion() {
    let config = BuildConfig {
        representation: RepresentationKind::Bipartite,
        non_backtracking: true,
        ..BuildConfig::default()
    };
    assert!(matches!(
        build(&triangle(), &config).unwrap(),
        Representation::BipartiteState(_)
    ));
    let config = BuildConfig {
        non_backtracking: false,
        ..config
    };
    assert!(matches!(
        build(&triangle(), &config).unwrap(),
        Representation::Bipartite(_)
    ));
}
