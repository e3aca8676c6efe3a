use hm_core::{HyperEdge, HyperGraph, Node, NodeId};
use hm_graph::{
    drop_dangling_nodes, drop_simple_edges, largest_connected_component, preprocess,
    PreprocessOptions,
};

fn two_components() -> HyperGraph {
    let nodes = (1..=7).map(|id| Node::new(id, format!("n{id}"))).collect();
    let edges = vec![
        HyperEdge::new(1, [1, 2, 3], 1.0),
        HyperEdge::new(2, [3, 4], 2.0),
        HyperEdge::new(3, [5, 6], 1.0),
        HyperEdge::new(4, [6], 1.0),
    ];
    HyperGraph::with_unit_weights(nodes, edges).unwrap()
}

fn ids(graph: &HyperGraph) -> Vec<u64> {
    graph.nodes().iter().map(|node| node.id.as_raw()).collect()
}

#[test]
fn simple_edges_and_their_weights_are_dropped() {
    let graph = drop_simple_edges(two_components()).unwrap();
    assert_eq!(graph.edges().len(), 3);
    assert!(graph.weights().iter().all(|w| w.edge.as_raw() != 4));
}

#[test]
fn dangling_nodes_are_dropped() {
    let graph = drop_dangling_nodes(two_components()).unwrap();
    assert_eq!(ids(&graph), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn largest_component_keeps_connected_nodes_only() {
    let graph = largest_connected_component(two_components()).unwrap();
    assert_eq!(ids(&graph), vec![1, 2, 3, 4]);
    let edge_ids: Vec<u64> = graph.edges().iter().map(|e| e.id.as_raw()).collect();
    assert_eq!(edge_ids, vec![1, 2]);
    assert_eq!(graph.weights().len(), 5);
}

#[test]
fn equal_components_prefer_smallest_node_id() {
    let nodes = (1..=4).map(|id| Node::new(id, "x")).collect();
    let edges = vec![HyperEdge::new(1, [3, 4], 1.0), HyperEdge::new(2, [1, 2], 1.0)];
    let graph = HyperGraph::with_unit_weights(nodes, edges).unwrap();
    let graph = largest_connected_component(graph).unwrap();
    assert_eq!(graph.max_node_id(), Some(NodeId::from_raw(2)));
}

#[test]
fn default_pipeline_drops_simple_then_dangling() {
    let graph = preprocess(two_components(), &PreprocessOptions::default()).unwrap();
    assert_eq!(graph.edges().len(), 3);
    assert_eq!(ids(&graph), vec![1, 2, 3, 4, 5, 6]);

    let opts = PreprocessOptions {
        largest_component: true,
        ..PreprocessOptions::default()
    };
    let graph = preprocess(two_components(), &opts).unwrap();
    assert_eq!(ids(&graph), vec![1, 2, 3, 4]);
}
