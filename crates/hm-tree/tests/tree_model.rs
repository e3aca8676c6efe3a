use hm_core::{NodeId, StateId};
use hm_repr::StateNode;
use hm_tree::{aligned_labels, is_feature_node, labels, Level, Tree, TreeNode};

fn leaf(path: &[u32], flow: f64, id: u64) -> TreeNode {
    TreeNode::new(path.to_vec(), flow, format!("n{id}"), NodeId::from_raw(id))
}

fn state_node(state: u64, node: u64) -> StateNode {
    StateNode {
        state_id: StateId::from_raw(state),
        node_id: NodeId::from_raw(node),
    }
}

#[test]
fn module_accessors() {
    let node = leaf(&[2, 5, 3], 0.1, 1);
    assert_eq!(node.top_module(), 2);
    assert_eq!(node.module(), "2:5");
    assert_eq!(node.state_key(), 1);
    assert_eq!(node.level(), 3);
    assert_eq!(leaf(&[4], 0.1, 1).module(), "");
}

#[test]
fn feature_nodes_are_filtered_by_name() {
    assert!(is_feature_node("Hyperedge 12"));
    assert!(is_feature_node("some hyperedge"));
    assert!(!is_feature_node("n1"));

    let mut feature = leaf(&[1, 2], 0.5, 10);
    feature.name = "Hyperedge 1".into();
    let tree = Tree {
        is_bipartite: true,
        ..Tree::new(vec![leaf(&[1, 1], 0.5, 1), feature])
    }
    .without_feature_nodes();
    assert_eq!(tree.nodes.len(), 1);
    assert!(tree.is_bipartite);
}

#[test]
fn assignments_count_modules_per_node() {
    let tree = Tree::new(vec![
        leaf(&[1, 1], 0.2, 1),
        leaf(&[2, 1], 0.2, 1),
        leaf(&[2, 2], 0.2, 1),
        leaf(&[3, 1], 0.2, 2),
        leaf(&[3, 2], 0.2, 2),
    ]);
    assert_eq!(tree.assignments(), vec![2, 1]);

    let effective = tree.effective_assignments();
    assert_eq!(effective.len(), 2);
    // Node 1 has leaf counts (1, 2) over two modules; node 2 sits in one.
    assert!(effective[0] > 1.0 && effective[0] < 2.0);
    assert!((effective[1] - 1.0).abs() < 1e-12);
    assert_eq!(tree.top_modules().into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!((tree.total_flow() - 1.0).abs() < 1e-12);
}

#[test]
fn initial_partition_and_cluster_data_follow_physical_modules() {
    let tree = Tree::new(vec![leaf(&[1, 1], 0.5, 1), leaf(&[2, 1], 0.5, 2)]);
    let states = vec![
        state_node(1, 1),
        state_node(2, 2),
        state_node(3, 1),
        state_node(4, 99),
    ];

    let partition = tree.initial_partition(&states);
    let pairs: Vec<(u64, u32)> = partition.iter().map(|(s, m)| (s.as_raw(), *m)).collect();
    assert_eq!(pairs, vec![(1, 1), (2, 2), (3, 1)]);

    let clustered = tree.cluster_data(&states);
    let leaves: Vec<(Vec<u32>, u64, Option<u64>)> = clustered
        .nodes
        .iter()
        .map(|n| (n.path.clone(), n.id.as_raw(), n.state_id.map(|s| s.as_raw())))
        .collect();
    assert_eq!(
        leaves,
        vec![
            (vec![1, 1], 1, Some(1)),
            (vec![1, 2], 1, Some(3)),
            (vec![2, 1], 2, Some(2)),
        ]
    );
    assert!(clustered.nodes.iter().all(|n| n.flow == 0.0));
}

#[test]
fn labels_are_dense_and_keyed_by_state() {
    let a = vec![leaf(&[5, 1], 0.5, 2), leaf(&[7, 1], 0.5, 1)];
    let b = vec![leaf(&[1, 1, 1], 0.5, 1), leaf(&[1, 2, 1], 0.5, 2)];
    assert_eq!(labels(&a, Level::TopModule), vec![0, 1]);
    assert_eq!(labels(&b, Level::TopModule), vec![0, 0]);
    assert_eq!(labels(&b, Level::LeafModule), vec![0, 1]);

    let (left, right) = aligned_labels(&a, &b, Level::TopModule).unwrap();
    assert_eq!((left.len(), right.len()), (2, 2));

    let err = aligned_labels(&a, &b[..1], Level::TopModule).unwrap_err();
    assert_eq!(err.code(), "label-mismatch");
}

#[test]
fn text_and_json_output() {
    let mut node = leaf(&[1, 2], 0.5, 3);
    node.state_id = Some(StateId::from_raw(7));
    let tree = Tree {
        codelength: Some(3.25),
        ..Tree::new(vec![leaf(&[1, 1], 0.5, 1), node])
    };

    let mut out = Vec::new();
    tree.write(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1:1 0.5 \"n1\" 1 1\n1:2 0.5 \"n3\" 7 3\n"
    );

    let json = tree.to_json().unwrap();
    assert_eq!(Tree::from_json(&json).unwrap(), tree);
    assert_eq!(Tree::from_json("{\"nodes\": 3}").unwrap_err().code(), "deserialize-json");
}
