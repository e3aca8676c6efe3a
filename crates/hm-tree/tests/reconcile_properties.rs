use std::collections::BTreeMap;

use hm_core::{NodeId, StateId};
use hm_tree::{reconcile, ReconcileOptions, Tree, TreeNode};
use proptest::prelude::*;

fn trees(modules: Vec<(u32, u32)>, split: Vec<usize>) -> (Tree, Tree) {
    let mut ground_truth = Vec::new();
    let mut target = Vec::new();
    let mut next_state = 1;
    let mut ranks: BTreeMap<(u32, u32), u32> = BTreeMap::new();
    for (i, (top, sub)) in modules.iter().enumerate() {
        let id = NodeId::from_raw(i as u64 + 1);
        let copies = split[i];
        for c in 0..copies {
            ground_truth.push(TreeNode {
                state_id: Some(StateId::from_raw(next_state)),
                ..TreeNode::new(vec![c as u32 + 1, 1], 1.0, "n", id)
            });
            next_state += 1;
        }
        let rank = ranks.entry((*top, *sub)).or_insert(0);
        *rank += 1;
        target.push(TreeNode::new(vec![*top, *sub, *rank], 1.0, "n", id));
    }
    (Tree::new(ground_truth), Tree::new(target))
}

proptest! {
    #[test]
    fn every_ground_truth_state_appears_once(
        modules in prop::collection::vec((1u32..4, 1u32..3), 1..12),
        split_seed in prop::collection::vec(1usize..4, 12),
    ) {
        let split: Vec<usize> = split_seed.into_iter().take(modules.len()).collect();
        let (ground_truth, target) = trees(modules, split);
        let reconciled = reconcile(&ground_truth, &target, ReconcileOptions { strict: true }).unwrap();

        prop_assert_eq!(reconciled.nodes.len(), ground_truth.nodes.len());
        let mut seen: BTreeMap<StateId, usize> = BTreeMap::new();
        for node in &reconciled.nodes {
            *seen.entry(node.state_id.unwrap()).or_insert(0) += 1;
        }
        prop_assert!(seen.values().all(|count| *count == 1));

        // Each physical node keeps its total flow.
        let mut flow: BTreeMap<NodeId, f64> = BTreeMap::new();
        for node in &reconciled.nodes {
            *flow.entry(node.id).or_insert(0.0) += node.flow;
        }
        for total in flow.values() {
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        let paths: Vec<_> = reconciled.nodes.iter().map(|n| n.path.clone()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        prop_assert_eq!(&paths, &sorted);
        let mut unique = sorted.clone();
        unique.dedup();
        prop_assert_eq!(unique.len(), sorted.len());
    }
}
