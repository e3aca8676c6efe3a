use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hm_core::{NodeId, StateId};
use hm_tree::{reconcile, ReconcileOptions, Tree, TreeNode};

fn reconcile_bench(c: &mut Criterion) {
    let mut ground_truth = Vec::new();
    let mut target = Vec::new();
    let mut state = 0;
    for i in 0..5_000u64 {
        let id = NodeId::from_raw(i + 1);
        for copy in 0..(1 + i % 3) {
            state += 1;
            ground_truth.push(TreeNode {
                state_id: Some(StateId::from_raw(state)),
                ..TreeNode::new(vec![copy as u32 + 1, 1], 0.1, "n", id)
            });
        }
        target.push(TreeNode::new(
            vec![(i % 50) as u32 + 1, (i / 50) as u32 + 1],
            0.2,
            "n",
            id,
        ));
    }
    let ground_truth = Tree::new(ground_truth);
    let target = Tree::new(target);

    c.bench_function("reconcile_flat_5k", |b| {
        b.iter(|| {
            black_box(reconcile(&ground_truth, &target, ReconcileOptions::default()).unwrap())
        });
    });
}

criterion_group!(benches, reconcile_bench);
criterion_main!(benches);
