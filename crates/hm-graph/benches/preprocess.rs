use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hm_graph::{canonical_hash, gen_random_hypergraph, preprocess, GeneratorSpec, PreprocessOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn preprocess_bench(c: &mut Criterion) {
    let spec = GeneratorSpec {
        nodes: 2_000,
        edges: 1_000,
        max_edge_size: 6,
        weighted: true,
    };
    let graph = gen_random_hypergraph(&spec, &mut StdRng::seed_from_u64(42)).unwrap();
    let opts = PreprocessOptions {
        largest_component: true,
        ..PreprocessOptions::default()
    };

    c.bench_function("largest_component_2k", |b| {
        b.iter(|| black_box(preprocess(graph.clone(), &opts).unwrap()));
    });

    c.bench_function("canonical_hash_2k", |b| {
        b.iter(|| black_box(canonical_hash(&graph)));
    });
}

criterion_group!(benches, preprocess_bench);
criterion_main!(benches);
