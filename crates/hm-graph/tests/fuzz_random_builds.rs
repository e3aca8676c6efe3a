use hm_graph::{
    canonical_hash, gen_random_hypergraph, graph_from_bytes, graph_to_bytes, preprocess,
    GeneratorSpec, PreprocessOptions,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn random_generator_respects_invariants(
        seed in any::<u64>(),
        nodes in 2usize..16,
        edges in 1usize..10,
        max_edge_size in 2usize..6,
    ) {
        let spec = GeneratorSpec { nodes, edges, max_edge_size, weighted: true };
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = gen_random_hypergraph(&spec, &mut rng).unwrap();

        prop_assert_eq!(graph.edges().len(), edges);
        for edge in graph.edges() {
            prop_assert!(edge.len() >= 2);
            prop_assert!(edge.len() <= max_edge_size.min(nodes));
        }
        let members: usize = graph.edges().iter().map(|edge| edge.len()).sum();
        prop_assert_eq!(graph.weights().len(), members);

        let restored = graph_from_bytes(&graph_to_bytes(&graph).unwrap()).unwrap();
        prop_assert_eq!(canonical_hash(&graph), canonical_hash(&restored));

        let opts = PreprocessOptions { largest_component: true, ..PreprocessOptions::default() };
        let reduced = preprocess(graph.clone(), &opts).unwrap();
        prop_assert!(reduced.nodes().len() <= graph.nodes().len());
        prop_assert!(!reduced.edges().is_empty());
    }

    #[test]
    fn same_seed_same_graph(seed in any::<u64>()) {
        let spec = GeneratorSpec::default();
        let a = gen_random_hypergraph(&spec, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = gen_random_hypergraph(&spec, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(canonical_hash(&a), canonical_hash(&b));
    }
}
