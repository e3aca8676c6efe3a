#![deny(missing_docs)]

//! Preparation utilities for hypermap hypergraphs: preprocessing filters,
//! canonical hashing, serialization and seeded random generators.

mod generators;
mod hash;
mod preprocess;
mod serialization;

pub use generators::{gen_random_hypergraph, GeneratorSpec};
pub use hash::canonical_hash;
pub use preprocess::{
    drop_dangling_nodes, drop_simple_edges, largest_connected_component, preprocess,
    PreprocessOptions,
};
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
