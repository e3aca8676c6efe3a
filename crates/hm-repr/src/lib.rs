#![deny(missing_docs)]
#![doc = "Network representations of hypergraphs: unipartite (clique), bipartite \
and multilayer builders, the state-id allocator, the solver hand-off and the \
`.net` writer."]

/// Bipartite builders, with and without non-backtracking state expansion.
pub mod bipartite;
/// Build configuration and dispatch.
pub mod config;
/// Link accumulation.
pub mod links;
/// Multilayer random-walk and similarity-walk builders.
pub mod multilayer;
/// Representation value types.
pub mod network;
/// Solver interface.
pub mod solver;
/// State-id allocation.
pub mod states;
/// Unipartite builders.
pub mod unipartite;
mod writer;

pub use bipartite::{bipartite, bipartite_non_backtracking, feature_nodes};
pub use config::{build, BuildConfig, RepresentationKind};
pub use links::LinkAccumulator;
pub use multilayer::{multilayer_random_walk, multilayer_similarity_walk};
pub use network::{
    BipartiteNetwork, BipartiteStateNetwork, Link, MultilayerLink, MultilayerNetwork, Network,
    Representation, StateNetwork, StateNode,
};
pub use solver::Solver;
pub use states::{StateIdAllocator, StateKey};
pub use unipartite::{directed_unipartite, undirected_unipartite};

use hm_core::errors::HmError;
use rayon::prelude::*;

/// Maps `f` over `items`, on the rayon pool when `parallel` is set.
///
/// Results keep the order of `items` either way.
pub(crate) fn map_items<X, T, F>(items: &[X], parallel: bool, f: F) -> Result<Vec<T>, HmError>
where
    X: Sync,
    T: Send,
    F: Fn(&X) -> Result<T, HmError> + Sync + Send,
{
    if parallel {
        items.par_iter().map(|item| f(item)).collect()
    } else {
        items.iter().map(f).collect()
    }
}
