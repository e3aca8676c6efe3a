#![deny(missing_docs)]

//! Transition-probability model for random walks on hypergraphs with
//! edge-dependent vertex weights.
//!
//! Lookup tables (`γ`, `δ`, `d`, `E`) are computed once per hypergraph by
//! [`Transition::new`]; the directed step probability [`Transition::p`] and the
//! symmetric clique weight [`Transition::w`] are then answered from those tables.

mod similarity;
mod tables;
mod transition;
mod visit;

pub use similarity::{
    jaccard_index, js_divergence, js_similarity, overlap_coefficient, sorensen_coefficient,
    EdgeSimilarity, Jaccard, JensenShannon, Overlap, SimilarityKind, SimilarityMatrix, Sorensen,
};
pub use tables::{DeltaTable, GammaTable, Incidence, Strength};
pub use transition::Transition;
pub use visit::{StrengthRate, Uniform, VisitRate, VisitRateKind};

/// Weights below this threshold are treated as structurally absent and never emitted.
pub const NEGLIGIBLE_WEIGHT: f64 = 1e-10;

/// Returns whether `weight` falls below [`NEGLIGIBLE_WEIGHT`].
#[inline]
pub fn is_negligible(weight: f64) -> bool {
    weight < NEGLIGIBLE_WEIGHT
}
