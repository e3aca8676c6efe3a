use std::collections::{BTreeSet, HashMap};

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{EdgeId, HyperEdge, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tables::{GammaTable, Incidence};

/// Divergences outside `[-TOLERANCE, 1 + TOLERANCE]` signal a defect.
const DIVERGENCE_TOLERANCE: f64 = 1e-10;

/// Similarity between two hyperedges, in `[0, 1]`.
pub trait EdgeSimilarity: Send + Sync {
    /// Returns the similarity of `a` and `b`.
    fn similarity(&self, a: &HyperEdge, b: &HyperEdge) -> Result<f64, HmError>;
}

/// |a ∩ b| / |a ∪ b|.
pub fn jaccard_index(a: &HyperEdge, b: &HyperEdge) -> f64 {
    let union = a.nodes.union(&b.nodes).count();
    if union == 0 {
        return 0.0;
    }
    a.nodes.intersection(&b.nodes).count() as f64 / union as f64
}

/// 2·|a ∩ b| / (|a| + |b|).
pub fn sorensen_coefficient(a: &HyperEdge, b: &HyperEdge) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    2.0 * a.nodes.intersection(&b.nodes).count() as f64 / total as f64
}

/// |a ∩ b| / min(|a|, |b|).
pub fn overlap_coefficient(a: &HyperEdge, b: &HyperEdge) -> f64 {
    let smallest = a.len().min(b.len());
    if smallest == 0 {
        return 0.0;
    }
    a.nodes.intersection(&b.nodes).count() as f64 / smallest as f64
}

fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .filter(|(p_i, _)| **p_i > 0.0)
        .map(|(p_i, q_i)| p_i * (p_i / q_i).log2())
        .sum()
}

/// Jensen-Shannon divergence (base 2) of two probability vectors of equal length.
pub fn js_divergence(p: &[f64], q: &[f64]) -> Result<f64, HmError> {
    if p.len() != q.len() {
        return Err(similarity_error(
            "length-mismatch",
            "distributions must have the same support",
        )
        .with_context("p", p.len())
        .with_context("q", q.len()));
    }
    let mix: Vec<f64> = p.iter().zip(q).map(|(p_i, q_i)| 0.5 * (p_i + q_i)).collect();
    let jsd = 0.5 * kl_divergence(p, &mix) + 0.5 * kl_divergence(q, &mix);
    if !(-DIVERGENCE_TOLERANCE..=1.0 + DIVERGENCE_TOLERANCE).contains(&jsd) {
        return Err(similarity_error(
            "divergence-out-of-bounds",
            "Jensen-Shannon divergence left [0, 1]",
        )
        .with_context("jsd", jsd));
    }
    Ok(jsd)
}

/// 1 - JSD between the γ distributions of two hyperedges over their joint support.
pub fn js_similarity(a: &HyperEdge, b: &HyperEdge, gamma: &GammaTable) -> Result<f64, HmError> {
    let mut index: HashMap<NodeId, usize> = HashMap::new();
    for node in a.nodes.iter().chain(&b.nodes) {
        let next = index.len();
        index.entry(*node).or_insert(next);
    }

    let mut p = vec![0.0; index.len()];
    let mut q = vec![0.0; index.len()];
    for node in &a.nodes {
        p[index[node]] = gamma.get(a.id, *node)?;
    }
    for node in &b.nodes {
        q[index[node]] = gamma.get(b.id, *node)?;
    }
    normalize_l1(&mut p);
    normalize_l1(&mut q);

    Ok(1.0 - js_divergence(&p, &q)?)
}

fn normalize_l1(values: &mut [f64]) {
    let total: f64 = values.iter().map(|value| value.abs()).sum();
    if total > 0.0 {
        for value in values.iter_mut() {
            *value /= total;
        }
    }
}

/// See [`jaccard_index`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Jaccard;

impl EdgeSimilarity for Jaccard {
    fn similarity(&self, a: &HyperEdge, b: &HyperEdge) -> Result<f64, HmError> {
        Ok(jaccard_index(a, b))
    }
}

/// See [`sorensen_coefficient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sorensen;

impl EdgeSimilarity for Sorensen {
    fn similarity(&self, a: &HyperEdge, b: &HyperEdge) -> Result<f64, HmError> {
        Ok(sorensen_coefficient(a, b))
    }
}

/// See [`overlap_coefficient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlap;

impl EdgeSimilarity for Overlap {
    fn similarity(&self, a: &HyperEdge, b: &HyperEdge) -> Result<f64, HmError> {
        Ok(overlap_coefficient(a, b))
    }
}

/// See [`js_similarity`].
#[derive(Debug, Clone, Copy)]
pub struct JensenShannon<'a> {
    gamma: &'a GammaTable,
}

impl<'a> JensenShannon<'a> {
    /// Binds the measure to a γ table.
    pub fn new(gamma: &'a GammaTable) -> Self {
        Self { gamma }
    }
}

impl EdgeSimilarity for JensenShannon<'_> {
    fn similarity(&self, a: &HyperEdge, b: &HyperEdge) -> Result<f64, HmError> {
        js_similarity(a, b, self.gamma)
    }
}

/// Configurable choice of [`EdgeSimilarity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityKind {
    /// See [`JensenShannon`].
    #[default]
    JensenShannon,
    /// See [`Jaccard`].
    Jaccard,
    /// See [`Sorensen`].
    Sorensen,
    /// See [`Overlap`].
    Overlap,
}

impl SimilarityKind {
    /// Instantiates the measure; the Jensen-Shannon variant reads `gamma`.
    pub fn build<'a>(&self, gamma: &'a GammaTable) -> Box<dyn EdgeSimilarity + 'a> {
        match self {
            SimilarityKind::JensenShannon => Box::new(JensenShannon::new(gamma)),
            SimilarityKind::Jaccard => Box::new(Jaccard),
            SimilarityKind::Sorensen => Box::new(Sorensen),
            SimilarityKind::Overlap => Box::new(Overlap),
        }
    }
}

/// Similarities of every pair of hyperedges that share at least one vertex.
///
/// Disjoint pairs are not stored and read as zero, which every supported
/// measure assigns to hyperedges without common members.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    values: HashMap<(EdgeId, EdgeId), f64>,
}

impl SimilarityMatrix {
    /// Evaluates `measure` on all overlapping pairs (including each edge with itself).
    pub fn overlapping(
        edges: &[HyperEdge],
        incidence: &Incidence,
        measure: &dyn EdgeSimilarity,
    ) -> Result<Self, HmError> {
        let by_id: HashMap<EdgeId, &HyperEdge> = edges.iter().map(|edge| (edge.id, edge)).collect();
        let mut values = HashMap::new();
        for a in edges {
            let neighbours: BTreeSet<EdgeId> = a
                .nodes
                .iter()
                .flat_map(|node| incidence.edges_of(*node))
                .collect();
            for b_id in neighbours {
                if let Some(b) = by_id.get(&b_id) {
                    values.insert((a.id, b_id), measure.similarity(a, b)?);
                }
            }
        }
        debug!(pairs = values.len(), "similarity matrix ready");
        Ok(Self { values })
    }

    /// Similarity of `a` and `b`; zero for pairs without common members.
    pub fn get(&self, a: EdgeId, b: EdgeId) -> f64 {
        self.values.get(&(a, b)).copied().unwrap_or(0.0)
    }
}

fn similarity_error(code: impl Into<String>, message: impl Into<String>) -> HmError {
    HmError::Similarity(ErrorInfo::new(code, message))
}
