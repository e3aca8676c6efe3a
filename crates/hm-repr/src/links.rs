use std::collections::BTreeMap;

use crate::network::Link;

/// Sums link contributions per `(source, target)` pair.
///
/// Several hyperedge pairs can produce the same link; their weights add up.
#[derive(Debug, Clone)]
pub struct LinkAccumulator<I> {
    weights: BTreeMap<(I, I), f64>,
}

impl<I: Ord + Copy> Default for LinkAccumulator<I> {
    fn default() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }
}

impl<I: Ord + Copy> LinkAccumulator<I> {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the link `source -> target`.
    pub fn add(&mut self, source: I, target: I, weight: f64) {
        *self.weights.entry((source, target)).or_insert(0.0) += weight;
    }

    /// Number of distinct links.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no link was added.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Links sorted by `(source, target)`.
    pub fn into_links(self) -> Vec<Link<I>> {
        self.weights
            .into_iter()
            .map(|((source, target), weight)| Link::new(source, target, weight))
            .collect()
    }
}
