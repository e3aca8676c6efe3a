use hm_core::errors::{ErrorInfo, HmError};
use hm_core::HyperGraph;
use hm_walk::{SimilarityKind, VisitRateKind};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bipartite::{bipartite, bipartite_non_backtracking};
use crate::multilayer::{multilayer_random_walk, multilayer_similarity_walk};
use crate::network::Representation;
use crate::unipartite::{directed_unipartite, undirected_unipartite};

/// Target network shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepresentationKind {
    /// Clique projection onto the physical nodes.
    Unipartite,
    /// Nodes plus one feature node per hyperedge.
    Bipartite,
    /// One layer per hyperedge.
    #[default]
    Multilayer,
}

/// Selects a representation and its flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Representation to build.
    #[serde(default)]
    pub representation: RepresentationKind,
    /// Directed links for the unipartite representation.
    #[serde(default = "BuildConfig::default_directed")]
    pub directed: bool,
    /// Whether a walker may step from a node to itself.
    #[serde(default)]
    pub self_links: bool,
    /// State-expanded non-backtracking walk for the bipartite representation.
    #[serde(default)]
    pub non_backtracking: bool,
    /// Similarity-weighted layer switching for the multilayer representation.
    #[serde(default)]
    pub similarity_walk: bool,
    /// Hyperedge similarity used by the similarity walk.
    #[serde(default)]
    pub similarity: SimilarityKind,
    /// Visit rate π applied by the directed unipartite builder.
    #[serde(default)]
    pub visit_rate: VisitRateKind,
    /// Spread the hyperedge loop over the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

impl BuildConfig {
    fn default_directed() -> bool {
        true
    }

    /// Short description used in file headers.
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("{:?}", self.representation).to_lowercase()];
        match self.representation {
            RepresentationKind::Unipartite => {
                parts.push(if self.directed { "directed" } else { "undirected" }.into());
            }
            RepresentationKind::Bipartite if self.non_backtracking => {
                parts.push("non-backtracking".into());
            }
            RepresentationKind::Multilayer if self.similarity_walk => {
                parts.push(format!("similarity-walk={:?}", self.similarity).to_lowercase());
            }
            _ => {}
        }
        if self.self_links {
            parts.push("self-links".into());
        }
        parts.join(" ")
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            representation: RepresentationKind::default(),
            directed: Self::default_directed(),
            self_links: false,
            non_backtracking: false,
            similarity_walk: false,
            similarity: SimilarityKind::default(),
            visit_rate: VisitRateKind::default(),
            parallel: false,
        }
    }
}

/// Builds the representation selected by `config`.
pub fn build(graph: &HyperGraph, config: &BuildConfig) -> Result<Representation, HmError> {
    if graph.nodes().is_empty() || graph.edges().is_empty() {
        return Err(HmError::Representation(ErrorInfo::new(
            "empty-hypergraph",
            "cannot build a network from an empty hypergraph",
        ))
        .with_context("nodes", graph.nodes().len())
        .with_context("edges", graph.edges().len()));
    }

    let (self_links, parallel) = (config.self_links, config.parallel);
    let representation = match config.representation {
        RepresentationKind::Unipartite if config.directed => {
            let visit = config.visit_rate.build(graph);
            Representation::Network(directed_unipartite(
                graph,
                self_links,
                visit.as_ref(),
                parallel,
            )?)
        }
        RepresentationKind::Unipartite => {
            Representation::Network(undirected_unipartite(graph, self_links, parallel)?)
        }
        RepresentationKind::Bipartite if config.non_backtracking => Representation::BipartiteState(
            bipartite_non_backtracking(graph, self_links, parallel)?,
        ),
        RepresentationKind::Bipartite => {
            Representation::Bipartite(bipartite(graph, self_links, parallel)?)
        }
        RepresentationKind::Multilayer if config.similarity_walk => Representation::Multilayer(
            multilayer_similarity_walk(graph, self_links, config.similarity, parallel)?,
        ),
        RepresentationKind::Multilayer => {
            Representation::Multilayer(multilayer_random_walk(graph, self_links, parallel)?)
        }
    };

    info!(
        kind = representation.kind(),
        nodes = representation.nodes().len(),
        states = representation.states().len(),
        links = representation.link_count(),
        "representation built"
    );
    Ok(representation)
}
