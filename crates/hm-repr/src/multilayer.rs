use hm_core::errors::HmError;
use hm_core::{HyperEdge, HyperGraph};
use hm_walk::{is_negligible, SimilarityKind, SimilarityMatrix, Transition};
use tracing::{debug, info};

use crate::map_items;
use crate::network::{MultilayerLink, MultilayerNetwork};

/// Multilayer network of the plain random walk: `(e1, u) -> (e2, v)` weighted
/// by `p(e1, u, e2, v)`.
pub fn multilayer_random_walk(
    graph: &HyperGraph,
    self_links: bool,
    parallel: bool,
) -> Result<MultilayerNetwork, HmError> {
    debug!(self_links, parallel, "building multilayer random walk");
    let transition = Transition::new(graph);

    let per_layer = map_items(graph.edges(), parallel, |e1| {
        let mut out = Vec::new();
        for &u in &e1.nodes {
            for e2_id in transition.incidence().edges_of(u) {
                let e2 = transition.edge(e2_id)?;
                for &v in &e2.nodes {
                    if !self_links && u == v {
                        continue;
                    }
                    let weight = transition.p(e1, u, e2, v, self_links)?;
                    if is_negligible(weight) {
                        continue;
                    }
                    out.push(MultilayerLink {
                        layer1: e1.id,
                        node1: u,
                        layer2: e2.id,
                        node2: v,
                        weight,
                    });
                }
            }
        }
        Ok(out)
    })?;

    Ok(finish(graph, per_layer, "multilayer random walk ready"))
}

/// Multilayer network of the similarity walk.
///
/// Leaving layer `e1` from `u`, the walk picks `e2 ∋ u` proportionally to
/// `sim(e1, e2)·ω(e2)` and then `v ∈ e2` proportionally to `γ_{e2}(v)`.
pub fn multilayer_similarity_walk(
    graph: &HyperGraph,
    self_links: bool,
    similarity: SimilarityKind,
    parallel: bool,
) -> Result<MultilayerNetwork, HmError> {
    debug!(self_links, parallel, ?similarity, "building multilayer similarity walk");
    let transition = Transition::new(graph);
    let measure = similarity.build(transition.gamma());
    let matrix =
        SimilarityMatrix::overlapping(graph.edges(), transition.incidence(), measure.as_ref())?;

    let per_layer = map_items(graph.edges(), parallel, |e1| {
        let mut out = Vec::new();
        for &u in &e1.nodes {
            let incident = transition
                .incidence()
                .edges_of(u)
                .map(|id| transition.edge(id))
                .collect::<Result<Vec<&HyperEdge>, HmError>>()?;
            let j_alpha: f64 = incident
                .iter()
                .map(|beta| matrix.get(e1.id, beta.id) * beta.omega)
                .sum();
            if j_alpha <= 0.0 {
                continue;
            }

            for e2 in incident {
                let j_alpha_beta = matrix.get(e1.id, e2.id);
                let delta_e = transition.normalizer(e2, u, self_links)?;
                if delta_e <= 0.0 {
                    continue;
                }
                for &v in &e2.nodes {
                    if !self_links && u == v {
                        continue;
                    }
                    let weight = j_alpha_beta * e2.omega / j_alpha
                        * transition.gamma().get(e2.id, v)?
                        / delta_e;
                    if is_negligible(weight) {
                        continue;
                    }
                    out.push(MultilayerLink {
                        layer1: e1.id,
                        node1: u,
                        layer2: e2.id,
                        node2: v,
                        weight,
                    });
                }
            }
        }
        Ok(out)
    })?;

    Ok(finish(graph, per_layer, "multilayer similarity walk ready"))
}

fn finish(
    graph: &HyperGraph,
    per_layer: Vec<Vec<MultilayerLink>>,
    message: &str,
) -> MultilayerNetwork {
    let links = per_layer.into_iter().flatten().collect();
    let network = MultilayerNetwork::from_links(graph.nodes().to_vec(), links);
    info!(
        nodes = network.nodes.len(),
        intra = network.intra.len(),
        inter = network.inter.len(),
        "{message}"
    );
    network
}
