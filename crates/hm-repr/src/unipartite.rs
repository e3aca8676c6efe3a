use hm_core::errors::HmError;
use hm_core::HyperGraph;
use hm_walk::{is_negligible, Transition, VisitRate};
use tracing::{debug, info};

use crate::links::LinkAccumulator;
use crate::map_items;
use crate::network::Network;

/// Directed unipartite network: `u -> v` carries `π(u)·p(e1, u, e2, v)` summed
/// over every hyperedge pair.
pub fn directed_unipartite(
    graph: &HyperGraph,
    self_links: bool,
    visit: &dyn VisitRate,
    parallel: bool,
) -> Result<Network, HmError> {
    debug!(self_links, parallel, "building directed unipartite network");
    let transition = Transition::new(graph);

    let contributions = map_items(graph.edges(), parallel, |e1| {
        let mut out = Vec::new();
        for &u in &e1.nodes {
            let pi_u = visit.rate(u)?;
            // p vanishes unless u is a member of e2.
            for e2_id in transition.incidence().edges_of(u) {
                let e2 = transition.edge(e2_id)?;
                for &v in &e2.nodes {
                    if !self_links && u == v {
                        continue;
                    }
                    let weight = pi_u * transition.p(e1, u, e2, v, self_links)?;
                    if is_negligible(weight) {
                        continue;
                    }
                    out.push((u, v, weight));
                }
            }
        }
        Ok(out)
    })?;

    let mut links = LinkAccumulator::new();
    for (u, v, weight) in contributions.into_iter().flatten() {
        links.add(u, v, weight);
    }

    let network = Network {
        nodes: graph.nodes().to_vec(),
        links: links.into_links(),
        directed: true,
    };
    info!(
        nodes = network.nodes.len(),
        links = network.links.len(),
        "directed unipartite network ready"
    );
    Ok(network)
}

/// Undirected clique network: one link per unordered vertex pair weighted by
/// `w(u, v)` with the full normaliser. Self-pairs are kept only with `self_links`.
pub fn undirected_unipartite(
    graph: &HyperGraph,
    self_links: bool,
    parallel: bool,
) -> Result<Network, HmError> {
    debug!(self_links, parallel, "building undirected unipartite network");
    let transition = Transition::new(graph);
    let nodes = graph.nodes();
    let indices: Vec<usize> = (0..nodes.len()).collect();

    let rows = map_items(&indices, parallel, |&i| {
        let u = nodes[i].id;
        let mut out = Vec::new();
        for other in &nodes[i..] {
            let v = other.id;
            if !self_links && u == v {
                continue;
            }
            let weight = transition.w(u, v, true)?;
            if is_negligible(weight) {
                continue;
            }
            out.push((u, v, weight));
        }
        Ok(out)
    })?;

    let mut links = LinkAccumulator::new();
    for (u, v, weight) in rows.into_iter().flatten() {
        links.add(u, v, weight);
    }

    let network = Network {
        nodes: nodes.to_vec(),
        links: links.into_links(),
        directed: false,
    };
    info!(
        nodes = network.nodes.len(),
        links = network.links.len(),
        "undirected unipartite network ready"
    );
    Ok(network)
}
