use std::collections::{BTreeMap, BTreeSet, HashMap};

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{EdgeId, NodeId, StateId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::paths::LeafIndex;
use crate::tree::{Tree, TreeNode};

/// Relative tolerance under which a target flow counts as equal to the summed
/// ground-truth state flows.
const FLOW_TOLERANCE: f64 = 0.01;

/// Reconciliation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileOptions {
    /// Fail on leaves the ground truth does not know instead of skipping them.
    #[serde(default)]
    pub strict: bool,
}

fn is_close(a: f64, b: f64, rel_tol: f64) -> bool {
    (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}

fn partition_error(code: &str, message: &str, node: &TreeNode) -> HmError {
    HmError::Partition(ErrorInfo::new(code, message))
        .with_context("node", node.id)
        .with_context("name", &node.name)
}

/// Aligns the state ids of `target` with `ground_truth`, returning a new tree.
///
/// Multilayer targets look their states up by (node, layer); ground-truth
/// states the target lacks become zero-flow leaves, each in a fresh top
/// module. Flat targets get one leaf per ground-truth state of their physical
/// node. The result is sorted by path.
pub fn reconcile(
    ground_truth: &Tree,
    target: &Tree,
    options: ReconcileOptions,
) -> Result<Tree, HmError> {
    let mut reconciled = if target.is_multilayer {
        match_multilayer(ground_truth, target, options)?
    } else {
        match_flat(ground_truth, target, options)?
    };
    reconciled.sort_by_path();
    debug!(
        before = target.nodes.len(),
        after = reconciled.nodes.len(),
        multilayer = target.is_multilayer,
        "tree reconciled"
    );
    Ok(reconciled)
}

/// Reconciles every tree in `trees` against `ground_truth`.
pub fn match_ids(
    ground_truth: &Tree,
    trees: &[Tree],
    options: ReconcileOptions,
) -> Result<Vec<Tree>, HmError> {
    trees
        .iter()
        .map(|tree| reconcile(ground_truth, tree, options))
        .collect()
}

fn match_multilayer(
    ground_truth: &Tree,
    target: &Tree,
    options: ReconcileOptions,
) -> Result<Tree, HmError> {
    let by_layer: HashMap<(NodeId, Option<EdgeId>), Option<StateId>> = ground_truth
        .nodes
        .iter()
        .map(|node| ((node.id, node.layer_id), node.state_id))
        .collect();

    let mut nodes = Vec::with_capacity(target.nodes.len());
    for node in &target.nodes {
        let mut node = node.clone();
        match by_layer.get(&(node.id, node.layer_id)) {
            Some(state_id) => node.state_id = *state_id,
            None if options.strict => {
                return Err(partition_error(
                    "unknown-layer-node",
                    "(node, layer) pair is absent from the ground truth",
                    &node,
                )
                .with_context(
                    "layer",
                    node.layer_id.map(|l| l.to_string()).unwrap_or_default(),
                ))
            }
            None => warn!(node = %node.id, name = %node.name, "no ground-truth state for layer node"),
        }
        nodes.push(node);
    }

    let present: BTreeSet<StateId> = nodes.iter().filter_map(|node| node.state_id).collect();
    let first_free = nodes.iter().map(TreeNode::top_module).max().unwrap_or(0) + 1;

    let mut added = BTreeSet::new();
    let mut synthesized = 0u32;
    for missing in &ground_truth.nodes {
        let Some(state_id) = missing.state_id else {
            continue;
        };
        if present.contains(&state_id) || !added.insert(state_id) {
            continue;
        }
        nodes.push(TreeNode {
            path: vec![first_free + synthesized, 1],
            flow: 0.0,
            name: missing.name.clone(),
            id: missing.id,
            state_id: Some(state_id),
            layer_id: missing.layer_id,
        });
        synthesized += 1;
    }
    if synthesized > 0 {
        debug!(synthesized, first_free, "missing states placed in new top modules");
    }

    Ok(Tree {
        nodes,
        ..target.clone_metadata()
    })
}

fn match_flat(
    ground_truth: &Tree,
    target: &Tree,
    options: ReconcileOptions,
) -> Result<Tree, HmError> {
    let mut states: BTreeMap<NodeId, Vec<&TreeNode>> = BTreeMap::new();
    for node in &ground_truth.nodes {
        states.entry(node.id).or_default().push(node);
    }

    let mut index = LeafIndex::seeded(&target.nodes);
    let mut nodes = Vec::with_capacity(target.nodes.len());
    let mut extra = Vec::new();

    for original in &target.nodes {
        let mut node = original.clone();
        let Some((first, remaining)) = states.get(&node.id).and_then(|s| s.split_first()) else {
            if options.strict {
                return Err(partition_error(
                    "missing-state",
                    "physical node has no state in the ground truth",
                    &node,
                ));
            }
            warn!(node = %node.id, name = %node.name, "no ground-truth state for node");
            nodes.push(node);
            continue;
        };

        let total: f64 = std::iter::once(first)
            .chain(remaining)
            .map(|state| state.flow)
            .sum();
        let divide = !is_close(node.flow, total, FLOW_TOLERANCE);

        node.state_id = first.state_id;
        node.flow = if divide {
            node.flow / (remaining.len() + 1) as f64
        } else {
            first.flow
        };

        for state in remaining.iter() {
            extra.push(TreeNode {
                path: index.next_path(&node),
                flow: if divide { node.flow } else { state.flow },
                name: node.name.clone(),
                id: node.id,
                state_id: state.state_id,
                layer_id: None,
            });
        }
        nodes.push(node);
    }

    nodes.extend(extra);
    Ok(Tree {
        nodes,
        ..target.clone_metadata()
    })
}

impl Tree {
    fn clone_metadata(&self) -> Tree {
        Tree {
            nodes: Vec::new(),
            is_bipartite: self.is_bipartite,
            is_multilayer: self.is_multilayer,
            name: self.name.clone(),
            codelength: self.codelength,
            levels: self.levels,
            num_top_modules: self.num_top_modules,
        }
    }
}
