use std::collections::{BTreeMap, HashMap};

use hm_core::errors::{ErrorInfo, HmError};
use serde::{Deserialize, Serialize};

use crate::tree::TreeNode;

/// Granularity at which module labels are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    /// The first path entry.
    #[default]
    TopModule,
    /// The full module path above the leaf.
    LeafModule,
}

fn module_label(node: &TreeNode, level: Level) -> String {
    match level {
        Level::TopModule => node.top_module().to_string(),
        Level::LeafModule => node.module(),
    }
}

/// One label per state, ordered by state key. Modules are numbered densely in
/// order of first appearance.
pub fn labels(nodes: &[TreeNode], level: Level) -> Vec<usize> {
    let by_state: BTreeMap<u64, String> = nodes
        .iter()
        .map(|node| (node.state_key(), module_label(node, level)))
        .collect();
    let mut dense: HashMap<String, usize> = HashMap::new();
    by_state
        .into_values()
        .map(|module| {
            let next = dense.len();
            *dense.entry(module).or_insert(next)
        })
        .collect()
}

/// Label vectors of two trees over the same states.
pub fn aligned_labels(
    a: &[TreeNode],
    b: &[TreeNode],
    level: Level,
) -> Result<(Vec<usize>, Vec<usize>), HmError> {
    let (left, right) = (labels(a, level), labels(b, level));
    if left.len() != right.len() {
        return Err(HmError::Partition(ErrorInfo::new(
            "label-mismatch",
            "trees describe different sets of states",
        ))
        .with_context("left", left.len())
        .with_context("right", right.len())
        .with_hint("reconcile the trees against a common ground truth first"));
    }
    Ok((left, right))
}
