use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Write;

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::{EdgeId, NodeId, StateId};
use hm_repr::StateNode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::paths::LeafIndex;
use crate::stats::perplexity;

/// Module indices from the root to a leaf; the last entry is the leaf's rank
/// inside its module.
pub type TreePath = Vec<u32>;

/// A leaf of a partition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Path from the root, e.g. `[1, 3, 2]`.
    pub path: TreePath,
    /// Stationary flow of the leaf.
    pub flow: f64,
    /// Display name.
    pub name: String,
    /// Physical node id.
    pub id: NodeId,
    /// State id, when the tree was built from a state network.
    #[serde(default)]
    pub state_id: Option<StateId>,
    /// Layer id, when the tree was built from a multilayer network.
    #[serde(default)]
    pub layer_id: Option<EdgeId>,
}

impl TreeNode {
    /// Creates a leaf without state or layer.
    pub fn new(path: TreePath, flow: f64, name: impl Into<String>, id: NodeId) -> Self {
        Self {
            path,
            flow,
            name: name.into(),
            id,
            state_id: None,
            layer_id: None,
        }
    }

    /// First path entry; 0 for an empty path.
    pub fn top_module(&self) -> u32 {
        self.path.first().copied().unwrap_or_default()
    }

    /// Depth of the leaf, i.e. the path length.
    pub fn level(&self) -> usize {
        self.path.len()
    }

    /// Path of the enclosing module, e.g. `"1:3"` for `[1, 3, 2]`.
    pub fn module(&self) -> String {
        let end = self.path.len().saturating_sub(1);
        self.path[..end]
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Identity used to align leaves across trees: the state id when present,
    /// the physical id otherwise.
    pub fn state_key(&self) -> u64 {
        self.state_id
            .map(|s| s.as_raw())
            .unwrap_or_else(|| self.id.as_raw())
    }
}

/// Whether a leaf name marks a bipartite feature node.
pub fn is_feature_node(name: &str) -> bool {
    name.to_lowercase().contains("hyperedge")
}

/// A flat arena of tree leaves plus solver metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Leaves, normally sorted by path.
    pub nodes: Vec<TreeNode>,
    /// Built from a bipartite representation.
    #[serde(default)]
    pub is_bipartite: bool,
    /// Built from a multilayer representation.
    #[serde(default)]
    pub is_multilayer: bool,
    /// Label used in reports.
    #[serde(default)]
    pub name: Option<String>,
    /// Codelength reported by the solver, in bits.
    #[serde(default)]
    pub codelength: Option<f64>,
    /// Number of hierarchical levels reported by the solver.
    #[serde(default)]
    pub levels: Option<u32>,
    /// Number of top modules reported by the solver.
    #[serde(default)]
    pub num_top_modules: Option<u32>,
}

impl Tree {
    /// Wraps `nodes` in a flat, unnamed tree.
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    /// Drops feature nodes of bipartite trees.
    pub fn without_feature_nodes(mut self) -> Self {
        self.nodes.retain(|node| !is_feature_node(&node.name));
        self
    }

    /// Sorts leaves by path; equal paths keep their order.
    pub fn sort_by_path(&mut self) {
        self.nodes.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Distinct top modules.
    pub fn top_modules(&self) -> BTreeSet<u32> {
        self.nodes.iter().map(TreeNode::top_module).collect()
    }

    /// Total flow of all leaves.
    pub fn total_flow(&self) -> f64 {
        self.nodes.iter().map(|node| node.flow).sum()
    }

    /// Number of distinct modules each physical node is assigned to, largest first.
    pub fn assignments(&self) -> Vec<usize> {
        let mut modules: HashMap<NodeId, BTreeSet<String>> = HashMap::new();
        for node in &self.nodes {
            modules.entry(node.id).or_default().insert(node.module());
        }
        let mut counts: Vec<usize> = modules.values().map(BTreeSet::len).collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts
    }

    /// Perplexity of each physical node's leaf counts over modules, largest first.
    pub fn effective_assignments(&self) -> Vec<f64> {
        let mut modules: HashMap<NodeId, BTreeMap<String, usize>> = HashMap::new();
        for node in &self.nodes {
            *modules
                .entry(node.id)
                .or_default()
                .entry(node.module())
                .or_insert(0) += 1;
        }
        let mut effective: Vec<f64> = modules
            .values()
            .map(|counts| {
                let counts: Vec<f64> = counts.values().map(|count| *count as f64).collect();
                perplexity(&counts)
            })
            .collect();
        effective.sort_unstable_by(|a, b| b.total_cmp(a));
        effective
    }

    /// Top module of every state whose physical node appears in the tree.
    pub fn initial_partition(&self, states: &[StateNode]) -> BTreeMap<StateId, u32> {
        let by_id = self.leaves_by_id();
        states
            .iter()
            .filter_map(|state| {
                by_id
                    .get(&state.node_id)
                    .map(|node| (state.state_id, node.top_module()))
            })
            .collect()
    }

    /// Lifts a physical-node partition onto `states`: each state becomes a
    /// zero-flow leaf in the module of its physical node.
    pub fn cluster_data(&self, states: &[StateNode]) -> Tree {
        let by_id = self.leaves_by_id();
        let mut index = LeafIndex::new();
        let mut nodes: Vec<TreeNode> = states
            .iter()
            .filter_map(|state| {
                let leaf = by_id.get(&state.node_id)?;
                Some(TreeNode {
                    path: index.next_path(leaf),
                    flow: 0.0,
                    name: leaf.name.clone(),
                    id: state.node_id,
                    state_id: Some(state.state_id),
                    layer_id: None,
                })
            })
            .collect();
        nodes.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(states = states.len(), leaves = nodes.len(), "cluster data ready");
        Tree::new(nodes)
    }

    /// Writes one line per leaf: `path flow "name" state_id id`.
    pub fn write<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), HmError> {
        for node in &self.nodes {
            let path = node
                .path
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(":");
            writeln!(
                sink,
                "{} {} \"{}\" {} {}",
                path,
                node.flow,
                node.name,
                node.state_key(),
                node.id
            )
            .map_err(|err| HmError::Io(ErrorInfo::new("write-tree", err.to_string())))?;
        }
        Ok(())
    }

    /// Serializes the tree to pretty JSON.
    pub fn to_json(&self) -> Result<String, HmError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| HmError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
    }

    /// Restores a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, HmError> {
        serde_json::from_str(json)
            .map_err(|err| HmError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))
    }

    /// Last leaf per physical id, as a dict keyed by id would hold it.
    fn leaves_by_id(&self) -> HashMap<NodeId, &TreeNode> {
        self.nodes.iter().map(|node| (node.id, node)).collect()
    }
}
