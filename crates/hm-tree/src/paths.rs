use std::collections::HashMap;

use crate::tree::{TreeNode, TreePath};

/// Running leaf counter per module, used to give synthesized leaves fresh
/// paths next to an existing leaf.
#[derive(Debug, Clone, Default)]
pub struct LeafIndex {
    counters: HashMap<TreePath, u32>,
}

impl LeafIndex {
    /// Counter with every module empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter that already accounts for the leaves in `nodes`.
    pub fn seeded<'a>(nodes: impl IntoIterator<Item = &'a TreeNode>) -> Self {
        let mut index = Self::new();
        for node in nodes {
            index.next_path(node);
        }
        index
    }

    /// Next free path in the module of `node`.
    pub fn next_path(&mut self, node: &TreeNode) -> TreePath {
        let end = node.path.len().saturating_sub(1);
        let module = node.path[..end].to_vec();
        let counter = self.counters.entry(module.clone()).or_insert(0);
        *counter += 1;
        let mut path = module;
        path.push(*counter);
        path
    }
}
