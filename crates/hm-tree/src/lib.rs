#![deny(missing_docs)]

//! Partition trees returned by a community-detection solver, and the tools
//! that make trees from different representations comparable: state-id
//! reconciliation against a ground truth, label alignment and module
//! statistics.

mod labels;
mod paths;
mod reconcile;
mod stats;
mod tree;

pub use labels::{aligned_labels, labels, Level};
pub use paths::LeafIndex;
pub use reconcile::{match_ids, reconcile, ReconcileOptions};
pub use stats::{entropy, perplexity};
pub use tree::{is_feature_node, Tree, TreeNode, TreePath};
