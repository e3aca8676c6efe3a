use std::path::PathBuf;

use clap::Args;
use hm_core::errors::{ErrorInfo, HmError};
use hm_tree::{aligned_labels, match_ids, Level, ReconcileOptions, Tree};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{read_text, write_text};

/// Arguments of `hypermap reconcile`.
#[derive(Args, Debug, Clone)]
pub struct ReconcileArgs {
    /// Ground-truth tree (JSON).
    #[arg(long)]
    pub ground_truth: PathBuf,
    /// Trees to align with the ground truth (JSON).
    #[arg(long, num_args = 1.., required = true)]
    pub trees: Vec<PathBuf>,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
    /// Fail on nodes the ground truth does not know.
    #[arg(long)]
    pub strict: bool,
}

/// Per-tree outcome of a reconcile run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeReport {
    /// Input file name.
    pub file: String,
    /// Leaves before reconciliation.
    pub nodes_before: usize,
    /// Leaves after reconciliation.
    pub nodes_after: usize,
    /// Distinct top modules after reconciliation.
    pub top_modules: usize,
    /// Whether the reconciled tree covers the same states as the ground truth.
    pub labels_aligned: bool,
}

/// Summary written to `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Ground-truth file name.
    pub ground_truth: String,
    /// One entry per input tree, in argument order.
    pub trees: Vec<TreeReport>,
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_tree(path: &std::path::Path) -> Result<Tree, HmError> {
    let mut tree = Tree::from_json(&read_text(path)?)
        .map_err(|err| err.with_context("path", path.display()))?;
    if tree.name.is_none() {
        tree.name = Some(file_name(path));
    }
    Ok(tree)
}

/// Aligns every tree with the ground truth and writes the results to `out`.
///
/// Label mismatches are reported in the summary rather than failing the run.
pub fn run_reconcile(args: &ReconcileArgs) -> Result<ReconcileReport, HmError> {
    let ground_truth = load_tree(&args.ground_truth)?;
    let trees = args
        .trees
        .iter()
        .map(|path| load_tree(path))
        .collect::<Result<Vec<_>, _>>()?;

    let options = ReconcileOptions {
        strict: args.strict,
    };
    let reconciled = match_ids(&ground_truth, &trees, options)?;

    let mut reports = Vec::with_capacity(trees.len());
    for ((path, before), after) in args.trees.iter().zip(&trees).zip(&reconciled) {
        let labels_aligned =
            match aligned_labels(&ground_truth.nodes, &after.nodes, Level::TopModule) {
                Ok(_) => true,
                Err(err) => {
                    warn!(tree = %path.display(), error = %err, "labels not comparable");
                    false
                }
            };
        let file = file_name(path);
        write_text(&args.out.join(&file), &after.to_json()?)?;
        reports.push(TreeReport {
            file,
            nodes_before: before.nodes.len(),
            nodes_after: after.nodes.len(),
            top_modules: after.top_modules().len(),
            labels_aligned,
        });
    }

    let report = ReconcileReport {
        ground_truth: file_name(&args.ground_truth),
        trees: reports,
    };
    let summary = serde_json::to_string_pretty(&report).map_err(|err| {
        HmError::Serde(ErrorInfo::new("serialize-json", err.to_string()))
    })?;
    write_text(&args.out.join("summary.json"), &summary)?;
    info!(trees = report.trees.len(), out = %args.out.display(), "trees reconciled");
    Ok(report)
}
