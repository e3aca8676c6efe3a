#![deny(missing_docs)]
#![doc = "Library side of the `hypermap` binary: run configuration, the `build` and \
`reconcile` commands and logging setup."]

/// Subcommand implementations.
pub mod commands;
/// YAML run configuration.
pub mod config;
/// Tracing subscriber installation.
pub mod logging;

pub use commands::build::{run_build, BuildArgs, BuildOutcome};
pub use commands::reconcile::{run_reconcile, ReconcileArgs, ReconcileReport, TreeReport};
pub use config::{load_run_config, OutputOptions, RunConfig};
