use std::error::Error;

use clap::{Parser, Subcommand};
use hm_cli::{logging, run_build, run_reconcile, BuildArgs, ReconcileArgs};

#[derive(Parser, Debug)]
#[command(
    name = "hypermap",
    about = "Hypergraph to network representations and partition reconciliation"
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a network representation of a hypergraph.
    Build(BuildArgs),
    /// Align partition trees with a ground-truth tree.
    Reconcile(ReconcileArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_json);
    match cli.command {
        Command::Build(args) => {
            let outcome = run_build(&args)?;
            println!("{}", outcome.network.display());
            if let Some(json) = outcome.json {
                println!("{}", json.display());
            }
        }
        Command::Reconcile(args) => {
            let report = run_reconcile(&args)?;
            for tree in report.trees {
                println!(
                    "{}: {} -> {} leaves, aligned: {}",
                    tree.file, tree.nodes_before, tree.nodes_after, tree.labels_aligned
                );
            }
        }
    }
    Ok(())
}
