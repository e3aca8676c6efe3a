use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Args;
use hm_core::errors::HmError;
use hm_graph::{canonical_hash, graph_from_json, preprocess};
use hm_repr::build;
use tracing::info;

use super::{io_error, read_text, write_text};
use crate::config::load_run_config;

/// Arguments of `hypermap build`.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Hypergraph in JSON form.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination `.net` file.
    #[arg(long)]
    pub out: PathBuf,
}

/// What a build run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Written `.net` file.
    pub network: PathBuf,
    /// Written JSON file, when requested.
    pub json: Option<PathBuf>,
    /// Canonical hash of the preprocessed hypergraph.
    pub hash: String,
}

/// Loads, preprocesses and converts a hypergraph, then writes the network.
pub fn run_build(args: &BuildArgs) -> Result<BuildOutcome, HmError> {
    let config = load_run_config(&args.config)?;
    let graph = graph_from_json(&read_text(&args.input)?)
        .map_err(|err| err.with_context("path", args.input.display()))?;
    let input_nodes = graph.nodes().len();
    let graph = preprocess(graph, &config.preprocess)?;
    let hash = canonical_hash(&graph);
    info!(
        input_nodes,
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        %hash,
        "hypergraph loaded"
    );

    let representation = build(&graph, &config.build)?;
    let header = vec![
        format!("{} from hypermap", representation.kind()),
        format!("config: {}", config.build.describe()),
        format!("hypergraph sha256 {hash}"),
        format!(
            "{} nodes, {} links",
            representation.nodes().len(),
            representation.link_count()
        ),
    ];
    write_network(&args.out, |sink| representation.write_with_header(sink, &header))?;

    let json = if config.output.write_json {
        let path = args.out.with_extension("json");
        write_text(&path, &representation.to_json()?)?;
        Some(path)
    } else {
        None
    };

    info!(out = %args.out.display(), "network written");
    Ok(BuildOutcome {
        network: args.out.clone(),
        json,
        hash,
    })
}

fn write_network(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<(), HmError>,
) -> Result<(), HmError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| io_error("create-dir", parent, err))?;
    }
    let file = File::create(path).map_err(|err| io_error("create-output", path, err))?;
    let mut sink = BufWriter::new(file);
    write(&mut sink)
}
