use std::io::Write;

use hm_core::errors::{ErrorInfo, HmError};
use hm_core::Node;

use crate::network::{Link, Representation, StateNode};

fn io_error(err: std::io::Error) -> HmError {
    HmError::Io(ErrorInfo::new("write-network", err.to_string()))
}

impl Representation {
    /// Writes the representation in the `.net` dialect.
    pub fn write<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), HmError> {
        self.write_with_header(sink, &[])
    }

    /// Writes the representation preceded by `#` comment lines.
    pub fn write_with_header<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        header: &[String],
    ) -> Result<(), HmError> {
        for line in header {
            writeln!(sink, "# {line}").map_err(io_error)?;
        }
        match self {
            Representation::Network(net) => {
                write_vertices(sink, &net.nodes, &[])?;
                write_links(sink, links_section(net.directed), &net.links)?;
            }
            Representation::StateNetwork(net) => {
                write_vertices(sink, &net.nodes, &[])?;
                write_states(sink, &net.states)?;
                write_links(sink, links_section(net.directed), &net.links)?;
            }
            Representation::Bipartite(net) => {
                write_vertices(sink, &net.nodes, &net.features)?;
                let start = net.bipartite_start_id().ok_or_else(no_features)?;
                write_links(sink, &format!("*Bipartite {start}"), &net.links)?;
            }
            Representation::BipartiteState(net) => {
                write_vertices(sink, &net.nodes, &net.features)?;
                write_states(sink, &net.states)?;
                let start = net.bipartite_start_id().ok_or_else(no_features)?;
                write_links(sink, &format!("*Bipartite {start}"), &net.links)?;
            }
            Representation::Multilayer(net) => {
                write_vertices(sink, &net.nodes, &[])?;
                writeln!(sink, "*Multilayer").map_err(io_error)?;
                for link in net.links() {
                    writeln!(
                        sink,
                        "{} {} {} {} {}",
                        link.layer1, link.node1, link.layer2, link.node2, link.weight
                    )
                    .map_err(io_error)?;
                }
            }
        }
        sink.flush().map_err(io_error)
    }

    /// Serializes the representation to pretty JSON.
    pub fn to_json(&self) -> Result<String, HmError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| HmError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
    }

    /// Restores a representation from JSON.
    pub fn from_json(json: &str) -> Result<Self, HmError> {
        serde_json::from_str(json)
            .map_err(|err| HmError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))
    }
}

fn links_section(directed: bool) -> &'static str {
    if directed {
        "*Links"
    } else {
        "*Edges"
    }
}

fn no_features() -> HmError {
    HmError::Representation(ErrorInfo::new(
        "empty-features",
        "bipartite network without feature nodes",
    ))
}

fn write_vertices<W: Write + ?Sized>(
    sink: &mut W,
    nodes: &[Node],
    features: &[Node],
) -> Result<(), HmError> {
    writeln!(sink, "*Vertices").map_err(io_error)?;
    for node in nodes.iter().chain(features) {
        writeln!(sink, "{} \"{}\"", node.id, node.name).map_err(io_error)?;
    }
    Ok(())
}

fn write_states<W: Write + ?Sized>(sink: &mut W, states: &[StateNode]) -> Result<(), HmError> {
    writeln!(sink, "*States").map_err(io_error)?;
    for state in states {
        writeln!(sink, "{} {}", state.state_id, state.node_id).map_err(io_error)?;
    }
    Ok(())
}

fn write_links<W: Write + ?Sized, I: std::fmt::Display>(
    sink: &mut W,
    section: &str,
    links: &[Link<I>],
) -> Result<(), HmError> {
    writeln!(sink, "{section}").map_err(io_error)?;
    for link in links {
        writeln!(sink, "{} {} {}", link.source, link.target, link.weight).map_err(io_error)?;
    }
    Ok(())
}
