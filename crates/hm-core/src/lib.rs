#![deny(missing_docs)]
#![doc = "Core value types for hypermap: nodes, hyperedges with edge-dependent vertex \
weights, the validated hypergraph that bundles them, and the shared error model."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
mod hypergraph;

pub use errors::{ErrorInfo, HmError};
pub use hypergraph::{Gamma, HyperEdge, HyperGraph, Node};

macro_rules! raw_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from its raw integer representation.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw integer representation of the identifier.
            pub const fn as_raw(&self) -> u64 {
                self.0
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

raw_id!(
    /// Identifier of a physical node. Assigned externally and never reused.
    NodeId
);

raw_id!(
    /// Identifier of a hyperedge. In multilayer networks it doubles as the layer id.
    EdgeId
);

raw_id!(
    /// Identifier of a state node, allocated monotonically within a single build.
    StateId
);
