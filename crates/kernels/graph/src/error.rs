//! Host graph errors.

use thiserror::Error;

use crate::ids::{NodeId, PortRef};

/// Failure reported by a host graph mutation.
///
/// The engine propagates these unmodified.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// The host refused to create a node.
    #[error("cannot create {node_type} node `{name}`: {reason}")]
    CreateFailed {
        /// Requested node type.
        node_type: String,
        /// Requested name.
        name: String,
        /// Host explanation.
        reason: String,
    },

    /// A referenced node does not exist.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The host refused a connection.
    #[error("cannot connect {from} -> {to}: {reason}")]
    ConnectFailed {
        /// Source port.
        from: PortRef,
        /// Destination port.
        to: PortRef,
        /// Host explanation.
        reason: String,
    },

    /// A port has no lane at the requested index.
    #[error("{port} has no lane {index}")]
    NoSuchLane {
        /// Compound port.
        port: PortRef,
        /// Requested lane.
        index: usize,
    },

    /// The graph does not accept mutations.
    #[error("no host graph attached")]
    Detached,
}

/// Failure resolving a textual attribute identifier.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    /// Nothing matches the identifier.
    #[error("no attribute named `{0}`")]
    NotFound(String),
}
