//! Node and port identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Host-assigned node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

/// A port on a node, written `node.port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// Owning node.
    pub node: NodeId,
    /// Port name, possibly compound (`input3D[0].input3Dx`).
    pub port: String,
}

impl NodeId {
    /// Create an id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reference to a port on this node.
    pub fn port(&self, port: impl Into<String>) -> PortRef {
        PortRef {
            node: self.clone(),
            port: port.into(),
        }
    }
}

/// Suffixes naming the lanes of a compound port.
const LANE_SUFFIXES: [char; 4] = ['X', 'Y', 'Z', 'W'];

impl PortRef {
    /// Child port carrying lane `index` (`translate` -> `translateX`).
    pub fn lane(&self, index: usize) -> Option<PortRef> {
        let suffix = LANE_SUFFIXES.get(index)?;
        Some(self.node.port(format!("{}{suffix}", self.port)))
    }

    /// The compound port and lane index of a child port made by
    /// [`PortRef::lane`].
    pub fn split_lane(&self) -> Option<(PortRef, usize)> {
        let last = self.port.chars().last()?;
        let index = LANE_SUFFIXES.iter().position(|c| *c == last)?;
        let parent = &self.port[..self.port.len() - last.len_utf8()];
        if parent.is_empty() {
            return None;
        }
        Some((self.node.port(parent), index))
    }

    /// Parse `node.port`, splitting at the first dot.
    pub fn parse(s: &str) -> Option<Self> {
        let (node, port) = s.split_once('.')?;
        if node.is_empty() || port.is_empty() {
            return None;
        }
        Some(NodeId::new(node).port(port))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.port)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
