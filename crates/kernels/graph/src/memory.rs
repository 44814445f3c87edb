//! In-memory hosts.
//!
//! [`MemoryGraph`] records every node, static input and connection it is
//! asked for, which makes synthesized fragments inspectable and evaluable
//! without a real host. Attributes are declared up front with a value and
//! resolve by name. [`NullGraph`] rejects every mutation and is used where
//! only concrete arithmetic is expected.

use indexmap::IndexMap;
use rigmath_foundation::{UnitType, Value};
use tracing::trace;

use crate::error::{GraphError, LookupError};
use crate::handle::LiveHandle;
use crate::host::{HostGraph, Static};
use crate::ids::{NodeId, PortRef};

/// Node type used for declared attributes.
pub const ATTRIBUTE_NODE: &str = "attribute";

/// Port holding a declared attribute's value.
pub const ATTRIBUTE_VALUE: &str = "value";

/// Everything recorded about one node.
#[derive(Debug, Clone, Default)]
pub struct NodeRecord {
    /// Host node type.
    pub node_type: String,
    /// Constants written onto input ports.
    pub statics: IndexMap<String, Static>,
    /// Incoming connections, keyed by destination port.
    pub inputs: IndexMap<String, PortRef>,
}

/// Recording host graph.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: IndexMap<NodeId, NodeRecord>,
    attributes: IndexMap<String, LiveHandle>,
    rejected: Vec<String>,
}

impl MemoryGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute holding `value`, resolvable as `name`.
    pub fn declare(&mut self, name: &str, value: Value) -> LiveHandle {
        self.declare_with_unit(name, value, UnitType::None)
    }

    /// Declare an attribute carrying unit metadata.
    pub fn declare_with_unit(&mut self, name: &str, value: Value, unit: UnitType) -> LiveHandle {
        let id = self.unique_id(name);
        let mut record = NodeRecord {
            node_type: ATTRIBUTE_NODE.to_string(),
            ..NodeRecord::default()
        };
        record
            .statics
            .insert(ATTRIBUTE_VALUE.to_string(), Static::Value(value));
        self.nodes.insert(id.clone(), record);
        let handle = LiveHandle::new(id.port(ATTRIBUTE_VALUE), value.kind(), unit);
        self.attributes.insert(name.to_string(), handle.clone());
        handle
    }

    /// Make every later `create_node` of `node_type` fail.
    pub fn reject_node_type(&mut self, node_type: &str) {
        self.rejected.push(node_type.to_string());
    }

    /// Record for a node.
    pub fn node(&self, id: &NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &NodeRecord)> {
        self.nodes.iter()
    }

    /// Number of nodes created through [`HostGraph::create_node`].
    pub fn operator_node_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.node_type != ATTRIBUTE_NODE)
            .count()
    }

    /// Number of nodes of one type.
    pub fn count_of_type(&self, node_type: &str) -> usize {
        self.nodes
            .values()
            .filter(|n| n.node_type == node_type)
            .count()
    }

    /// Connection driving `port`, if any.
    pub fn source_of(&self, port: &PortRef) -> Option<&PortRef> {
        self.nodes.get(&port.node)?.inputs.get(&port.port)
    }

    /// Constant written onto `port`, if any.
    pub fn static_of(&self, port: &PortRef) -> Option<&Static> {
        self.nodes.get(&port.node)?.statics.get(&port.port)
    }

    fn unique_id(&self, name: &str) -> NodeId {
        let base = if name.is_empty() { "node" } else { name };
        if !self.nodes.contains_key(&NodeId::new(base)) {
            return NodeId::new(base);
        }
        (1..)
            .map(|i| NodeId::new(format!("{base}{i}")))
            .find(|id| !self.nodes.contains_key(id))
            .unwrap_or_else(|| NodeId::new(base))
    }

    fn record_mut(&mut self, id: &NodeId) -> Result<&mut NodeRecord, GraphError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::UnknownNode(id.clone()))
    }
}

impl HostGraph for MemoryGraph {
    fn create_node(&mut self, node_type: &str, name: &str) -> Result<NodeId, GraphError> {
        if self.rejected.iter().any(|t| t == node_type) {
            return Err(GraphError::CreateFailed {
                node_type: node_type.to_string(),
                name: name.to_string(),
                reason: "node type rejected by host".to_string(),
            });
        }
        let id = self.unique_id(name);
        trace!(%id, node_type, "create node");
        self.nodes.insert(
            id.clone(),
            NodeRecord {
                node_type: node_type.to_string(),
                ..NodeRecord::default()
            },
        );
        Ok(id)
    }

    fn set_static_input(&mut self, port: &PortRef, value: Static) -> Result<(), GraphError> {
        let record = self.record_mut(&port.node)?;
        record.statics.insert(port.port.clone(), value);
        Ok(())
    }

    fn connect(&mut self, source: &PortRef, dest: &PortRef) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&source.node) {
            return Err(GraphError::UnknownNode(source.node.clone()));
        }
        if source.node == dest.node {
            return Err(GraphError::ConnectFailed {
                from: source.clone(),
                to: dest.clone(),
                reason: "a node cannot drive itself".to_string(),
            });
        }
        let record = self.record_mut(&dest.node)?;
        record.inputs.insert(dest.port.clone(), source.clone());
        Ok(())
    }

    fn resolve(&self, identifier: &str) -> Result<LiveHandle, LookupError> {
        self.attributes
            .get(identifier)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(identifier.to_string()))
    }
}

/// Host that refuses all mutations and resolves nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullGraph;

impl HostGraph for NullGraph {
    fn create_node(&mut self, _node_type: &str, _name: &str) -> Result<NodeId, GraphError> {
        Err(GraphError::Detached)
    }

    fn set_static_input(&mut self, _port: &PortRef, _value: Static) -> Result<(), GraphError> {
        Err(GraphError::Detached)
    }

    fn connect(&mut self, _source: &PortRef, _dest: &PortRef) -> Result<(), GraphError> {
        Err(GraphError::Detached)
    }

    fn resolve(&self, identifier: &str) -> Result<LiveHandle, LookupError> {
        Err(LookupError::NotFound(identifier.to_string()))
    }
}
