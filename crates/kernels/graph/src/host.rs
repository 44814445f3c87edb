//! The host graph interface.
//!
//! The engine never owns graph state. It drives whatever dataflow graph the
//! host runtime exposes through [`HostGraph`], one mutation at a time, and
//! propagates host failures unchanged.

use rigmath_foundation::Value;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, LookupError};
use crate::handle::LiveHandle;
use crate::ids::{NodeId, PortRef};

/// A value written directly onto a node input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Static {
    /// Boolean attribute.
    Bool(bool),
    /// Integer or enum attribute.
    Int(i64),
    /// Numeric value of any supported kind.
    Value(Value),
}

impl Static {
    /// Numeric view: booleans and integers read as scalars.
    pub fn as_value(&self) -> Value {
        match *self {
            Static::Bool(b) => Value::Scalar(if b { 1.0 } else { 0.0 }),
            Static::Int(i) => Value::Scalar(i as f64),
            Static::Value(v) => v,
        }
    }

    /// Integer view, truncating scalars.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Static::Bool(b) => Some(b as i64),
            Static::Int(i) => Some(i),
            Static::Value(Value::Scalar(v)) => Some(v as i64),
            Static::Value(_) => None,
        }
    }

    /// Boolean view: non-zero integers and scalars are true.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_int().map(|i| i != 0)
    }
}

impl From<bool> for Static {
    fn from(b: bool) -> Self {
        Static::Bool(b)
    }
}

impl From<i64> for Static {
    fn from(i: i64) -> Self {
        Static::Int(i)
    }
}

impl From<f64> for Static {
    fn from(v: f64) -> Self {
        Static::Value(Value::Scalar(v))
    }
}

impl From<Value> for Static {
    fn from(v: Value) -> Self {
        Static::Value(v)
    }
}

/// Operations the engine needs from a host dataflow graph.
pub trait HostGraph {
    /// Allocate a node. The host may adjust `name` to keep it unique.
    fn create_node(&mut self, node_type: &str, name: &str) -> Result<NodeId, GraphError>;

    /// Write a constant onto an input port.
    fn set_static_input(&mut self, port: &PortRef, value: Static) -> Result<(), GraphError>;

    /// Drive `dest` from `source`.
    fn connect(&mut self, source: &PortRef, dest: &PortRef) -> Result<(), GraphError>;

    /// Reference to an output port of `node`.
    fn output(&self, node: &NodeId, port: &str) -> Result<PortRef, GraphError> {
        Ok(node.port(port))
    }

    /// Reference to lane `index` of a compound output port.
    ///
    /// Defaults to the `X`/`Y`/`Z`/`W` child naming of [`PortRef::lane`].
    fn lane(&self, port: &PortRef, index: usize) -> Result<PortRef, GraphError> {
        port.lane(index).ok_or_else(|| GraphError::NoSuchLane {
            port: port.clone(),
            index,
        })
    }

    /// Resolve a textual attribute identifier into a live handle.
    fn resolve(&self, identifier: &str) -> Result<LiveHandle, LookupError>;
}
