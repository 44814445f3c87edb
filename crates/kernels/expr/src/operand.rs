//! The operand sum type every operator is written against.

use std::fmt;

use rigmath_foundation::{Dimension, Kind, UnitType, Value};
use rigmath_graph::LiveHandle;

/// A concrete value or a live graph output.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Known now.
    Concrete(Value),
    /// Known when the host graph evaluates.
    Live(LiveHandle),
}

impl Operand {
    /// Semantic tag.
    pub fn kind(&self) -> Kind {
        match self {
            Operand::Concrete(v) => v.kind(),
            Operand::Live(h) => h.kind(),
        }
    }

    /// Lane count.
    pub fn dimension(&self) -> Dimension {
        self.kind().dimension()
    }

    /// Unit metadata. Concrete euler values are angles; other concrete
    /// values are unitless.
    pub fn unit(&self) -> UnitType {
        match self {
            Operand::Concrete(Value::Euler(_)) => UnitType::Angle,
            Operand::Concrete(_) => UnitType::None,
            Operand::Live(h) => h.unit(),
        }
    }

    /// Whether the operand lives in the host graph.
    pub fn is_live(&self) -> bool {
        matches!(self, Operand::Live(_))
    }

    /// Concrete value, if known.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Operand::Concrete(v) => Some(v),
            Operand::Live(_) => None,
        }
    }

    /// Live handle, if live.
    pub fn as_live(&self) -> Option<&LiveHandle> {
        match self {
            Operand::Concrete(_) => None,
            Operand::Live(h) => Some(h),
        }
    }

    /// Concrete scalar, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_scalar)
    }

    /// Concrete triple, if this is one.
    pub fn as_triple(&self) -> Option<[f64; 3]> {
        self.as_value().and_then(Value::as_triple)
    }

    /// Concrete matrix, if this is one.
    pub fn as_matrix(&self) -> Option<[f64; 16]> {
        self.as_value().and_then(Value::as_matrix)
    }

    /// Concrete quaternion, if this is one.
    pub fn as_quat(&self) -> Option<[f64; 4]> {
        self.as_value().and_then(Value::as_quat)
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Concrete(v)
    }
}

impl From<LiveHandle> for Operand {
    fn from(h: LiveHandle) -> Self {
        Operand::Live(h)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Concrete(v) => write!(f, "{} {:?}", v.kind(), v.components()),
            Operand::Live(h) => write!(f, "{h}"),
        }
    }
}
