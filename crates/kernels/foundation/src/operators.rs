//! Operators understood by the expression engine.
//!
//! These enums are shared by the concrete evaluator, the node recipe table
//! and error reporting so that every layer names an operation the same way.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition: `a + b`.
    Add,
    /// Subtraction: `a - b`.
    Sub,
    /// Multiplication. Matrices multiply, quaternions compose, triples
    /// multiply lane-wise, and a triple times a matrix transforms it as a
    /// direction.
    Mul,
    /// Division: `a / b`.
    Div,
    /// Exponentiation: `a ** b`.
    Pow,
    /// Point transform: `point ^ matrix`, translation included.
    PointMatrixMul,
    /// Cross product of two triples.
    Cross,
    /// Dot product of two triples.
    Dot,
    /// Unsigned angle between two triples, in radians.
    AngleBetween,
    /// Quaternion from an axis (lhs) and an angle (rhs).
    AxisAngle,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Numeric negation: `-x`.
    Neg,
    /// Matrix or quaternion inverse.
    Inverse,
    /// Euclidean length of a triple.
    Length,
    /// Unit-length copy of a triple.
    Normalize,
    /// Rotation matrix of a quaternion.
    QuatToMatrix,
}

/// Either kind of operator, used as the recipe table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKey {
    /// Two-operand operator.
    Binary(Operator),
    /// One-operand operator.
    Unary(UnaryOp),
}

/// Comparison used by conditional selection.
///
/// Discriminants follow the host `condition` node's operation enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// `a == b`.
    Eq = 0,
    /// `a != b`.
    Ne = 1,
    /// `a > b`.
    Gt = 2,
    /// `a >= b`.
    Ge = 3,
    /// `a < b`.
    Lt = 4,
    /// `a <= b`.
    Le = 5,
}

impl Operator {
    /// Whether swapping the operands leaves the result unchanged for every
    /// supported dimension pair.
    pub fn is_commutative(self) -> bool {
        matches!(self, Operator::Add | Operator::Dot | Operator::AngleBetween)
    }

    /// Symbol or function name used in diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "**",
            Operator::PointMatrixMul => "^",
            Operator::Cross => "cross",
            Operator::Dot => "dot",
            Operator::AngleBetween => "angle_between",
            Operator::AxisAngle => "axis_angle",
        }
    }
}

impl UnaryOp {
    /// Symbol or function name used in diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "neg",
            UnaryOp::Inverse => "inverse",
            UnaryOp::Length => "length",
            UnaryOp::Normalize => "normal",
            UnaryOp::QuatToMatrix => "quat_to_matrix",
        }
    }
}

impl Comparison {
    /// Evaluate the comparison on two scalars.
    pub fn test(self, a: f64, b: f64) -> bool {
        match self {
            Comparison::Eq => a == b,
            Comparison::Ne => a != b,
            Comparison::Gt => a > b,
            Comparison::Ge => a >= b,
            Comparison::Lt => a < b,
            Comparison::Le => a <= b,
        }
    }

    /// Inverse of the host discriminant.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Comparison::Eq),
            1 => Some(Comparison::Ne),
            2 => Some(Comparison::Gt),
            3 => Some(Comparison::Ge),
            4 => Some(Comparison::Lt),
            5 => Some(Comparison::Le),
            _ => None,
        }
    }
}

impl From<Operator> for OpKey {
    fn from(op: Operator) -> Self {
        OpKey::Binary(op)
    }
}

impl From<UnaryOp> for OpKey {
    fn from(op: UnaryOp) -> Self {
        OpKey::Unary(op)
    }
}

impl fmt::Display for OpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKey::Binary(op) => f.write_str(op.symbol()),
            OpKey::Unary(op) => f.write_str(op.symbol()),
        }
    }
}
