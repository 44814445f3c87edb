//! Type Coercion Rules
//!
//! Defines which kind pairs an operator accepts and the kind of the result.
//! These rules are shared by the concrete evaluator and by live node
//! synthesis, which asks them for the kind of a node's output.

use crate::operators::{Operator, UnaryOp};
use crate::value::Kind;

/// Result of type checking an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCheckResult {
    /// Operation is valid and produces this kind.
    Valid(Kind),
    /// Operation is invalid for these kinds.
    Invalid(&'static str),
}

impl TypeCheckResult {
    /// The result kind, if valid.
    pub fn kind(self) -> Option<Kind> {
        match self {
            TypeCheckResult::Valid(kind) => Some(kind),
            TypeCheckResult::Invalid(_) => None,
        }
    }
}

fn is_triple(kind: Kind) -> bool {
    matches!(kind, Kind::Vector | Kind::Point | Kind::Euler)
}

/// Kind of a sum or difference of two triples.
///
/// Point - Point is a Vector; anything else involving a Point stays a Point.
fn triple_sum_kind(op: Operator, left: Kind, right: Kind) -> Kind {
    match (op, left, right) {
        (Operator::Sub, Kind::Point, Kind::Point) => Kind::Vector,
        (_, Kind::Point, _) | (_, _, Kind::Point) => Kind::Point,
        _ => left,
    }
}

/// Check a binary operation.
///
/// # Rules
///
/// ## Addition/Subtraction
/// - Same kind family (scalar, vec2, triple, quaternion, matrix) → that kind
/// - Scalar ± vec2/triple/quaternion → broadcast
///
/// ## Multiplication
/// - Scalar · anything → broadcast
/// - Triple · triple, vec2 · vec2 → lane-wise
/// - Triple · matrix → direction transform, keeps the triple's kind
/// - Matrix · matrix → matrix product
/// - Quaternion · quaternion → Hamilton product
///
/// ## Division/Power
/// - Scalars, vec2 and triples lane-wise, with scalar broadcast
/// - Matrix / scalar (division only)
///
/// ## Geometric
/// - Triple ^ matrix → Point
/// - cross → Vector, dot and angle_between → Scalar
/// - axis_angle(triple, scalar) → Quaternion
pub fn binary_result(op: Operator, left: Kind, right: Kind) -> TypeCheckResult {
    use Kind::*;
    use TypeCheckResult::{Invalid, Valid};

    match op {
        Operator::Add | Operator::Sub => match (left, right) {
            (Scalar, Scalar) => Valid(Scalar),
            (Scalar, k) | (k, Scalar) if matches!(k, Vec2 | Quat) || is_triple(k) => Valid(k),
            (Vec2, Vec2) => Valid(Vec2),
            (l, r) if is_triple(l) && is_triple(r) => Valid(triple_sum_kind(op, l, r)),
            (Quat, Quat) => Valid(Quat),
            (Matrix, Matrix) => Valid(Matrix),
            _ => Invalid("operand dimensions do not match"),
        },
        Operator::Mul => match (left, right) {
            (Scalar, k) | (k, Scalar) => Valid(k),
            (Vec2, Vec2) => Valid(Vec2),
            (l, r) if is_triple(l) && is_triple(r) => Valid(l),
            (l, Matrix) if is_triple(l) => Valid(l),
            (Matrix, Matrix) => Valid(Matrix),
            (Quat, Quat) => Valid(Quat),
            _ => Invalid("no product defined for these operands"),
        },
        Operator::Div | Operator::Pow => match (left, right) {
            (Scalar, Scalar) => Valid(Scalar),
            (Scalar, k) | (k, Scalar) if k == Vec2 || is_triple(k) => Valid(k),
            (Vec2, Vec2) => Valid(Vec2),
            (l, r) if is_triple(l) && is_triple(r) => Valid(l),
            (Matrix, Scalar) if op == Operator::Div => Valid(Matrix),
            _ => Invalid("lane-wise operation needs scalars, vec2 or triples"),
        },
        Operator::PointMatrixMul => match (left, right) {
            (l, Matrix) if is_triple(l) => Valid(Point),
            _ => Invalid("point transform needs a triple and a matrix"),
        },
        Operator::Cross => match (left, right) {
            (l, r) if is_triple(l) && is_triple(r) => Valid(Vector),
            _ => Invalid("cross product needs two triples"),
        },
        Operator::Dot | Operator::AngleBetween => match (left, right) {
            (l, r) if is_triple(l) && is_triple(r) => Valid(Scalar),
            _ => Invalid("operation needs two triples"),
        },
        Operator::AxisAngle => match (left, right) {
            (l, Scalar) if is_triple(l) => Valid(Quat),
            _ => Invalid("axis-angle needs a triple axis and a scalar angle"),
        },
    }
}

/// Check a unary operation.
pub fn unary_result(op: UnaryOp, kind: Kind) -> TypeCheckResult {
    use TypeCheckResult::{Invalid, Valid};

    match (op, kind) {
        (UnaryOp::Neg, k) => Valid(k),
        (UnaryOp::Inverse, Kind::Matrix | Kind::Quat) => Valid(kind),
        (UnaryOp::Inverse, _) => Invalid("inverse needs a matrix or quaternion"),
        (UnaryOp::Length, k) if is_triple(k) => Valid(Kind::Scalar),
        (UnaryOp::Normalize, k) if is_triple(k) => Valid(Kind::Vector),
        (UnaryOp::Length | UnaryOp::Normalize, _) => Invalid("operation needs a triple"),
        (UnaryOp::QuatToMatrix, Kind::Quat) => Valid(Kind::Matrix),
        (UnaryOp::QuatToMatrix, _) => Invalid("operation needs a quaternion"),
    }
}
