//! Direct numeric evaluation for all-concrete operands.
//!
//! Kind checking goes through the shared coercion rules, so an operator is
//! accepted here exactly when [`binary_result`] or [`unary_result`] accepts
//! it. Lane-wise division follows IEEE semantics (division by zero yields
//! infinities rather than an error).

use rigmath_foundation::{
    Kind, Operator, UnaryOp, Value, binary_result, matrix_ops, quat_ops, unary_result,
    vector_ops,
};

use crate::error::{Error, Result};

/// Evaluate a binary operator.
pub fn binary(op: Operator, lhs: &Value, rhs: &Value) -> Result<Value> {
    let kind = binary_result(op, lhs.kind(), rhs.kind())
        .kind()
        .ok_or_else(|| Error::unsupported(op, lhs.kind(), Some(rhs.kind())))?;

    let lanes: Vec<f64> = match (op, lhs, rhs) {
        (Operator::Add, Value::Matrix(a), Value::Matrix(b)) => matrix_ops::add(a, b).to_vec(),
        (Operator::Sub, Value::Matrix(a), Value::Matrix(b)) => matrix_ops::sub(a, b).to_vec(),
        (Operator::Add, Value::Quat(a), Value::Quat(b)) => quat_ops::add(*a, *b).to_vec(),
        (Operator::Sub, Value::Quat(a), Value::Quat(b)) => quat_ops::sub(*a, *b).to_vec(),
        (Operator::Add, ..) => lanewise(lhs, rhs, |a, b| a + b),
        (Operator::Sub, ..) => lanewise(lhs, rhs, |a, b| a - b),

        (Operator::Mul, Value::Matrix(a), Value::Matrix(b)) => matrix_ops::mul(a, b).to_vec(),
        (Operator::Mul, Value::Quat(a), Value::Quat(b)) => quat_ops::mul(*a, *b).to_vec(),
        (Operator::Mul, Value::Matrix(m), Value::Scalar(s))
        | (Operator::Mul, Value::Scalar(s), Value::Matrix(m)) => matrix_ops::scale(m, *s).to_vec(),
        (Operator::Mul, Value::Point(p), Value::Matrix(m)) => {
            matrix_ops::transform_point(*p, m).to_vec()
        }
        (Operator::Mul, v, Value::Matrix(m)) => {
            matrix_ops::transform_vector(triple(v)?, m).to_vec()
        }
        (Operator::Mul, ..) => lanewise(lhs, rhs, |a, b| a * b),

        (Operator::Div, Value::Matrix(m), Value::Scalar(s)) => {
            matrix_ops::scale(m, 1.0 / *s).to_vec()
        }
        (Operator::Div, ..) => lanewise(lhs, rhs, |a, b| a / b),
        (Operator::Pow, ..) => lanewise(lhs, rhs, f64::powf),

        (Operator::PointMatrixMul, v, Value::Matrix(m)) => {
            matrix_ops::transform_point(triple(v)?, m).to_vec()
        }
        (Operator::Cross, a, b) => vector_ops::cross(triple(a)?, triple(b)?).to_vec(),
        (Operator::Dot, a, b) => vec![vector_ops::dot(triple(a)?, triple(b)?)],
        (Operator::AngleBetween, a, b) => {
            vec![vector_ops::angle_between(triple(a)?, triple(b)?)]
        }
        (Operator::AxisAngle, axis, Value::Scalar(angle)) => {
            quat_ops::from_axis_angle(triple(axis)?, *angle).to_vec()
        }
        _ => return Err(Error::unsupported(op, lhs.kind(), Some(rhs.kind()))),
    };

    rebuild(kind, &lanes)
}

/// Evaluate a unary operator.
pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value> {
    unary_result(op, operand.kind())
        .kind()
        .ok_or_else(|| Error::unsupported(op, operand.kind(), None))?;

    match (op, operand) {
        (UnaryOp::Neg, v) => Ok(v.map(|x| -x)),
        (UnaryOp::Inverse, Value::Matrix(m)) => matrix_ops::inverse(m)
            .map(Value::Matrix)
            .ok_or(Error::Singular { kind: Kind::Matrix }),
        (UnaryOp::Inverse, Value::Quat(q)) => quat_ops::inverse(*q)
            .map(Value::Quat)
            .ok_or(Error::Singular { kind: Kind::Quat }),
        (UnaryOp::Length, v) => Ok(Value::Scalar(vector_ops::length(triple(v)?))),
        (UnaryOp::Normalize, v) => Ok(Value::Vector(vector_ops::normalize(triple(v)?))),
        (UnaryOp::QuatToMatrix, Value::Quat(q)) => Ok(Value::Matrix(quat_ops::to_matrix(*q))),
        _ => Err(Error::unsupported(op, operand.kind(), None)),
    }
}

fn triple(v: &Value) -> Result<[f64; 3]> {
    v.as_triple().ok_or(Error::TypeClassification {
        found: v.kind().to_string(),
        reason: "expected a triple",
    })
}

/// Lane-wise combination with scalar broadcast on either side.
fn lanewise(a: &Value, b: &Value, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    let (la, lb) = (a.components(), b.components());
    match (la.len(), lb.len()) {
        (1, _) => lb.iter().map(|&y| f(la[0], y)).collect(),
        (_, 1) => la.iter().map(|&x| f(x, lb[0])).collect(),
        _ => la.iter().zip(lb).map(|(&x, &y)| f(x, y)).collect(),
    }
}

fn rebuild(kind: Kind, lanes: &[f64]) -> Result<Value> {
    Value::from_components(kind, lanes).ok_or(Error::TypeClassification {
        found: format!("{} lanes", lanes.len()),
        reason: "result does not match the expected kind",
    })
}
