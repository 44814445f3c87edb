//! Concrete values and their type tags.
//!
//! A [`Value`] is a fully known quantity. Its [`Kind`] is the semantic tag
//! used by dispatch, and its [`Dimension`] is the number of numeric lanes.
//! Points and vectors share a representation but are distinct kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row-major 4x4 identity.
pub const IDENTITY: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Identity quaternion `[x, y, z, w]`.
pub const QUAT_IDENTITY: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// A concrete numeric quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Single scalar.
    Scalar(f64),
    /// 2D value.
    Vec2([f64; 2]),
    /// 3D direction.
    Vector([f64; 3]),
    /// 3D position. Transforms with translation.
    Point([f64; 3]),
    /// Euler rotation in radians.
    Euler([f64; 3]),
    /// Quaternion stored as `[x, y, z, w]`.
    Quat([f64; 4]),
    /// Row-major 4x4 matrix; row 3 holds the translation.
    Matrix([f64; 16]),
}

/// Semantic tag shared by concrete values and live handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Single scalar.
    Scalar,
    /// 2D value.
    Vec2,
    /// 3D direction.
    Vector,
    /// 3D position.
    Point,
    /// Euler rotation.
    Euler,
    /// Quaternion.
    Quat,
    /// 4x4 matrix.
    Matrix,
}

/// Number of numeric lanes carried by a value.
///
/// Dimensions compare by strict enum equality; there is no ordering between
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// One lane.
    One,
    /// Two lanes.
    Two,
    /// Three lanes.
    Three,
    /// Four lanes.
    Four,
    /// Sixteen lanes (4x4 matrix).
    Sixteen,
}

/// Unit metadata attached to scalars and triples.
///
/// Only affects how leaves are constructed; dispatch ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Unitless.
    #[default]
    None,
    /// Angle (radians once constructed).
    Angle,
    /// Linear distance.
    Distance,
    /// Time.
    Time,
}

impl Dimension {
    /// Every dimension, in lane-count order.
    pub const ALL: [Dimension; 5] = [
        Dimension::One,
        Dimension::Two,
        Dimension::Three,
        Dimension::Four,
        Dimension::Sixteen,
    ];

    /// Dimension for a lane count, if it is one of the supported counts.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            1 => Some(Dimension::One),
            2 => Some(Dimension::Two),
            3 => Some(Dimension::Three),
            4 => Some(Dimension::Four),
            16 => Some(Dimension::Sixteen),
            _ => None,
        }
    }

    /// Number of lanes.
    pub const fn len(self) -> usize {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
            Dimension::Four => 4,
            Dimension::Sixteen => 16,
        }
    }

    /// Single-bit mask used by dimension sets.
    pub const fn bit(self) -> u8 {
        match self {
            Dimension::One => 1,
            Dimension::Two => 1 << 1,
            Dimension::Three => 1 << 2,
            Dimension::Four => 1 << 3,
            Dimension::Sixteen => 1 << 4,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.len())
    }
}

impl Kind {
    /// Lane count of this kind.
    pub const fn dimension(self) -> Dimension {
        match self {
            Kind::Scalar => Dimension::One,
            Kind::Vec2 => Dimension::Two,
            Kind::Vector | Kind::Point | Kind::Euler => Dimension::Three,
            Kind::Quat => Dimension::Four,
            Kind::Matrix => Dimension::Sixteen,
        }
    }

    /// Default kind for a dimension: triples become vectors and quadruples
    /// quaternions.
    pub const fn for_dimension(dimension: Dimension) -> Self {
        match dimension {
            Dimension::One => Kind::Scalar,
            Dimension::Two => Kind::Vec2,
            Dimension::Three => Kind::Vector,
            Dimension::Four => Kind::Quat,
            Dimension::Sixteen => Kind::Matrix,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Scalar => "scalar",
            Kind::Vec2 => "vec2",
            Kind::Vector => "vector",
            Kind::Point => "point",
            Kind::Euler => "euler",
            Kind::Quat => "quaternion",
            Kind::Matrix => "matrix",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Identity matrix value.
    pub const fn identity() -> Self {
        Value::Matrix(IDENTITY)
    }

    /// Semantic tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Scalar(_) => Kind::Scalar,
            Value::Vec2(_) => Kind::Vec2,
            Value::Vector(_) => Kind::Vector,
            Value::Point(_) => Kind::Point,
            Value::Euler(_) => Kind::Euler,
            Value::Quat(_) => Kind::Quat,
            Value::Matrix(_) => Kind::Matrix,
        }
    }

    /// Lane count of this value.
    pub fn dimension(&self) -> Dimension {
        self.kind().dimension()
    }

    /// Numeric lanes in storage order.
    pub fn components(&self) -> &[f64] {
        match self {
            Value::Scalar(v) => std::slice::from_ref(v),
            Value::Vec2(v) => v,
            Value::Vector(v) | Value::Point(v) | Value::Euler(v) => v,
            Value::Quat(v) => v,
            Value::Matrix(v) => v,
        }
    }

    /// Build a value of `kind` from its lanes. Returns `None` when the lane
    /// count does not match the kind.
    pub fn from_components(kind: Kind, lanes: &[f64]) -> Option<Self> {
        if lanes.len() != kind.dimension().len() {
            return None;
        }
        let value = match kind {
            Kind::Scalar => Value::Scalar(lanes[0]),
            Kind::Vec2 => Value::Vec2([lanes[0], lanes[1]]),
            Kind::Vector => Value::Vector([lanes[0], lanes[1], lanes[2]]),
            Kind::Point => Value::Point([lanes[0], lanes[1], lanes[2]]),
            Kind::Euler => Value::Euler([lanes[0], lanes[1], lanes[2]]),
            Kind::Quat => Value::Quat([lanes[0], lanes[1], lanes[2], lanes[3]]),
            Kind::Matrix => {
                let mut m = [0.0; 16];
                m.copy_from_slice(lanes);
                Value::Matrix(m)
            }
        };
        Some(value)
    }

    /// Apply `f` to every lane, keeping the kind.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let lanes: Vec<f64> = self.components().iter().map(|&x| f(x)).collect();
        // Lane count is unchanged, so reconstruction cannot fail.
        Self::from_components(self.kind(), &lanes).unwrap_or(*self)
    }

    /// Attempt to get the value as a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempt to get any 3-lane value as an array.
    pub fn as_triple(&self) -> Option<[f64; 3]> {
        match self {
            Value::Vector(v) | Value::Point(v) | Value::Euler(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempt to get the value as a quaternion.
    pub fn as_quat(&self) -> Option<[f64; 4]> {
        match self {
            Value::Quat(q) => Some(*q),
            _ => None,
        }
    }

    /// Attempt to get the value as a matrix.
    pub fn as_matrix(&self) -> Option<[f64; 16]> {
        match self {
            Value::Matrix(m) => Some(*m),
            _ => None,
        }
    }

    /// Re-tag a 3-lane value, leaving other values untouched.
    pub fn with_triple_kind(self, kind: Kind) -> Self {
        match (self.as_triple(), kind) {
            (Some(v), Kind::Vector) => Value::Vector(v),
            (Some(v), Kind::Point) => Value::Point(v),
            (Some(v), Kind::Euler) => Value::Euler(v),
            _ => self,
        }
    }

    /// Approximate lane-wise equality.
    pub fn approx_eq(&self, other: &Value, tolerance: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .components()
                .iter()
                .zip(other.components())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(0.0)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<[f64; 2]> for Value {
    fn from(v: [f64; 2]) -> Self {
        Value::Vec2(v)
    }
}

impl From<[f64; 3]> for Value {
    fn from(v: [f64; 3]) -> Self {
        Value::Vector(v)
    }
}

impl From<[f64; 4]> for Value {
    fn from(v: [f64; 4]) -> Self {
        Value::Quat(v)
    }
}

impl From<[f64; 16]> for Value {
    fn from(v: [f64; 16]) -> Self {
        Value::Matrix(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_from_len() {
        assert_eq!(Dimension::from_len(3), Some(Dimension::Three));
        assert_eq!(Dimension::from_len(16), Some(Dimension::Sixteen));
        assert_eq!(Dimension::from_len(5), None);
        assert_eq!(Dimension::from_len(0), None);
    }

    #[test]
    fn test_point_and_vector_are_distinct_kinds() {
        let p = Value::Point([1.0, 2.0, 3.0]);
        let v = Value::Vector([1.0, 2.0, 3.0]);
        assert_ne!(p.kind(), v.kind());
        assert_eq!(p.dimension(), v.dimension());
        assert_eq!(p.components(), v.components());
    }

    #[test]
    fn test_from_components_checks_length() {
        assert_eq!(
            Value::from_components(Kind::Quat, &[0.0, 0.0, 0.0, 1.0]),
            Some(Value::Quat(QUAT_IDENTITY))
        );
        assert_eq!(Value::from_components(Kind::Matrix, &[1.0; 15]), None);
    }

    #[test]
    fn test_map_keeps_kind() {
        let p = Value::Point([1.0, -2.0, 3.0]).map(|x| x * 2.0);
        assert_eq!(p, Value::Point([2.0, -4.0, 6.0]));
    }

    #[test]
    fn test_dimension_bits_are_distinct() {
        let mut seen = 0u8;
        for d in Dimension::ALL {
            assert_eq!(seen & d.bit(), 0);
            seen |= d.bit();
        }
    }
}
