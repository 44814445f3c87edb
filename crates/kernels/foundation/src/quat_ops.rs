//! Quaternion Operations
//!
//! Quaternions are `[x, y, z, w]`. Products and rotation matrices are
//! computed through nalgebra; matrices follow the row-vector convention used
//! throughout the crate, so `v · to_matrix(q)` rotates `v` by `q`.

use nalgebra::{Quaternion, UnitQuaternion};

use crate::angle::{self, UnwindMode};
use crate::value::QUAT_IDENTITY;
use crate::vector_ops::{self, EPSILON};

#[inline]
fn na(q: [f64; 4]) -> Quaternion<f64> {
    Quaternion::new(q[3], q[0], q[1], q[2])
}

#[inline]
fn arr(q: Quaternion<f64>) -> [f64; 4] {
    [q.i, q.j, q.k, q.w]
}

/// Hamilton product `a * b`.
pub fn mul(a: [f64; 4], b: [f64; 4]) -> [f64; 4] {
    arr(na(a) * na(b))
}

/// Lane-wise sum.
pub fn add(a: [f64; 4], b: [f64; 4]) -> [f64; 4] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]]
}

/// Lane-wise difference.
pub fn sub(a: [f64; 4], b: [f64; 4]) -> [f64; 4] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]]
}

/// Negate every lane. Represents the same rotation.
pub fn negate(q: [f64; 4]) -> [f64; 4] {
    [-q[0], -q[1], -q[2], -q[3]]
}

/// Conjugate `[-x, -y, -z, w]`.
pub fn conjugate(q: [f64; 4]) -> [f64; 4] {
    [-q[0], -q[1], -q[2], q[3]]
}

/// Four-lane dot product.
pub fn dot(a: [f64; 4], b: [f64; 4]) -> f64 {
    na(a).dot(&na(b))
}

/// Multiplicative inverse, or `None` for a zero quaternion.
pub fn inverse(q: [f64; 4]) -> Option<[f64; 4]> {
    na(q).try_inverse().map(arr)
}

/// Unit-length copy; a zero quaternion becomes identity.
pub fn normalize(q: [f64; 4]) -> [f64; 4] {
    let n = na(q).norm();
    if n < EPSILON {
        QUAT_IDENTITY
    } else {
        [q[0] / n, q[1] / n, q[2] / n, q[3] / n]
    }
}

/// Rotation of `angle` radians about `axis`. A zero axis gives identity.
pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> [f64; 4] {
    let Some(k) = vector_ops::try_normalize(axis, EPSILON) else {
        return QUAT_IDENTITY;
    };
    let (s, c) = (angle * 0.5).sin_cos();
    [k[0] * s, k[1] * s, k[2] * s, c]
}

/// Axis and angle in `[0, 2π]` of a rotation.
///
/// Rotations too small to carry an axis report the X axis.
pub fn to_axis_angle(q: [f64; 4]) -> ([f64; 3], f64) {
    let q = normalize(q);
    let v = [q[0], q[1], q[2]];
    let s = vector_ops::length(v);
    let angle = 2.0 * s.atan2(q[3]);
    if s < EPSILON {
        ([1.0, 0.0, 0.0], angle)
    } else {
        (vector_ops::scale(v, 1.0 / s), angle)
    }
}

/// Row-major rotation matrix for the row-vector convention.
pub fn to_matrix(q: [f64; 4]) -> [f64; 16] {
    let r = UnitQuaternion::from_quaternion(na(q)).to_rotation_matrix();
    let m = r.matrix();
    let mut out = crate::value::IDENTITY;
    for row in 0..3 {
        for col in 0..3 {
            // Transposed: row vectors multiply from the left.
            out[row * 4 + col] = m[(col, row)];
        }
    }
    out
}

/// Rotate a vector by a quaternion.
pub fn rotate_vector(q: [f64; 4], v: [f64; 3]) -> [f64; 3] {
    let r = UnitQuaternion::from_quaternion(na(q));
    let out = r * nalgebra::Vector3::new(v[0], v[1], v[2]);
    [out.x, out.y, out.z]
}

/// Spherical interpolation from `a` to `b`.
///
/// The relative rotation `a⁻¹ · b` is unwound with `mode` before scaling by
/// `t`, so `Shortest` takes the short arc while `Positive`/`Negative` force
/// the direction of travel about the relative axis.
pub fn slerp(a: [f64; 4], b: [f64; 4], t: f64, mode: UnwindMode) -> [f64; 4] {
    let a = normalize(a);
    let b = normalize(b);
    let relative = mul(conjugate(a), b);
    let (axis, raw) = to_axis_angle(relative);
    let swept = angle::unwind(raw, mode);
    normalize(mul(a, from_axis_angle(axis, swept * t)))
}

/// Whether two quaternions represent the same rotation.
pub fn same_rotation(a: [f64; 4], b: [f64; 4], tolerance: f64) -> bool {
    (dot(normalize(a), normalize(b)).abs() - 1.0).abs() < tolerance
}
