//! Vector Operations
//!
//! Triple arithmetic shared by the concrete evaluator and the curve
//! algorithms. Products go through nalgebra so results agree with the
//! reference linear algebra library. Normalization and axis rotations pass
//! their input through unchanged when a length falls below [`EPSILON`].

use nalgebra::Vector3;

/// Length below which a vector is treated as zero.
pub const EPSILON: f64 = 1e-12;

#[inline]
fn na(v: [f64; 3]) -> Vector3<f64> {
    Vector3::new(v[0], v[1], v[2])
}

#[inline]
fn arr(v: Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Lane-wise sum.
#[inline]
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Lane-wise difference.
#[inline]
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Multiply every lane by `s`.
#[inline]
pub fn scale(v: [f64; 3], s: f64) -> [f64; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Flip every lane.
#[inline]
pub fn negate(v: [f64; 3]) -> [f64; 3] {
    scale(v, -1.0)
}

/// Dot product.
#[inline]
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    na(a).dot(&na(b))
}

/// Right-handed cross product.
#[inline]
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    arr(na(a).cross(&na(b)))
}

/// Euclidean length.
#[inline]
pub fn length(v: [f64; 3]) -> f64 {
    na(v).norm()
}

/// Unit-length copy, or `v` unchanged when it is shorter than [`EPSILON`].
pub fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = length(v);
    if len < EPSILON { v } else { scale(v, 1.0 / len) }
}

/// Unit-length copy, or `None` when `v` is shorter than `tolerance`.
pub fn try_normalize(v: [f64; 3], tolerance: f64) -> Option<[f64; 3]> {
    let len = length(v);
    if len < tolerance {
        None
    } else {
        Some(scale(v, 1.0 / len))
    }
}

/// Unsigned angle between two vectors in `[0, π]`. Zero-length inputs give 0.
pub fn angle_between(a: [f64; 3], b: [f64; 3]) -> f64 {
    let (la, lb) = (length(a), length(b));
    if la < EPSILON || lb < EPSILON {
        return 0.0;
    }
    (dot(a, b) / (la * lb)).clamp(-1.0, 1.0).acos()
}

/// Rotate `v` about `axis` by `angle` radians (right-handed).
///
/// Uses Rodrigues' formula. A zero-length axis leaves `v` unchanged.
pub fn rotate_by_axis_angle(v: [f64; 3], axis: [f64; 3], angle: f64) -> [f64; 3] {
    let Some(k) = try_normalize(axis, EPSILON) else {
        return v;
    };
    let (s, c) = angle.sin_cos();
    let kxv = cross(k, v);
    let kdv = dot(k, v);
    [
        v[0] * c + kxv[0] * s + k[0] * kdv * (1.0 - c),
        v[1] * c + kxv[1] * s + k[1] * kdv * (1.0 - c),
        v[2] * c + kxv[2] * s + k[2] * kdv * (1.0 - c),
    ]
}

/// Component of `v` along `onto`. A zero-length `onto` gives zero.
pub fn project(v: [f64; 3], onto: [f64; 3]) -> [f64; 3] {
    match try_normalize(onto, EPSILON) {
        Some(n) => scale(n, dot(v, n)),
        None => [0.0; 3],
    }
}

/// Component of `v` perpendicular to `from`.
pub fn reject(v: [f64; 3], from: [f64; 3]) -> [f64; 3] {
    sub(v, project(v, from))
}

/// Linear interpolation `a + (b - a) * t`.
#[inline]
pub fn lerp(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    add(a, scale(sub(b, a), t))
}

/// Some unit vector perpendicular to `v`.
pub fn any_perpendicular(v: [f64; 3]) -> [f64; 3] {
    let n = normalize(v);
    // Cross with the world axis least aligned with v.
    let helper = if n[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    normalize(cross(n, helper))
}
