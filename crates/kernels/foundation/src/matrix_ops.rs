//! Matrix Operations
//!
//! 4x4 matrices are stored row-major and act on row vectors: rows 0-2 are
//! the X/Y/Z axes and row 3 is the translation, so a point transforms as
//! `p · M`. Products and inverses go through nalgebra.
//!
//! Decomposition splits an affine matrix as `M = S · H · R · T` (scale,
//! shear, rotation, translation), which is also the canonical channel order
//! used by filtering.

use nalgebra::{Matrix4, RowVector4};
use serde::{Deserialize, Serialize};

use crate::value::IDENTITY;
use crate::vector_ops::{self, EPSILON};

/// A transform channel of an affine matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Axis lengths.
    Scale,
    /// Lower-triangular shear.
    Shear,
    /// Orthonormal rotation.
    Rotate,
    /// Translation row.
    Translate,
}

impl Channel {
    /// Channels in composition order.
    pub const CANONICAL: [Channel; 4] = [
        Channel::Scale,
        Channel::Shear,
        Channel::Rotate,
        Channel::Translate,
    ];
}

/// Channels of an affine matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    /// Per-axis scale; Z carries a negative determinant.
    pub scale: [f64; 3],
    /// Shear factors `(xy, xz, yz)`.
    pub shear: [f64; 3],
    /// Orthonormal right-handed axis rows.
    pub rotation: [[f64; 3]; 3],
    /// Translation.
    pub translation: [f64; 3],
}

#[inline]
fn na(m: &[f64; 16]) -> Matrix4<f64> {
    Matrix4::from_row_slice(m)
}

fn from_na(m: &Matrix4<f64>) -> [f64; 16] {
    let mut out = [0.0; 16];
    for r in 0..4 {
        for c in 0..4 {
            out[r * 4 + c] = m[(r, c)];
        }
    }
    out
}

/// Matrix product `a · b`.
pub fn mul(a: &[f64; 16], b: &[f64; 16]) -> [f64; 16] {
    from_na(&(na(a) * na(b)))
}

/// Lane-wise sum.
pub fn add(a: &[f64; 16], b: &[f64; 16]) -> [f64; 16] {
    from_na(&(na(a) + na(b)))
}

/// Lane-wise difference.
pub fn sub(a: &[f64; 16], b: &[f64; 16]) -> [f64; 16] {
    from_na(&(na(a) - na(b)))
}

/// Multiply every lane by `s`.
pub fn scale(m: &[f64; 16], s: f64) -> [f64; 16] {
    from_na(&(na(m) * s))
}

/// Transpose.
pub fn transpose(m: &[f64; 16]) -> [f64; 16] {
    from_na(&na(m).transpose())
}

/// Determinant.
pub fn determinant(m: &[f64; 16]) -> f64 {
    na(m).determinant()
}

/// Inverse, or `None` for a singular matrix.
pub fn inverse(m: &[f64; 16]) -> Option<[f64; 16]> {
    na(m).try_inverse().map(|inv| from_na(&inv))
}

/// Transform a direction (row vector with `w = 0`).
pub fn transform_vector(v: [f64; 3], m: &[f64; 16]) -> [f64; 3] {
    let r = RowVector4::new(v[0], v[1], v[2], 0.0) * na(m);
    [r[0], r[1], r[2]]
}

/// Transform a position (row vector with `w = 1`).
pub fn transform_point(p: [f64; 3], m: &[f64; 16]) -> [f64; 3] {
    let r = RowVector4::new(p[0], p[1], p[2], 1.0) * na(m);
    [r[0], r[1], r[2]]
}

/// Row `i` of the upper 3x3 block.
pub fn axis(m: &[f64; 16], i: usize) -> [f64; 3] {
    [m[i * 4], m[i * 4 + 1], m[i * 4 + 2]]
}

/// Translation row.
pub fn translation(m: &[f64; 16]) -> [f64; 3] {
    axis(m, 3)
}

/// Matrix with the given axis rows and translation.
pub fn from_rows(x: [f64; 3], y: [f64; 3], z: [f64; 3], t: [f64; 3]) -> [f64; 16] {
    [
        x[0], x[1], x[2], 0.0, //
        y[0], y[1], y[2], 0.0, //
        z[0], z[1], z[2], 0.0, //
        t[0], t[1], t[2], 1.0,
    ]
}

/// Pure translation.
pub fn from_translation(t: [f64; 3]) -> [f64; 16] {
    from_rows([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], t)
}

/// Pure scale.
pub fn from_scale(s: [f64; 3]) -> [f64; 16] {
    from_rows([s[0], 0.0, 0.0], [0.0, s[1], 0.0], [0.0, 0.0, s[2]], [0.0; 3])
}

/// Lower-triangular shear from `(xy, xz, yz)`.
pub fn from_shear(h: [f64; 3]) -> [f64; 16] {
    from_rows([1.0, 0.0, 0.0], [h[0], 1.0, 0.0], [h[1], h[2], 1.0], [0.0; 3])
}

/// Rotation from orthonormal axis rows.
pub fn from_rotation(rows: [[f64; 3]; 3]) -> [f64; 16] {
    from_rows(rows[0], rows[1], rows[2], [0.0; 3])
}

/// Split an affine matrix into scale, shear, rotation and translation.
///
/// Axes shorter than [`EPSILON`] are completed with perpendicular unit
/// vectors and report zero scale.
pub fn decompose(m: &[f64; 16]) -> Decomposed {
    let r0 = axis(m, 0);
    let r1 = axis(m, 1);
    let r2 = axis(m, 2);

    let sx = vector_ops::length(r0);
    let (x, sx) = if sx < EPSILON {
        ([1.0, 0.0, 0.0], 0.0)
    } else {
        (vector_ops::scale(r0, 1.0 / sx), sx)
    };

    let xy = vector_ops::dot(r1, x);
    let r1p = vector_ops::sub(r1, vector_ops::scale(x, xy));
    let sy = vector_ops::length(r1p);
    let (y, sy) = if sy < EPSILON {
        (vector_ops::any_perpendicular(x), 0.0)
    } else {
        (vector_ops::scale(r1p, 1.0 / sy), sy)
    };

    let xz = vector_ops::dot(r2, x);
    let yz = vector_ops::dot(r2, y);
    let r2p = vector_ops::sub(
        r2,
        vector_ops::add(vector_ops::scale(x, xz), vector_ops::scale(y, yz)),
    );
    let sz = vector_ops::length(r2p);
    let (mut z, mut sz) = if sz < EPSILON {
        (vector_ops::cross(x, y), 0.0)
    } else {
        (vector_ops::scale(r2p, 1.0 / sz), sz)
    };

    if vector_ops::dot(vector_ops::cross(x, y), z) < 0.0 {
        z = vector_ops::negate(z);
        sz = -sz;
    }

    let ratio = |num: f64, den: f64| if den.abs() < EPSILON { 0.0 } else { num / den };

    Decomposed {
        scale: [sx, sy, sz],
        shear: [ratio(xy, sy), ratio(xz, sz), ratio(yz, sz)],
        rotation: [x, y, z],
        translation: translation(m),
    }
}

impl Decomposed {
    /// Matrix for a single channel.
    pub fn channel(&self, channel: Channel) -> [f64; 16] {
        match channel {
            Channel::Scale => from_scale(self.scale),
            Channel::Shear => from_shear(self.shear),
            Channel::Rotate => from_rotation(self.rotation),
            Channel::Translate => from_translation(self.translation),
        }
    }

    /// Recompose `S · H · R · T`.
    pub fn compose(&self) -> [f64; 16] {
        compose_channels(self, &Channel::CANONICAL)
    }
}

/// Product of the selected channels, always in canonical order.
pub fn compose_channels(d: &Decomposed, channels: &[Channel]) -> [f64; 16] {
    Channel::CANONICAL
        .iter()
        .filter(|c| channels.contains(c))
        .fold(IDENTITY, |acc, &c| mul(&acc, &d.channel(c)))
}

/// Keep only the selected channels of `m`.
pub fn filter_channels(m: &[f64; 16], channels: &[Channel]) -> [f64; 16] {
    compose_channels(&decompose(m), channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quat_ops;

    fn assert_close(a: &[f64; 16], b: &[f64; 16], tol: f64) {
        for i in 0..16 {
            assert!((a[i] - b[i]).abs() < tol, "lane {i}: {} vs {}", a[i], b[i]);
        }
    }

    fn sample() -> [f64; 16] {
        let s = from_scale([2.0, 0.5, 3.0]);
        let h = from_shear([0.3, -0.2, 0.1]);
        let r = quat_ops::to_matrix(quat_ops::from_axis_angle([0.3, 1.0, -0.4], 0.9));
        let t = from_translation([4.0, -1.0, 2.5]);
        mul(&mul(&mul(&s, &h), &r), &t)
    }

    #[test]
    fn test_mul_identity() {
        let m = sample();
        assert_close(&mul(&m, &IDENTITY), &m, 1e-12);
        assert_close(&mul(&IDENTITY, &m), &m, 1e-12);
    }

    #[test]
    fn test_mul_is_row_vector_order() {
        let t = from_translation([1.0, 0.0, 0.0]);
        let s = from_scale([2.0, 2.0, 2.0]);
        // Translate then scale: the translation is scaled too.
        let p = transform_point([0.0; 3], &mul(&t, &s));
        assert_eq!(p, [2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = from_translation([5.0, 5.0, 5.0]);
        assert_eq!(transform_vector([1.0, 2.0, 3.0], &m), [1.0, 2.0, 3.0]);
        assert_eq!(transform_point([1.0, 2.0, 3.0], &m), [6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_inverse() {
        let m = sample();
        let inv = inverse(&m).expect("invertible");
        assert_close(&mul(&m, &inv), &IDENTITY, 1e-9);
        assert_eq!(inverse(&from_scale([1.0, 0.0, 1.0])), None);
    }

    #[test]
    fn test_decompose_recovers_channels() {
        let d = decompose(&sample());
        assert!((d.scale[0] - 2.0).abs() < 1e-9);
        assert!((d.scale[1] - 0.5).abs() < 1e-9);
        assert!((d.scale[2] - 3.0).abs() < 1e-9);
        assert!((d.shear[0] - 0.3).abs() < 1e-9);
        assert!((d.shear[1] + 0.2).abs() < 1e-9);
        assert!((d.shear[2] - 0.1).abs() < 1e-9);
        assert_eq!(d.translation, [4.0, -1.0, 2.5]);
    }

    #[test]
    fn test_compose_reproduces_matrix() {
        let m = sample();
        assert_close(&decompose(&m).compose(), &m, 1e-9);
    }

    #[test]
    fn test_negative_determinant_goes_to_z_scale() {
        let m = from_scale([1.0, 1.0, -2.0]);
        let d = decompose(&m);
        assert!((d.scale[2] + 2.0).abs() < 1e-12);
        assert_close(&from_rotation(d.rotation), &IDENTITY, 1e-12);
    }

    #[test]
    fn test_filter_translate_only() {
        let m = sample();
        let t = filter_channels(&m, &[Channel::Translate]);
        assert_close(&t, &from_translation([4.0, -1.0, 2.5]), 1e-12);
    }
}
