//! Cross-product framing of polylines.
//!
//! Up vectors come from the cross products of consecutive segments. Where the
//! polyline is locally straight the cross product vanishes; those joints are
//! filled by arc-length interpolation between their defined neighbours, or
//! from the caller's up hints when no joint is defined.

use rigmath_expr::{Error, Result};
use rigmath_foundation::vector_ops;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::construct::{Axis, aim_matrix};
use crate::interpolate::{arc_length_ratios, blend_nones, chase_nones, deflip_vectors};

/// Up vector hints for framing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpHints {
    /// No hints.
    #[default]
    None,
    /// One hint shared by every point.
    Single([f64; 3]),
    /// One hint per point.
    PerPoint(Vec<[f64; 3]>),
}

impl UpHints {
    fn check(&self, points: usize) -> Result<()> {
        match self {
            UpHints::PerPoint(hints) if hints.len() != points => Err(Error::LengthMismatch {
                what: "up hints",
                expected: points,
                got: hints.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Normalized hint for point `i`.
    pub fn at(&self, i: usize) -> Option<[f64; 3]> {
        let hint = match self {
            UpHints::None => None,
            UpHints::Single(h) => Some(*h),
            UpHints::PerPoint(hints) => hints.get(i).copied(),
        }?;
        Some(vector_ops::normalize(hint))
    }
}

/// Per-point aim and up vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frames {
    /// Aim vectors; the last point repeats the last segment.
    pub aims: Vec<[f64; 3]>,
    /// Unit up vectors perpendicular to their aims.
    pub ups: Vec<[f64; 3]>,
}

impl Frames {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.aims.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.aims.is_empty()
    }
}

/// Segment vectors `points[i + 1] - points[i]`.
///
/// Segments shorter than `tolerance` take a neighbouring segment instead.
pub fn aim_vectors_from_points(points: &[[f64; 3]], tolerance: f64) -> Result<Vec<[f64; 3]>> {
    if points.len() < 2 {
        return Err(Error::InsufficientPoints {
            needed: 2,
            got: points.len(),
        });
    }
    let segments: Vec<Option<[f64; 3]>> = points
        .windows(2)
        .map(|w| {
            let v = vector_ops::sub(w[1], w[0]);
            (vector_ops::length(v) >= tolerance).then_some(v)
        })
        .collect();
    chase_nones(&segments)
}

/// Aim and up vectors for each point of a polyline.
#[instrument(skip_all, fields(points = points.len()))]
pub fn framed_aim_and_up(points: &[[f64; 3]], hints: &UpHints, tolerance: f64) -> Result<Frames> {
    hints.check(points.len())?;
    let mut aims = aim_vectors_from_points(points, tolerance)?;
    let n = points.len();

    let raw: Vec<Option<[f64; 3]>> = aims
        .windows(2)
        .map(|w| {
            let up = vector_ops::cross(vector_ops::normalize(w[0]), vector_ops::normalize(w[1]));
            vector_ops::try_normalize(up, tolerance)
        })
        .collect();

    let interior: Vec<[f64; 3]> = if raw.iter().all(Option::is_none) {
        (1..n - 1)
            .map(|i| hints.at(i).ok_or(Error::NoInterpolationKeys))
            .collect::<Result<_>>()?
    } else {
        let biased: Vec<Option<[f64; 3]>> = raw
            .iter()
            .enumerate()
            .map(|(k, up)| {
                let up = (*up)?;
                Some(match hints.at(k + 1) {
                    Some(hint) if vector_ops::dot(hint, up) < 0.0 => vector_ops::negate(up),
                    _ => up,
                })
            })
            .collect();
        let ratios = arc_length_ratios(points);
        deflip_vectors(&blend_nones(&biased, Some(&ratios[1..n - 1]))?)
    };

    let ups: Vec<[f64; 3]> = match (interior.first(), interior.last()) {
        (Some(first), Some(last)) => std::iter::once(*first)
            .chain(interior.iter().copied())
            .chain(std::iter::once(*last))
            .collect(),
        // Two points: no interior joint.
        _ => {
            let first = hints.at(0).ok_or(Error::NoInterpolationKeys)?;
            let last = hints.at(n - 1).unwrap_or(first);
            vec![first, last]
        }
    };
    if let Some(last) = aims.last().copied() {
        aims.push(last);
    }

    let ups = ups
        .iter()
        .zip(&aims)
        .map(|(up, aim)| orthonormal_up(*up, *aim, tolerance))
        .collect();
    Ok(Frames { aims, ups })
}

/// `up` with its component along `aim` removed, normalized.
fn orthonormal_up(up: [f64; 3], aim: [f64; 3], tolerance: f64) -> [f64; 3] {
    let rejected = vector_ops::reject(up, aim);
    match vector_ops::try_normalize(rejected, tolerance) {
        Some(v) => v,
        None => {
            warn!(?up, ?aim, "up vector is parallel to its aim, using a perpendicular");
            vector_ops::normalize(vector_ops::any_perpendicular(aim))
        }
    }
}

/// One orthonormal matrix per point, aiming `aim_axis` down the polyline
/// with `up_axis` along the framed up vector.
pub fn aiming_matrices(
    points: &[[f64; 3]],
    aim_axis: Axis,
    up_axis: Axis,
    hints: &UpHints,
    tolerance: f64,
) -> Result<Vec<[f64; 16]>> {
    let frames = framed_aim_and_up(points, hints, tolerance)?;
    points
        .iter()
        .zip(frames.aims.iter().zip(&frames.ups))
        .map(|(p, (aim, up))| aim_matrix(aim_axis, *aim, up_axis, *up, *p))
        .collect()
}
