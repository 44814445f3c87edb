//! Interpolation helpers for sparse sample sequences.
//!
//! Curve framing produces per-sample values that may be undefined (`None`);
//! these helpers resolve such gaps from their neighbours.

use rigmath_expr::{Error, Result};
use rigmath_foundation::vector_ops;

/// Values that can be linearly interpolated.
pub trait Lerp: Clone {
    /// `self + (other - self) * t`
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f64; 3] {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        vector_ops::lerp(*self, *other, t)
    }
}

/// Ratio-keyed linear interpolator with clamped ends.
#[derive(Debug, Clone, Default)]
pub struct LinearInterpolator<T> {
    keys: Vec<(f64, T)>,
}

impl<T: Lerp> LinearInterpolator<T> {
    /// Empty interpolator.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Set the value at `ratio`, replacing any key at the same ratio.
    pub fn insert(&mut self, ratio: f64, value: T) {
        match self.keys.binary_search_by(|(r, _)| r.total_cmp(&ratio)) {
            Ok(i) => self.keys[i].1 = value,
            Err(i) => self.keys.insert(i, (ratio, value)),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Value at `ratio`. Ratios outside the keyed range take the nearest end
    /// value.
    pub fn sample(&self, ratio: f64) -> Result<T> {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return Err(Error::NoInterpolationKeys);
        };
        if ratio <= first.0 {
            return Ok(first.1.clone());
        }
        if ratio >= last.0 {
            return Ok(last.1.clone());
        }
        let upper = self.keys.partition_point(|(r, _)| *r <= ratio);
        let (r0, v0) = &self.keys[upper - 1];
        let (r1, v1) = &self.keys[upper];
        if r1 == r0 {
            return Ok(v0.clone());
        }
        Ok(v0.lerp(v1, (ratio - r0) / (r1 - r0)))
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn float_range(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Fill gaps by repeating the previous defined value; leading gaps take the
/// first defined value.
pub fn chase_nones<T: Clone>(source: &[Option<T>]) -> Result<Vec<T>> {
    if source.is_empty() {
        return Ok(Vec::new());
    }
    let first = source
        .iter()
        .flatten()
        .next()
        .ok_or(Error::NoInterpolationKeys)?;

    let mut resolved: Vec<T> = Vec::with_capacity(source.len());
    for member in source {
        let value = match (member, resolved.last()) {
            (Some(v), _) => v.clone(),
            (None, Some(prev)) => prev.clone(),
            (None, None) => first.clone(),
        };
        resolved.push(value);
    }
    Ok(resolved)
}

/// Fill gaps by interpolating between defined neighbours.
///
/// `ratios` places each member on a 0..1 axis; when omitted the members are
/// spaced evenly.
pub fn blend_nones<T: Lerp>(source: &[Option<T>], ratios: Option<&[f64]>) -> Result<Vec<T>> {
    if source.is_empty() {
        return Ok(Vec::new());
    }
    let ratios = match ratios {
        Some(r) if r.len() != source.len() => {
            return Err(Error::LengthMismatch {
                what: "ratios",
                expected: source.len(),
                got: r.len(),
            });
        }
        Some(r) => r.to_vec(),
        None => float_range(0.0, 1.0, source.len()),
    };

    let mut interpolator = LinearInterpolator::new();
    for (ratio, member) in ratios.iter().zip(source) {
        if let Some(v) = member {
            interpolator.insert(*ratio, v.clone());
        }
    }
    ratios
        .iter()
        .zip(source)
        .map(|(ratio, member)| match member {
            Some(v) => Ok(v.clone()),
            None => interpolator.sample(*ratio),
        })
        .collect()
}

/// Cumulative arc length of each point over the total, from 0 to 1.
///
/// A polyline of zero length is spaced evenly.
pub fn arc_length_ratios(points: &[[f64; 3]]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += vector_ops::length(vector_ops::sub(*p, points[i - 1]));
        }
        cumulative.push(total);
    }
    if total <= 0.0 {
        return float_range(0.0, 1.0, points.len());
    }
    cumulative.into_iter().map(|c| c / total).collect()
}

/// Normalize each vector and flip it when that brings it closer to the
/// previous (already deflipped) vector.
pub fn deflip_vectors(vectors: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let mut out: Vec<[f64; 3]> = Vec::with_capacity(vectors.len());
    for v in vectors {
        let v = vector_ops::normalize(*v);
        let v = match out.last() {
            Some(prev) if vector_ops::dot(*prev, v) < 0.0 => vector_ops::negate(v),
            _ => v,
        };
        out.push(v);
    }
    out
}
