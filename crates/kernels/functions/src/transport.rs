//! Parallel transport of normals along tangent sequences.
//!
//! Each step rotates the carried normal about `t[i] × t[i + 1]` by the angle
//! between the two tangents. Concrete tangents are solved numerically; live
//! tangents emit one rotation fragment per step. Every output is rejected
//! against its own tangent.

use rigmath_expr::{Error, GraphBuilder, Input, Operand, Result, UnwindSwitch};
use rigmath_foundation::Dimension;
use tracing::{instrument, trace};

use crate::blend::{VectorBlend, blend_vectors};
use crate::interpolate::float_range;

fn triples(b: &GraphBuilder<'_>, tangents: &[Input]) -> Result<Vec<Operand>> {
    if tangents.len() < 2 {
        return Err(Error::InsufficientPoints {
            needed: 2,
            got: tangents.len(),
        });
    }
    tangents
        .iter()
        .map(|t| {
            let operand = b.operand(t)?;
            if operand.dimension() != Dimension::Three {
                return Err(Error::TypeClassification {
                    found: operand.kind().to_string(),
                    reason: "tangents must be triples",
                });
            }
            Ok(operand)
        })
        .collect()
}

/// Carry `normal` from tangent `t0` to tangent `t1`.
fn step(b: &mut GraphBuilder<'_>, normal: Operand, t0: &Operand, t1: &Operand) -> Result<Operand> {
    let angle = b.angle_between(t0, t1)?;
    if angle.as_scalar().is_some_and(|a| a.abs() <= b.tolerance()) {
        trace!("tangents are parallel, passing normal through");
        return Ok(normal);
    }
    let axis = b.cross(t0, t1)?;
    b.rotate_by_axis_angle(normal, axis, angle)
}

fn transport(b: &mut GraphBuilder<'_>, start: Operand, tangents: &[Operand]) -> Result<Vec<Operand>> {
    let mut normal = start;
    let mut out = Vec::with_capacity(tangents.len());
    for (i, tangent) in tangents.iter().enumerate() {
        if i > 0 {
            normal = step(b, normal, &tangents[i - 1], tangent)?;
        }
        out.push(b.reject_from(&normal, tangent)?);
    }
    Ok(out)
}

/// Transport `start` forward along `tangents`, one normal per tangent.
#[instrument(skip_all, fields(tangents = tangents.len()))]
pub fn parallel_transport(
    b: &mut GraphBuilder<'_>,
    start: impl Into<Input>,
    tangents: &[Input],
) -> Result<Vec<Operand>> {
    let tangents = triples(b, tangents)?;
    let start = b.operand(start)?;
    transport(b, start, &tangents)
}

/// Transport `end` backward from the last tangent. The output is in tangent
/// order.
#[instrument(skip_all, fields(tangents = tangents.len()))]
pub fn parallel_transport_backward(
    b: &mut GraphBuilder<'_>,
    end: impl Into<Input>,
    tangents: &[Input],
) -> Result<Vec<Operand>> {
    let mut tangents = triples(b, tangents)?;
    tangents.reverse();
    let end = b.operand(end)?;
    let mut out = transport(b, end, &tangents)?;
    out.reverse();
    Ok(out)
}

/// Transport `start` forward and `end` backward, then blend the two
/// solutions per sample.
///
/// Sample `i` takes `ratios[i]` of the backward solution, rotating around its
/// tangent with `unwind`. Ratios default to an even spread from 0 to 1.
#[instrument(skip_all, fields(tangents = tangents.len()))]
pub fn bidirectional_parallel_transport(
    b: &mut GraphBuilder<'_>,
    start: impl Into<Input>,
    end: impl Into<Input>,
    tangents: &[Input],
    ratios: Option<&[f64]>,
    unwind: impl Into<UnwindSwitch>,
) -> Result<Vec<Operand>> {
    let tangents = triples(b, tangents)?;
    let ratios = match ratios {
        Some(r) if r.len() != tangents.len() => {
            return Err(Error::LengthMismatch {
                what: "ratios",
                expected: tangents.len(),
                got: r.len(),
            });
        }
        Some(r) => r.to_vec(),
        None => float_range(0.0, 1.0, tangents.len()),
    };
    let unwind = unwind.into();

    let start = b.operand(start)?;
    let end = b.operand(end)?;
    let forward = transport(b, start, &tangents)?;
    let reversed: Vec<Operand> = tangents.iter().rev().cloned().collect();
    let mut backward = transport(b, end, &reversed)?;
    backward.reverse();

    let mut out = Vec::with_capacity(tangents.len());
    for (((fwd, bwd), tangent), ratio) in forward.iter().zip(&backward).zip(&tangents).zip(ratios) {
        let options = VectorBlend::around(tangent).unwind(unwind.clone());
        let blended = blend_vectors(b, fwd, bwd, ratio, &options)?;
        out.push(b.reject_from(blended, tangent)?);
    }
    Ok(out)
}
