//! Linear, angle-aware and spherical blending.

use rigmath_expr::{Error, GraphBuilder, Input, Operand, Result, UnwindSwitch};
use rigmath_foundation::{Dimension, Kind, UnwindMode, Value, quat_ops, vector_ops};
use rigmath_recipe_registry::ports::{blend_colors, blend_two_attr, quat};

/// Options for [`blend_vectors`].
#[derive(Debug, Clone, Default)]
pub struct VectorBlend {
    /// Rotation axis. Angles are measured around it over the full turn;
    /// without it the axis is `a × b` and angles stay within 180°.
    pub clock_normal: Option<Input>,
    /// Unwinding applied to the angle before weighting.
    pub unwind: Option<UnwindSwitch>,
    /// Also blend the magnitudes linearly.
    pub include_length: bool,
}

impl VectorBlend {
    /// Blend around `clock_normal`.
    pub fn around(clock_normal: impl Into<Input>) -> Self {
        Self {
            clock_normal: Some(clock_normal.into()),
            ..Self::default()
        }
    }

    /// Unwind the angle with `switch`.
    pub fn unwind(mut self, switch: impl Into<UnwindSwitch>) -> Self {
        self.unwind = Some(switch.into());
        self
    }

    /// Blend magnitudes too.
    pub fn include_length(mut self) -> Self {
        self.include_length = true;
        self
    }
}

fn blend_operands(
    b: &GraphBuilder<'_>,
    a: Input,
    other: Input,
    weight: Input,
) -> Result<(Operand, Operand, Operand)> {
    let a = b.operand(a)?;
    let other = b.operand(other)?;
    let weight = b.operand(weight)?;
    if a.dimension() != other.dimension() {
        return Err(Error::TypeClassification {
            found: format!("{} and {}", a.kind(), other.kind()),
            reason: "blend operands must share a dimension",
        });
    }
    if weight.kind() != Kind::Scalar {
        return Err(Error::TypeClassification {
            found: weight.kind().to_string(),
            reason: "blend weight must be a scalar",
        });
    }
    Ok((a, other, weight))
}

/// `a + (other - a) * weight`.
///
/// Quaternions are interpolated spherically with the configured style.
pub fn blend(
    b: &mut GraphBuilder<'_>,
    a: impl Into<Input>,
    other: impl Into<Input>,
    weight: impl Into<Input>,
) -> Result<Operand> {
    let (a, other, weight) = blend_operands(b, a.into(), other.into(), weight.into())?;
    if a.dimension() == Dimension::Four {
        let style = b.config().slerp;
        return slerp(b, &a, &other, &weight, style);
    }

    if let (Some(x), Some(y), Some(w)) = (a.as_value(), other.as_value(), weight.as_scalar()) {
        let lanes: Vec<f64> = x
            .components()
            .iter()
            .zip(y.components())
            .map(|(p, q)| p + (q - p) * w)
            .collect();
        return Value::from_components(x.kind(), &lanes)
            .map(Operand::Concrete)
            .ok_or(Error::TypeClassification {
                found: x.kind().to_string(),
                reason: "blend result does not match the operand kind",
            });
    }

    match a.dimension() {
        Dimension::One => {
            let node = b.create_node(blend_two_attr::NODE)?;
            b.bind(&node, &blend_two_attr::INPUT0, &a)?;
            b.bind(&node, &blend_two_attr::INPUT1, &other)?;
            b.bind(&node, &blend_two_attr::BLENDER, &weight)?;
            b.output(&node, blend_two_attr::OUTPUT, a.kind(), a.unit())
        }
        Dimension::Three => {
            // color1 is taken at full weight.
            let node = b.create_node(blend_colors::NODE)?;
            b.bind(&node, &blend_colors::COLOR1, &other)?;
            b.bind(&node, &blend_colors::COLOR2, &a)?;
            b.bind(&node, &blend_colors::BLENDER, &weight)?;
            b.output(&node, blend_colors::OUTPUT, a.kind(), a.unit())
        }
        _ => Err(Error::TypeClassification {
            found: a.kind().to_string(),
            reason: "no live linear blend for this kind",
        }),
    }
}

/// Spherical interpolation from `a` to `other`.
pub fn blend_quaternions(
    b: &mut GraphBuilder<'_>,
    a: impl Into<Input>,
    other: impl Into<Input>,
    weight: impl Into<Input>,
    style: UnwindMode,
) -> Result<Operand> {
    let (a, other, weight) = blend_operands(b, a.into(), other.into(), weight.into())?;
    if a.kind() != Kind::Quat {
        return Err(Error::TypeClassification {
            found: a.kind().to_string(),
            reason: "spherical blending needs quaternions",
        });
    }
    slerp(b, &a, &other, &weight, style)
}

fn slerp(
    b: &mut GraphBuilder<'_>,
    a: &Operand,
    other: &Operand,
    weight: &Operand,
    style: UnwindMode,
) -> Result<Operand> {
    if let (Some(p), Some(q), Some(w)) = (a.as_quat(), other.as_quat(), weight.as_scalar()) {
        return Ok(Operand::Concrete(Value::Quat(quat_ops::slerp(p, q, w, style))));
    }
    let node = b.create_node(quat::SLERP)?;
    b.set_static(&node, quat::ANGLE_INTERPOLATION, style as i64)?;
    b.bind(&node, &quat::INPUT1, a)?;
    b.bind(&node, &quat::INPUT2, other)?;
    b.bind(&node, &quat::INPUT_T, weight)?;
    b.output(&node, quat::OUTPUT, Kind::Quat, a.unit())
}

/// Rotate `a` toward `other` by `angle(a, other) * weight`.
///
/// With [`VectorBlend::include_length`] the rotated direction is rescaled to
/// the linear blend of both lengths. The result is a vector.
pub fn blend_vectors(
    b: &mut GraphBuilder<'_>,
    a: impl Into<Input>,
    other: impl Into<Input>,
    weight: impl Into<Input>,
    options: &VectorBlend,
) -> Result<Operand> {
    let (a, other, weight) = blend_operands(b, a.into(), other.into(), weight.into())?;
    if a.dimension() != Dimension::Three {
        return Err(Error::TypeClassification {
            found: a.kind().to_string(),
            reason: "angle blending needs triples",
        });
    }

    let clock_normal = options
        .clock_normal
        .clone()
        .map(|cn| b.operand(cn))
        .transpose()?;
    let mut angle = b.angle_to(&a, &other, clock_normal.clone().map(Input::Operand))?;
    if let Some(switch) = options.unwind.clone() {
        angle = b.unwind_angle(angle, switch)?;
    }
    let angle = b.mul(angle, &weight)?;
    let axis = match clock_normal {
        Some(cn) => cn,
        None => {
            let axis = b.cross(&a, &other)?;
            // Antiparallel inputs have no plane of their own; turn about any perpendicular.
            match (axis.as_triple(), a.as_triple()) {
                (Some(n), Some(from)) if vector_ops::length(n) <= b.tolerance() => {
                    Operand::Concrete(Value::Vector(vector_ops::any_perpendicular(from)))
                }
                _ => axis,
            }
        }
    };
    let rotated = b.rotate_by_axis_angle(&a, axis, angle)?;

    let out = if options.include_length {
        let la = b.length(&a)?;
        let lb = b.length(&other)?;
        let length = blend(b, la, lb, &weight)?;
        let direction = b.normal(rotated)?;
        b.mul(direction, length)?
    } else {
        rotated
    };
    Ok(match out {
        Operand::Concrete(v) => Operand::Concrete(v.with_triple_kind(Kind::Vector)),
        Operand::Live(h) => Operand::Live(h.retagged(Kind::Vector, h.unit())),
    })
}
