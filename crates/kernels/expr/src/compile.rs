//! Operator dispatch.
//!
//! Every operator is written once against [`Operand`]: when all operands are
//! concrete the result is computed directly, otherwise the recipe registered
//! for the operand dimensions is realized as one host node. Lookup tries the
//! recipe owned by the left operand first and then the reflected recipe owned
//! by the right operand.

use std::f64::consts::{PI, TAU};

use rigmath_foundation::{
    Comparison, Dimension, Kind, OpKey, Operator, UnaryOp, UnitType, UnwindMode, Value, angle,
    binary_result, unary_result, vector_ops,
};
use rigmath_graph::LiveHandle;
use rigmath_recipe_registry::ports::{choice, condition};
use rigmath_recipe_registry::{Owner, lookup};
use tracing::trace;

use crate::builder::GraphBuilder;
use crate::classify::Input;
use crate::concrete;
use crate::error::{Error, Result};
use crate::operand::Operand;

/// Unwinding applied by [`GraphBuilder::unwind_angle`].
#[derive(Debug, Clone, PartialEq)]
pub enum UnwindSwitch {
    /// A mode known now.
    Fixed(UnwindMode),
    /// An integer attribute holding the mode index
    /// (0 shortest, 1 positive, 2 negative).
    Live(Operand),
}

impl From<UnwindMode> for UnwindSwitch {
    fn from(mode: UnwindMode) -> Self {
        UnwindSwitch::Fixed(mode)
    }
}

impl From<LiveHandle> for UnwindSwitch {
    fn from(handle: LiveHandle) -> Self {
        UnwindSwitch::Live(Operand::Live(handle))
    }
}

fn scalar(v: f64) -> Operand {
    Operand::Concrete(Value::Scalar(v))
}

impl GraphBuilder<'_> {
    /// Classify both operands (left first) and apply `op`.
    pub fn binary(
        &mut self,
        op: Operator,
        lhs: impl Into<Input>,
        rhs: impl Into<Input>,
    ) -> Result<Operand> {
        let lhs = self.operand(lhs)?;
        let rhs = self.operand(rhs)?;
        self.apply_binary(op, &lhs, &rhs)
    }

    /// Apply `op` to already classified operands.
    pub fn apply_binary(&mut self, op: Operator, lhs: &Operand, rhs: &Operand) -> Result<Operand> {
        // Points carry translation through matrices; other triples are directions.
        let op = match (op, lhs.kind(), rhs.kind()) {
            (Operator::Mul, Kind::Point, Kind::Matrix) => Operator::PointMatrixMul,
            _ => op,
        };
        if let (Operand::Concrete(a), Operand::Concrete(b)) = (lhs, rhs) {
            return Ok(Operand::Concrete(concrete::binary(op, a, b)?));
        }

        let unsupported = || Error::unsupported(op, lhs.kind(), Some(rhs.kind()));
        binary_result(op, lhs.kind(), rhs.kind())
            .kind()
            .ok_or_else(unsupported)?;

        let key = OpKey::Binary(op);
        let (l, r) = (lhs.dimension(), Some(rhs.dimension()));
        let recipe = match lookup(key, l, r, Owner::Lhs) {
            Some(recipe) => recipe,
            None => {
                trace!(%key, lhs = %l, rhs = %rhs.dimension(), "trying reflected recipe");
                lookup(key, l, r, Owner::Rhs).ok_or_else(unsupported)?
            }
        };
        self.synthesize(recipe, lhs, Some(rhs))
    }

    /// Classify the operand and apply `op`.
    pub fn unary(&mut self, op: UnaryOp, operand: impl Into<Input>) -> Result<Operand> {
        let operand = self.operand(operand)?;
        self.apply_unary(op, &operand)
    }

    /// Apply `op` to an already classified operand.
    pub fn apply_unary(&mut self, op: UnaryOp, operand: &Operand) -> Result<Operand> {
        if let Operand::Concrete(v) = operand {
            return Ok(Operand::Concrete(concrete::unary(op, v)?));
        }
        let unsupported = || Error::unsupported(op, operand.kind(), None);
        unary_result(op, operand.kind())
            .kind()
            .ok_or_else(unsupported)?;
        let recipe = lookup(OpKey::Unary(op), operand.dimension(), None, Owner::Lhs)
            .ok_or_else(unsupported)?;
        self.synthesize(recipe, operand, None)
    }

    /// `a + b`
    pub fn add(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::Add, a, b)
    }

    /// `a - b`
    pub fn sub(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::Sub, a, b)
    }

    /// `a * b`. A point times a matrix is transformed as a position; any
    /// other triple times a matrix is transformed as a direction.
    pub fn mul(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::Mul, a, b)
    }

    /// `a / b`
    pub fn div(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::Div, a, b)
    }

    /// `a ** b`
    pub fn pow(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::Pow, a, b)
    }

    /// `-a`
    pub fn neg(&mut self, a: impl Into<Input>) -> Result<Operand> {
        self.unary(UnaryOp::Neg, a)
    }

    /// `other + receiver`
    pub fn radd(&mut self, receiver: impl Into<Input>, other: impl Into<Input>) -> Result<Operand> {
        let receiver = self.operand(receiver)?;
        self.binary(Operator::Add, other, receiver)
    }

    /// `other - receiver`
    pub fn rsub(&mut self, receiver: impl Into<Input>, other: impl Into<Input>) -> Result<Operand> {
        let receiver = self.operand(receiver)?;
        self.binary(Operator::Sub, other, receiver)
    }

    /// `other * receiver`
    pub fn rmul(&mut self, receiver: impl Into<Input>, other: impl Into<Input>) -> Result<Operand> {
        let receiver = self.operand(receiver)?;
        self.binary(Operator::Mul, other, receiver)
    }

    /// `other / receiver`
    pub fn rdiv(&mut self, receiver: impl Into<Input>, other: impl Into<Input>) -> Result<Operand> {
        let receiver = self.operand(receiver)?;
        self.binary(Operator::Div, other, receiver)
    }

    /// `other ** receiver`
    pub fn rpow(&mut self, receiver: impl Into<Input>, other: impl Into<Input>) -> Result<Operand> {
        let receiver = self.operand(receiver)?;
        self.binary(Operator::Pow, other, receiver)
    }

    /// Transform `p` as a point (translation applied). The result is a
    /// point.
    pub fn point_matrix_mul(
        &mut self,
        p: impl Into<Input>,
        m: impl Into<Input>,
    ) -> Result<Operand> {
        self.binary(Operator::PointMatrixMul, p, m)
    }

    /// Cross product.
    pub fn cross(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::Cross, a, b)
    }

    /// Dot product.
    pub fn dot(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::Dot, a, b)
    }

    /// Inverse of a matrix or quaternion.
    pub fn inverse(&mut self, a: impl Into<Input>) -> Result<Operand> {
        self.unary(UnaryOp::Inverse, a)
    }

    /// Euclidean length of a triple.
    pub fn length(&mut self, a: impl Into<Input>) -> Result<Operand> {
        self.unary(UnaryOp::Length, a)
    }

    /// Unit vector along a triple. Zero-length input passes through.
    pub fn normal(&mut self, a: impl Into<Input>) -> Result<Operand> {
        self.unary(UnaryOp::Normalize, a)
    }

    /// Unsigned angle in `[0, π]` between two triples.
    pub fn angle_between(&mut self, a: impl Into<Input>, b: impl Into<Input>) -> Result<Operand> {
        self.binary(Operator::AngleBetween, a, b)
    }

    /// Angle from `a` to `b`.
    ///
    /// Without a clock normal this is [`GraphBuilder::angle_between`]. With
    /// one, angles on the far side of the plane spanned by `a` and the clock
    /// normal are reported as `2π - angle`, covering the full turn.
    pub fn angle_to(
        &mut self,
        a: impl Into<Input>,
        b: impl Into<Input>,
        clock_normal: Option<Input>,
    ) -> Result<Operand> {
        let a = self.operand(a)?;
        let b = self.operand(b)?;
        let angle = self.apply_binary(Operator::AngleBetween, &a, &b)?;
        let Some(clock_normal) = clock_normal else {
            return Ok(angle);
        };
        let clock_normal = self.operand(clock_normal)?;

        let side = self.apply_binary(Operator::Cross, &a, &clock_normal)?;
        let side = self.apply_unary(UnaryOp::Normalize, &side)?;
        let b_unit = self.apply_unary(UnaryOp::Normalize, &b)?;
        let facing = self.apply_binary(Operator::Dot, &side, &b_unit)?;
        let reflex = self.apply_binary(Operator::Sub, &scalar(TAU), &angle)?;
        let result = self.compare_select(Comparison::Gt, facing, 0.0, reflex, angle)?;
        Ok(tag_angle(result))
    }

    /// Rotate `v` about `axis` by `angle` (right-handed).
    ///
    /// Concrete inputs rotate directly; otherwise the rotation is built as
    /// axis-angle quaternion, rotation matrix and direction transform.
    pub fn rotate_by_axis_angle(
        &mut self,
        v: impl Into<Input>,
        axis: impl Into<Input>,
        angle: impl Into<Input>,
    ) -> Result<Operand> {
        let v = self.operand(v)?;
        let axis = self.operand(axis)?;
        let angle = self.classify_angle(angle)?.operand;

        if let (Some(vv), Some(ax), Some(theta)) = (v.as_value(), axis.as_triple(), angle.as_scalar()) {
            let value = match vv.as_triple() {
                Some(t) => Value::Vector(vector_ops::rotate_by_axis_angle(t, ax, theta))
                    .with_triple_kind(vv.kind()),
                None => {
                    return Err(Error::unsupported(
                        Operator::Mul,
                        vv.kind(),
                        Some(Kind::Matrix),
                    ));
                }
            };
            return Ok(Operand::Concrete(value));
        }

        let q = self.apply_binary(Operator::AxisAngle, &axis, &angle)?;
        let m = self.apply_unary(UnaryOp::QuatToMatrix, &q)?;
        self.apply_binary(Operator::Mul, &v, &m)
    }

    /// Quaternion rotating by `angle` about `axis`. The angle is read in the
    /// configured angle unit.
    pub fn quat_from_axis_angle(
        &mut self,
        axis: impl Into<Input>,
        angle: impl Into<Input>,
    ) -> Result<Operand> {
        let axis = self.operand(axis)?;
        let angle = self.classify_angle(angle)?.operand;
        self.apply_binary(Operator::AxisAngle, &axis, &angle)
    }

    /// Rotation matrix of a quaternion.
    pub fn quat_to_matrix(&mut self, q: impl Into<Input>) -> Result<Operand> {
        self.unary(UnaryOp::QuatToMatrix, q)
    }

    /// Component of `v` perpendicular to `onto`.
    pub fn reject_from(&mut self, v: impl Into<Input>, onto: impl Into<Input>) -> Result<Operand> {
        let v = self.operand(v)?;
        let onto = self.operand(onto)?;
        if let (Some(vv), Some(o)) = (v.as_value(), onto.as_triple()) {
            if let Some(t) = vv.as_triple() {
                let rejected = Value::Vector(vector_ops::reject(t, o)).with_triple_kind(vv.kind());
                return Ok(Operand::Concrete(rejected));
            }
        }
        let projected = self.project_onto(&v, &onto)?;
        self.apply_binary(Operator::Sub, &v, &projected)
    }

    /// Component of `v` along `onto`. A zero-length `onto` gives zero.
    pub fn project_onto(&mut self, v: impl Into<Input>, onto: impl Into<Input>) -> Result<Operand> {
        let v = self.operand(v)?;
        let onto = self.operand(onto)?;
        if let (Some(vv), Some(o)) = (v.as_triple(), onto.as_triple()) {
            return Ok(Operand::Concrete(Value::Vector(vector_ops::project(vv, o))));
        }
        let n = self.apply_unary(UnaryOp::Normalize, &onto)?;
        let d = self.apply_binary(Operator::Dot, &v, &n)?;
        self.apply_binary(Operator::Mul, &n, &d)
    }

    /// `if a <cmp> b { if_true } else { if_false }` on scalars.
    pub fn compare_select(
        &mut self,
        cmp: Comparison,
        a: impl Into<Input>,
        b: impl Into<Input>,
        if_true: impl Into<Input>,
        if_false: impl Into<Input>,
    ) -> Result<Operand> {
        let terms = [
            self.operand(a)?,
            self.operand(b)?,
            self.operand(if_true)?,
            self.operand(if_false)?,
        ];
        if let Some(bad) = terms.iter().find(|t| t.kind() != Kind::Scalar) {
            return Err(Error::TypeClassification {
                found: bad.kind().to_string(),
                reason: "conditional selection works on scalars",
            });
        }
        let [a, b, if_true, if_false] = terms;

        if let (Some(x), Some(y)) = (a.as_scalar(), b.as_scalar()) {
            return Ok(if cmp.test(x, y) { if_true } else { if_false });
        }

        let node = self.create_node(condition::NODE)?;
        self.set_static(&node, condition::OPERATION, cmp as i64)?;
        self.bind(&node, &condition::FIRST_TERM, &a)?;
        self.bind(&node, &condition::SECOND_TERM, &b)?;
        self.bind(&node, &condition::IF_TRUE, &if_true)?;
        self.bind(&node, &condition::IF_FALSE, &if_false)?;
        self.output(&node, condition::OUTPUT, Kind::Scalar, if_true.unit())
    }

    /// Pick `options[selector]`.
    ///
    /// All options must share a dimension. A concrete selector picks
    /// directly; a live one creates a `choice` node.
    pub fn choose(&mut self, selector: impl Into<Input>, options: Vec<Operand>) -> Result<Operand> {
        let selector = self.operand(selector)?;
        let Some(first) = options.first() else {
            return Err(Error::TypeClassification {
                found: "empty option list".to_string(),
                reason: "choice needs at least one option",
            });
        };
        if let Some(bad) = options.iter().find(|o| o.dimension() != first.dimension()) {
            return Err(Error::TypeClassification {
                found: bad.kind().to_string(),
                reason: "choice options must share a dimension",
            });
        }
        if selector.kind() != Kind::Scalar {
            return Err(Error::TypeClassification {
                found: selector.kind().to_string(),
                reason: "choice selector must be a scalar",
            });
        }

        if let Some(index) = selector.as_scalar() {
            let slot = index.round();
            let picked = if slot.is_finite() && slot >= 0.0 {
                options.get(slot as usize)
            } else {
                None
            };
            return picked.cloned().ok_or(Error::TypeClassification {
                found: format!("selector {index}"),
                reason: "selector is outside the option list",
            });
        }

        let (kind, unit) = (first.kind(), first.unit());
        let node = self.create_node(choice::NODE)?;
        self.bind(&node, &choice::SELECTOR, &selector)?;
        for (i, option) in options.iter().enumerate() {
            self.bind_port(&node, &choice::input(i), option)?;
        }
        self.output(&node, choice::OUTPUT, kind, unit)
    }

    /// Bring an angle into one turn.
    ///
    /// Concrete angles wrap exactly. Live angles are corrected with
    /// conditional nodes and are assumed to lie within one turn of the target
    /// range.
    pub fn unwind_angle(
        &mut self,
        angle: impl Into<Input>,
        switch: impl Into<UnwindSwitch>,
    ) -> Result<Operand> {
        let angle = self.classify_angle(angle)?.operand;
        match switch.into() {
            UnwindSwitch::Fixed(mode) => self.unwind_fixed(&angle, mode),
            UnwindSwitch::Live(selector) => {
                if let Some(mode) = selector.as_scalar().and_then(|i| UnwindMode::from_index(i as i64)) {
                    return self.unwind_fixed(&angle, mode);
                }
                let options = [UnwindMode::Shortest, UnwindMode::Positive, UnwindMode::Negative]
                    .into_iter()
                    .map(|mode| self.unwind_fixed(&angle, mode))
                    .collect::<Result<Vec<_>>>()?;
                let chosen = self.choose(selector, options)?;
                Ok(tag_angle(chosen))
            }
        }
    }

    fn unwind_fixed(&mut self, angle: &Operand, mode: UnwindMode) -> Result<Operand> {
        if let Some(a) = angle.as_scalar() {
            return Ok(scalar(angle::unwind(a, mode)));
        }
        // (threshold above which to subtract a turn, threshold below which to add one)
        let (upper, upper_cmp, lower, lower_cmp) = match mode {
            UnwindMode::Shortest => (PI, Comparison::Gt, -PI, Comparison::Le),
            UnwindMode::Positive => (TAU, Comparison::Ge, 0.0, Comparison::Lt),
            UnwindMode::Negative => (0.0, Comparison::Gt, -TAU, Comparison::Le),
        };
        let down = self.apply_binary(Operator::Sub, angle, &scalar(TAU))?;
        let wrapped = self.compare_select(upper_cmp, angle.clone(), upper, down, angle.clone())?;
        let up = self.apply_binary(Operator::Add, &wrapped, &scalar(TAU))?;
        let wrapped = self.compare_select(lower_cmp, wrapped.clone(), lower, up, wrapped)?;
        Ok(tag_angle(wrapped))
    }
}

fn tag_angle(operand: Operand) -> Operand {
    match operand {
        Operand::Live(h) if h.dimension() == Dimension::One => {
            Operand::Live(h.retagged(Kind::Scalar, UnitType::Angle))
        }
        other => other,
    }
}
