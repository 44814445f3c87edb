//! Operand classification.
//!
//! Every public operation accepts loosely typed [`Input`]s (numbers, lists,
//! attribute names, values, handles) and normalizes them here into an
//! [`Operand`] with a fixed dimension and unit.
//!
//! # Rules
//!
//! | Input | Result |
//! |---|---|
//! | number, bool | 1D concrete scalar |
//! | list of 2 / 3 / 4 / 16 | vec2 / vector (euler with angle context) / quaternion / matrix |
//! | attribute name | live handle resolved by the host |
//! | value, handle, operand | unchanged |
//!
//! With an angle context, scalars and triples are tagged as angles and
//! literals are converted from the configured angle unit into radians.

use rigmath_foundation::{AngleUnit, Dimension, Kind, UnitType, Value};
use rigmath_graph::{HostGraph, LiveHandle};

use crate::error::{Error, Result};
use crate::operand::Operand;

/// Anything an operation accepts as an operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Numeric literal.
    Number(f64),
    /// Boolean literal, read as 0 or 1.
    Bool(bool),
    /// Numeric list.
    List(Vec<f64>),
    /// Textual attribute identifier, resolved through the host.
    Attribute(String),
    /// Already-typed operand.
    Operand(Operand),
}

/// Classification context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifyOptions {
    /// Tag scalars and triples as angles.
    pub angle: bool,
    /// Unit of angle literals.
    pub angle_unit: AngleUnit,
}

/// A normalized operand with its tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// Normalized operand.
    pub operand: Operand,
    /// Lane count.
    pub dimension: Dimension,
    /// Unit metadata.
    pub unit: UnitType,
    /// Whether the operand is live.
    pub is_live: bool,
}

impl Classified {
    fn new(operand: Operand, unit: UnitType) -> Self {
        Self {
            dimension: operand.dimension(),
            is_live: operand.is_live(),
            operand,
            unit,
        }
    }
}

/// Normalize `input` into an operand.
pub fn classify(input: Input, host: &dyn HostGraph, options: ClassifyOptions) -> Result<Classified> {
    let to_radians = |v: f64| options.angle_unit.to_radians(v);

    match input {
        Input::Number(v) if options.angle => Ok(Classified::new(
            Operand::Concrete(Value::Scalar(to_radians(v))),
            UnitType::Angle,
        )),
        Input::Number(v) => Ok(Classified::new(
            Operand::Concrete(Value::Scalar(v)),
            UnitType::None,
        )),
        Input::Bool(b) => Ok(Classified::new(
            Operand::Concrete(Value::Scalar(if b { 1.0 } else { 0.0 })),
            UnitType::None,
        )),
        Input::List(lanes) => classify_list(&lanes, options),
        Input::Attribute(name) => {
            let handle = host.resolve(&name)?;
            Ok(classify_handle(handle, options))
        }
        Input::Operand(operand) => {
            let unit = operand.unit();
            Ok(Classified::new(operand, unit))
        }
    }
}

fn classify_list(lanes: &[f64], options: ClassifyOptions) -> Result<Classified> {
    let dimension = Dimension::from_len(lanes.len())
        .filter(|d| *d != Dimension::One)
        .ok_or_else(|| Error::TypeClassification {
            found: format!("list of {} numbers", lanes.len()),
            reason: "lists must have 2, 3, 4 or 16 entries",
        })?;

    let (kind, unit) = match dimension {
        Dimension::Three if options.angle => (Kind::Euler, UnitType::Angle),
        d => (Kind::for_dimension(d), UnitType::None),
    };
    let converted: Vec<f64> = if kind == Kind::Euler {
        lanes
            .iter()
            .map(|&v| options.angle_unit.to_radians(v))
            .collect()
    } else {
        lanes.to_vec()
    };
    let value = Value::from_components(kind, &converted).ok_or(Error::TypeClassification {
        found: format!("list of {} numbers", lanes.len()),
        reason: "lane count does not match kind",
    })?;
    Ok(Classified::new(Operand::Concrete(value), unit))
}

fn classify_handle(handle: LiveHandle, options: ClassifyOptions) -> Classified {
    let handle = match (options.angle, handle.dimension()) {
        (true, Dimension::One) => handle.retagged(Kind::Scalar, UnitType::Angle),
        (true, Dimension::Three) => handle.retagged(Kind::Euler, UnitType::Angle),
        _ => handle,
    };
    let unit = handle.unit();
    Classified::new(Operand::Live(handle), unit)
}

impl From<f64> for Input {
    fn from(v: f64) -> Self {
        Input::Number(v)
    }
}

impl From<i32> for Input {
    fn from(v: i32) -> Self {
        Input::Number(v as f64)
    }
}

impl From<i64> for Input {
    fn from(v: i64) -> Self {
        Input::Number(v as f64)
    }
}

impl From<bool> for Input {
    fn from(b: bool) -> Self {
        Input::Bool(b)
    }
}

impl<const N: usize> From<[f64; N]> for Input {
    fn from(lanes: [f64; N]) -> Self {
        Input::List(lanes.to_vec())
    }
}

impl From<Vec<f64>> for Input {
    fn from(lanes: Vec<f64>) -> Self {
        Input::List(lanes)
    }
}

impl From<&[f64]> for Input {
    fn from(lanes: &[f64]) -> Self {
        Input::List(lanes.to_vec())
    }
}

impl From<&str> for Input {
    fn from(name: &str) -> Self {
        Input::Attribute(name.to_string())
    }
}

impl From<String> for Input {
    fn from(name: String) -> Self {
        Input::Attribute(name)
    }
}

impl From<Value> for Input {
    fn from(v: Value) -> Self {
        Input::Operand(Operand::Concrete(v))
    }
}

impl From<LiveHandle> for Input {
    fn from(h: LiveHandle) -> Self {
        Input::Operand(Operand::Live(h))
    }
}

impl From<&LiveHandle> for Input {
    fn from(h: &LiveHandle) -> Self {
        Input::Operand(Operand::Live(h.clone()))
    }
}

impl From<Operand> for Input {
    fn from(op: Operand) -> Self {
        Input::Operand(op)
    }
}

impl From<&Operand> for Input {
    fn from(op: &Operand) -> Self {
        Input::Operand(op.clone())
    }
}

impl From<&Input> for Input {
    fn from(input: &Input) -> Self {
        input.clone()
    }
}
