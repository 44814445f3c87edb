//! Angle units and unwinding.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// How an angle is brought back into a single turn.
///
/// Discriminants match the integer switch accepted by live blends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnwindMode {
    /// Into `(-π, π]`.
    #[default]
    Shortest = 0,
    /// Into `[0, 2π)`.
    Positive = 1,
    /// Into `(-2π, 0]`.
    Negative = 2,
}

/// Unit in which callers write angle literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Radians; stored as-is.
    #[default]
    Radians,
    /// Degrees; converted on construction.
    Degrees,
}

impl UnwindMode {
    /// Mode for a host switch value, if in range.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(UnwindMode::Shortest),
            1 => Some(UnwindMode::Positive),
            2 => Some(UnwindMode::Negative),
            _ => None,
        }
    }
}

impl AngleUnit {
    /// Convert a literal in this unit to radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => value.to_radians(),
        }
    }
}

/// Wrap into `[0, 2π)`.
pub fn unwind_positive(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if r >= TAU { 0.0 } else { r }
}

/// Wrap into `(-2π, 0]`.
pub fn unwind_negative(angle: f64) -> f64 {
    let r = unwind_positive(angle);
    if r == 0.0 { 0.0 } else { r - TAU }
}

/// Wrap into `(-π, π]`.
pub fn unwind_shortest(angle: f64) -> f64 {
    let r = unwind_positive(angle);
    if r > PI { r - TAU } else { r }
}

/// Wrap according to `mode`.
pub fn unwind(angle: f64, mode: UnwindMode) -> f64 {
    match mode {
        UnwindMode::Shortest => unwind_shortest(angle),
        UnwindMode::Positive => unwind_positive(angle),
        UnwindMode::Negative => unwind_negative(angle),
    }
}
