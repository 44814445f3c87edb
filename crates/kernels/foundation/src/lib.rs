//! rigmath Foundation
//!
//! Value model and numeric kernels shared by every rigmath crate: the
//! [`Value`]/[`Kind`]/[`Dimension`] tags, operator enums, coercion rules,
//! and vector, matrix, quaternion and angle arithmetic.
//!
//! Conventions: matrices are row-major and act on row vectors (`v · M`),
//! quaternions are stored `[x, y, z, w]`, angles are radians.

pub mod angle;
pub mod coercion;
pub mod matrix_ops;
pub mod operators;
pub mod quat_ops;
pub mod value;
pub mod vector_ops;

pub use angle::{AngleUnit, UnwindMode};
pub use coercion::{TypeCheckResult, binary_result, unary_result};
pub use matrix_ops::{Channel, Decomposed};
pub use operators::{Comparison, OpKey, Operator, UnaryOp};
pub use value::{Dimension, IDENTITY, Kind, QUAT_IDENTITY, UnitType, Value};

/// Default tolerance for degeneracy checks in geometric algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;
