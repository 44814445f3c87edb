//! Errors raised while classifying operands and compiling expressions.
//!
//! # Error Categories
//!
//! - **Input errors**: [`Error::TypeClassification`], [`Error::LengthMismatch`],
//!   [`Error::InsufficientPoints`]
//! - **Dispatch errors**: [`Error::UnsupportedOperand`]
//! - **Numeric errors**: [`Error::Singular`], [`Error::NoInterpolationKeys`]
//! - **Host errors**: [`Error::HostGraph`], [`Error::Lookup`], passed through
//!   unchanged from the host graph
//!
//! Degenerate geometry (parallel vectors, zero lengths) is not an error; the
//! numeric kernels pass such inputs through.

use rigmath_foundation::{Kind, OpKey};
use rigmath_graph::{GraphError, LookupError};
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building an expression.
#[derive(Debug, Error)]
pub enum Error {
    /// An input could not be mapped onto a supported kind.
    #[error("cannot classify {found}: {reason}")]
    TypeClassification {
        /// Short description of the rejected input.
        found: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// No computation or recipe exists for this operator and operand kinds.
    #[error("unsupported operands for `{op}`: {lhs}{}", .rhs.map(|k| format!(" and {k}")).unwrap_or_default())]
    UnsupportedOperand {
        /// Operator attempted.
        op: OpKey,
        /// Left (or only) operand kind.
        lhs: Kind,
        /// Right operand kind, for binary operators.
        rhs: Option<Kind>,
    },

    /// Interpolation was asked to fill a sequence with no defined samples.
    #[error("no interpolation keys: every sample is undefined")]
    NoInterpolationKeys,

    /// Concrete inverse of a singular matrix or zero quaternion.
    #[error("{kind} is singular and cannot be inverted")]
    Singular {
        /// Kind of the operand.
        kind: Kind,
    },

    /// A curve algorithm needs more samples.
    #[error("need at least {needed} points, got {got}")]
    InsufficientPoints {
        /// Minimum sample count.
        needed: usize,
        /// Samples supplied.
        got: usize,
    },

    /// A per-sample list does not line up with the samples.
    #[error("{what} has {got} entries, expected {expected}")]
    LengthMismatch {
        /// Which list.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// A host graph mutation failed.
    #[error(transparent)]
    HostGraph(#[from] GraphError),

    /// A textual attribute identifier did not resolve.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Error {
    /// Unsupported binary operation.
    pub fn unsupported(op: impl Into<OpKey>, lhs: Kind, rhs: Option<Kind>) -> Self {
        Error::UnsupportedOperand {
            op: op.into(),
            lhs,
            rhs,
        }
    }
}
