//! Live handles: typed references to host graph outputs.

use std::fmt;

use rigmath_foundation::{Dimension, Kind, UnitType};
use serde::{Deserialize, Serialize};

use crate::ids::PortRef;

/// Reference to a value computed by the host graph at evaluation time.
///
/// Carries no numeric payload. The kind and unit are fixed when the handle
/// is created; re-tagging produces a new handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiveHandle {
    port: PortRef,
    kind: Kind,
    unit: UnitType,
}

impl LiveHandle {
    /// Handle on `port` carrying a value of `kind`.
    pub fn new(port: PortRef, kind: Kind, unit: UnitType) -> Self {
        Self { port, kind, unit }
    }

    /// Port the value is read from.
    pub fn port(&self) -> &PortRef {
        &self.port
    }

    /// Semantic tag.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Lane count.
    pub fn dimension(&self) -> Dimension {
        self.kind.dimension()
    }

    /// Unit metadata.
    pub fn unit(&self) -> UnitType {
        self.unit
    }

    /// Same port with a different tag. The dimension must not change.
    pub fn retagged(&self, kind: Kind, unit: UnitType) -> Self {
        debug_assert_eq!(kind.dimension(), self.kind.dimension());
        Self {
            port: self.port.clone(),
            kind,
            unit,
        }
    }
}

impl fmt::Display for LiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.port, self.kind)
    }
}
