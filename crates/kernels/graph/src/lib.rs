//! rigmath Graph
//!
//! The boundary between the engine and a host dataflow graph: identifiers,
//! typed live handles, the [`HostGraph`] trait, and two bundled hosts
//! ([`MemoryGraph`] for recording and testing, [`NullGraph`] for purely
//! concrete work).

pub mod error;
pub mod handle;
pub mod host;
pub mod ids;
pub mod memory;

pub use error::{GraphError, LookupError};
pub use handle::LiveHandle;
pub use host::{HostGraph, Static};
pub use ids::{NodeId, PortRef};
pub use memory::{ATTRIBUTE_NODE, ATTRIBUTE_VALUE, MemoryGraph, NodeRecord, NullGraph};
