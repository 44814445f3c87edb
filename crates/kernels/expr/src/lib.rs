//! rigmath Expression Compiler
//!
//! Arithmetic over [`Operand`]s that are either concrete values or live
//! outputs of a host graph. A [`GraphBuilder`] evaluates an operation
//! directly when every operand is concrete, and otherwise realizes it as a
//! small fragment of host nodes, returning a live handle on the result.
//!
//! # Modules
//!
//! - [`classify`]: loose inputs to typed operands
//! - [`builder`]: host access, node naming and operand binding
//! - [`compile`]: the operator surface and recipe dispatch
//! - [`concrete`]: direct numeric evaluation
//! - [`chain`]: ordered matrix products
//! - [`config`]: engine configuration loaded from YAML
//!
//! Node recipes for live operators are registered in `recipes` through the
//! `rigmath-recipe-registry` distributed slice.
//!
//! # Example
//!
//! ```ignore
//! let mut host = MemoryGraph::new();
//! let twist = host.declare("ctl.twist", Value::Scalar(0.0));
//! let mut b = GraphBuilder::new(&mut host);
//! let doubled = b.scoped("arm", |b| b.mul(&twist, 2.0))?;
//! ```

pub mod builder;
pub mod chain;
pub mod classify;
pub mod compile;
pub mod concrete;
pub mod config;
pub mod error;
pub mod naming;
pub mod operand;
mod recipes;

pub use builder::GraphBuilder;
pub use classify::{Classified, ClassifyOptions, Input, classify};
pub use compile::UnwindSwitch;
pub use config::{ConfigError, EngineConfig, NamingConfig};
pub use error::{Error, Result};
pub use naming::NameStack;
pub use operand::Operand;
