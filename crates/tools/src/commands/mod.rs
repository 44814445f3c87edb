//! Request and report types for each subcommand.

pub mod frame;
pub mod transport;
