//! rigmath Tools
//!
//! Command-line entry points over the rigmath functions. Requests are read
//! from YAML and reports are written as JSON.

pub mod commands;

use std::path::Path;

use anyhow::Context;
use rigmath_expr::EngineConfig;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,rigmath_tools=debug,rigmath_expr=info,rigmath_functions=info")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Engine configuration from `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Deserialize a YAML request file.
pub fn read_request<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("failed to parse '{}'", path.display()))
}
