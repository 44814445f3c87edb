//! Scoped node naming.
//!
//! Generated nodes are named `<segment><sep>...<sep><nodeType><n>`, where
//! `n` counts nodes of that type created under the same prefix.

use indexmap::IndexMap;

use crate::config::NamingConfig;

/// Stack of name segments plus per-name counters.
#[derive(Debug, Clone, Default)]
pub struct NameStack {
    segments: Vec<String>,
    counters: IndexMap<String, usize>,
    config: NamingConfig,
}

impl NameStack {
    /// Empty stack using `config`.
    pub fn new(config: NamingConfig) -> Self {
        Self {
            segments: Vec::new(),
            counters: IndexMap::new(),
            config,
        }
    }

    /// Push a segment. Empty segments are ignored by [`NameStack::prefix`].
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Pop the innermost segment.
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Joined segments.
    pub fn prefix(&self) -> String {
        self.segments
            .iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.config.separator)
    }

    /// Next name for a node of `node_type`.
    pub fn next(&mut self, node_type: &str) -> String {
        let prefix = self.prefix();
        let base = if prefix.is_empty() {
            node_type.to_string()
        } else {
            format!("{prefix}{}{node_type}", self.config.separator)
        };
        let counter = self.counters.entry(base.clone()).or_insert(0);
        *counter += 1;
        format!("{base}{:0width$}", counter, width = self.config.padding)
    }
}
