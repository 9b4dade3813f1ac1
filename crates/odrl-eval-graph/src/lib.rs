//! Policy graph adapters: read N-Triples, N-Quads, Turtle or JSON-LD files into the engine's
//! in-memory graph. The syntax is chosen by file extension.
//!
//! This crate is allowed to do filesystem IO. JSON-LD documents must carry their context
//! inline; remote `@context` URLs are never fetched.

#![forbid(unsafe_code)]

mod format;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use odrl_eval_domain::InMemoryGraph;

pub use format::PolicyFormat;
pub use parse::{ParseError, parse_policy_graph};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text in the given syntax.
    ///
    /// Returns the number of distinct triples on success. **Never panics** on any input.
    pub fn parse_graph(text: &str, format: PolicyFormat) -> anyhow::Result<usize> {
        let graph = parse_policy_graph(text, format)?;
        Ok(graph.len())
    }
}

/// A parsed policy file and the syntax it was read as.
#[derive(Clone, Debug)]
pub struct LoadedPolicy {
    pub graph: InMemoryGraph,
    pub format: PolicyFormat,
}

/// Read and parse a policy graph file, picking the parser from its extension.
pub fn load_policy_graph(path: &Utf8Path) -> anyhow::Result<LoadedPolicy> {
    let Some(format) = PolicyFormat::from_path(path) else {
        anyhow::bail!("{path}: unrecognized policy file extension (expected .nt, .nq, .ttl, .jsonld or .json)");
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    let graph = parse_policy_graph(&text, format).with_context(|| format!("parse {path}"))?;
    tracing::debug!(%path, %format, triples = graph.len(), "policy graph loaded");
    Ok(LoadedPolicy { graph, format })
}
