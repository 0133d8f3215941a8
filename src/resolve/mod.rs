// src/resolve/mod.rs

//! Dependency / preference resolution.
//!
//! Pipeline, leaves first:
//! - [`node`] validates and normalizes the input descriptors.
//! - [`index`] derives the `referenced_by` sets.
//! - [`chain`] groups nodes into preference-respecting chains.
//! - [`path`] enumerates the valid orderings of those chains.
//! - [`score`] ranks the orderings and picks one deterministically.
//! - [`report`] rejects cyclic node sets up front and builds the failure
//!   payload when no ordering exists.
//!
//! [`tree`] is a diagnostic view of `after` links and is not part of the
//! pipeline.

pub mod chain;
pub mod index;
pub mod node;
pub mod path;
pub mod report;
pub mod score;
pub mod tree;

pub use chain::{build_chains, Chain};
pub use index::{build_index, ExtendedNode, ReferenceIndex};
pub use node::{normalize_all, Node};
pub use path::{enumerate_paths, ResolutionPath, ResolutionPaths};
pub use score::{score, select_best, PathScore, Selection};
pub use tree::PreferenceTree;

use tracing::debug;

use crate::errors::Result;
use crate::types::{NodeId, ResolverOptions};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Execution order.
    pub order: Vec<NodeId>,
    /// Chain partition, in path order.
    pub chains: Vec<Vec<NodeId>>,
    pub score: PathScore,
    pub paths_considered: usize,
    /// `true` if enumeration stopped at the path limit.
    pub truncated: bool,
}

/// Resolver with fixed options. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// Compute the execution order for `nodes`.
    pub fn resolve(&self, nodes: &[Node]) -> Result<Vec<NodeId>> {
        self.resolve_detailed(nodes).map(|r| r.order)
    }

    /// Like [`Resolver::resolve`], also returning the chain partition and
    /// search statistics.
    pub fn resolve_detailed(&self, nodes: &[Node]) -> Result<Resolution> {
        let normalized = normalize_all(nodes)?;

        report::ensure_acyclic(&normalized)?;

        let index = ReferenceIndex::build(&normalized);
        let chains = build_chains(&index);

        let selection = select_best(
            enumerate_paths(&chains),
            self.options.score,
            // At least one path must be examined to tell success from failure.
            self.options.max_paths.map(|limit| limit.max(1)),
        )
        .ok_or_else(|| report::circular_dependency(&normalized))?;

        report::verify_order(&normalized, &selection.order)?;

        debug!(
            nodes = normalized.len(),
            chains = chains.len(),
            paths = selection.considered,
            "resolution complete"
        );

        Ok(Resolution {
            chains: selection
                .path
                .chains()
                .iter()
                .map(|c| c.ids().to_vec())
                .collect(),
            order: selection.order,
            score: selection.score,
            paths_considered: selection.considered,
            truncated: selection.truncated,
        })
    }
}

/// Resolve with default options.
pub fn resolve(nodes: &[Node]) -> Result<Vec<NodeId>> {
    Resolver::default().resolve(nodes)
}
