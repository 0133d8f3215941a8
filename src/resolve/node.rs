// src/resolve/node.rs

//! Node model: one unit of work with hard dependencies and an optional
//! preferred predecessor.

use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;
use tracing::warn;

use crate::errors::{PrefchainError, Result};
use crate::types::NodeId;

/// Descriptor of a single action as handed to the resolver.
///
/// - `depends`: ids that must have run before this one (order irrelevant).
/// - `after`: id that should, if possible, run immediately before this one.
///   Must be one of `depends`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub depends: Vec<NodeId>,
    #[serde(default)]
    pub after: Option<NodeId>,
}

impl Node {
    pub fn new<I: Into<NodeId>>(id: I) -> Self {
        Self {
            id: id.into(),
            depends: Vec::new(),
            after: None,
        }
    }

    pub fn depends<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.depends.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn after<S: Into<NodeId>>(mut self, after: S) -> Self {
        self.after = Some(after.into());
        self
    }

    /// Validate the preference and fill in the implied `after`.
    ///
    /// - `after` set but absent from `depends` -> `InvalidPreference`.
    /// - `after` unset and exactly one dependency -> `after` becomes that
    ///   dependency.
    /// - a node listing itself in `depends` -> `CircularDependency`.
    ///
    /// `depends` is deduplicated and sorted on the way out.
    pub fn normalize(mut self) -> Result<Self> {
        let deps: BTreeSet<NodeId> = self.depends.drain(..).collect();
        self.depends = deps.into_iter().collect();

        if let Some(ref after) = self.after {
            if !self.depends.contains(after) {
                return Err(PrefchainError::InvalidPreference {
                    node: self.id.clone(),
                    after: after.clone(),
                });
            }
        } else if self.depends.len() == 1 {
            self.after = Some(self.depends[0].clone());
        }

        if self.depends.contains(&self.id) {
            return Err(PrefchainError::CircularDependency {
                nodes: vec![self.id.clone()],
                cycles: vec![vec![self.id.clone()]],
            });
        }

        Ok(self)
    }

    /// Dependencies not already covered by the `after` preference.
    pub fn external_dependencies(&self) -> BTreeSet<&str> {
        self.depends
            .iter()
            .map(|d| d.as_str())
            .filter(|d| self.after.as_deref() != Some(*d))
            .collect()
    }
}

/// Normalize a whole node set, sorted by id.
///
/// Beyond the per-node rules of [`Node::normalize`], this rejects duplicate
/// ids and dependencies on ids that are not part of the set.
pub fn normalize_all(nodes: &[Node]) -> Result<Vec<Node>> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(node.id.as_str()) {
            return Err(PrefchainError::DuplicateNode(node.id.clone()));
        }
    }

    let mut normalized = nodes
        .iter()
        .cloned()
        .map(Node::normalize)
        .collect::<Result<Vec<_>>>()?;
    normalized.sort_by(|a, b| a.id.cmp(&b.id));

    for node in &normalized {
        if let Some(dep) = node.depends.iter().find(|d| !seen.contains(d.as_str())) {
            return Err(PrefchainError::UnknownDependency {
                node: node.id.clone(),
                dependency: dep.clone(),
            });
        }
        if node.after.is_none() && node.depends.len() > 1 {
            warn!(
                node = %node.id,
                depends = ?node.depends,
                "multiple dependencies and no `after`; node has no preferred predecessor"
            );
        }
    }

    Ok(normalized)
}
