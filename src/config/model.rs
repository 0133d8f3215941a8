// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::resolve::Node;
use crate::types::{ResolverOptions, ScorePolicy, DEFAULT_MAX_PATHS};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [resolver]
/// max_paths = 10000
/// score = "balanced"
///
/// [action.root]
///
/// [action.build]
/// depends = ["root", "lint"]
/// after = "root"
/// ```
///
/// All sections are optional and have reasonable defaults; semantic
/// validation happens in `ConfigFile::try_from`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Resolver tuning from `[resolver]`.
    #[serde(default)]
    pub resolver: ResolverSection,

    /// All actions from `[action.<id>]`, keyed by id.
    #[serde(default)]
    pub action: BTreeMap<String, ActionConfig>,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub resolver: ResolverSection,
    pub action: BTreeMap<String, ActionConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        resolver: ResolverSection,
        action: BTreeMap<String, ActionConfig>,
    ) -> Self {
        Self { resolver, action }
    }

    /// Node descriptors for the resolver, in id order.
    pub fn nodes(&self) -> Vec<Node> {
        self.action
            .iter()
            .map(|(id, action)| Node {
                id: id.clone(),
                depends: action.depends.clone(),
                after: action.after.clone(),
            })
            .collect()
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            max_paths: Some(self.resolver.max_paths),
            score: self.resolver.score,
        }
    }
}

/// `[resolver]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverSection {
    /// Upper bound on complete resolution paths examined per resolution.
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,

    /// `"balanced"` (default) or `"lexical"`.
    #[serde(default)]
    pub score: ScorePolicy,
}

fn default_max_paths() -> usize {
    DEFAULT_MAX_PATHS
}

impl Default for ResolverSection {
    fn default() -> Self {
        Self {
            max_paths: default_max_paths(),
            score: ScorePolicy::default(),
        }
    }
}

/// `[action.<id>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionConfig {
    /// Actions that must have run before this one.
    #[serde(default)]
    pub depends: Vec<String>,

    /// Preferred immediate predecessor; must be listed in `depends`.
    ///
    /// Inferred when `depends` has exactly one entry.
    #[serde(default)]
    pub after: Option<String>,

    /// Free-form description, shown by `--dry-run`.
    #[serde(default)]
    pub description: Option<String>,
}
