#![allow(dead_code)]

use std::collections::BTreeMap;

use prefchain::Node;
use prefchain::config::{ActionConfig, ConfigFile, RawConfigFile, ResolverSection};
use prefchain::types::ScorePolicy;

/// Shorthand for a node with dependencies and no explicit `after`.
pub fn node(id: &str, depends: &[&str]) -> Node {
    Node::new(id).depends(depends.iter().copied())
}

/// Shorthand for a node with dependencies and an explicit `after`.
pub fn node_after(id: &str, depends: &[&str], after: &str) -> Node {
    node(id, depends).after(after)
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                resolver: ResolverSection::default(),
                action: BTreeMap::new(),
            },
        }
    }

    pub fn with_action(mut self, id: &str, action: ActionConfig) -> Self {
        self.config.action.insert(id.to_string(), action);
        self
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.config.resolver.max_paths = max_paths;
        self
    }

    pub fn with_score(mut self, score: ScorePolicy) -> Self {
        self.config.resolver.score = score;
        self
    }

    /// The raw, unvalidated config.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ActionConfig`.
pub struct ActionConfigBuilder {
    action: ActionConfig,
}

impl ActionConfigBuilder {
    pub fn new() -> Self {
        Self {
            action: ActionConfig::default(),
        }
    }

    pub fn depends(mut self, dep: &str) -> Self {
        self.action.depends.push(dep.to_string());
        self
    }

    pub fn after(mut self, after: &str) -> Self {
        self.action.after = Some(after.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.action.description = Some(text.to_string());
        self
    }

    pub fn build(self) -> ActionConfig {
        self.action
    }
}

impl Default for ActionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
