// src/types.rs

use std::str::FromStr;
use serde::Deserialize;

/// Identifier of an action / node.
pub type NodeId = String;

/// Policy used to rank candidate resolution paths.
///
/// - `Balanced`: prefer paths that honour more `after` preferences, then
///   paths that place heavily referenced chains early, then the
///   lexicographically smallest order (default).
/// - `Lexical`: only the lexicographic order of the flattened ids counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolicy {
    Balanced,
    Lexical,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        ScorePolicy::Balanced
    }
}

impl FromStr for ScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" => Ok(ScorePolicy::Balanced),
            "lexical" => Ok(ScorePolicy::Lexical),
            other => Err(format!(
                "invalid score policy: {other} (expected \"balanced\" or \"lexical\")"
            )),
        }
    }
}

/// Default bound on the number of resolution paths examined per call.
pub const DEFAULT_MAX_PATHS: usize = 10_000;

/// Tuning knobs for a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Stop enumerating after this many complete paths. `None` means the
    /// search is exhaustive.
    pub max_paths: Option<usize>,
    pub score: ScorePolicy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_paths: Some(DEFAULT_MAX_PATHS),
            score: ScorePolicy::default(),
        }
    }
}
