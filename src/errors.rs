// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefchainError {
    /// A node names an `after` predecessor that is not one of its `depends`.
    #[error("invalid preference: action '{node}' prefers to run after '{after}', which is not in its `depends`")]
    InvalidPreference { node: String, after: String },

    /// No total order satisfies the dependency constraints.
    ///
    /// `nodes` lists every id that took part in the resolution; `cycles`
    /// lists the dependency cycles found among them (each sorted).
    #[error("no valid resolution path for actions {nodes:?}: circular or unsatisfiable dependencies (cycles: {cycles:?})")]
    CircularDependency {
        nodes: Vec<String>,
        cycles: Vec<Vec<String>>,
    },

    #[error("action '{node}' depends on unknown action '{dependency}'")]
    UnknownDependency { node: String, dependency: String },

    #[error("duplicate action id: {0}")]
    DuplicateNode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PrefchainError>;
