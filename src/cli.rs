// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::ScorePolicy;

/// Command-line arguments for `prefchain`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "prefchain",
    version,
    about = "Compute a deterministic execution order for interdependent actions.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Prefchain.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Prefchain.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PREFCHAIN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Override `[resolver].max_paths`.
    #[arg(long, value_name = "N")]
    pub max_paths: Option<usize>,

    /// Override `[resolver].score`.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub score: Option<ScoreArg>,

    /// Also print the chain partition of the chosen order.
    #[arg(long)]
    pub chains: bool,

    /// Print the preference tree rooted at this action instead of resolving.
    #[arg(long, value_name = "ID")]
    pub tree: Option<String>,

    /// Parse + validate, print actions, but don't resolve.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Score policy as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum ScoreArg {
    Balanced,
    Lexical,
}

impl From<ScoreArg> for ScorePolicy {
    fn from(arg: ScoreArg) -> Self {
        match arg {
            ScoreArg::Balanced => ScorePolicy::Balanced,
            ScoreArg::Lexical => ScorePolicy::Lexical,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
