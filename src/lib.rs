// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod resolve;
pub mod types;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::resolve::{normalize_all, PreferenceTree, Resolver};

pub use crate::resolve::{resolve, Node, Resolution};

/// High-level entry point used by `main.rs`; writes to stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, &mut out)
}

/// Same as [`run`], writing results to `out`.
///
/// This wires together:
/// - config loading and validation
/// - CLI overrides of the resolver options
/// - resolution, tree or dry-run output
pub fn run_with_output(args: CliArgs, out: &mut impl Write) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("loading config from {:?}", config_path))?;

    if args.dry_run {
        print_dry_run(&cfg, out)?;
        return Ok(());
    }

    if let Some(ref root) = args.tree {
        if !cfg.action.contains_key(root) {
            anyhow::bail!("unknown action '{root}' for --tree");
        }
        let nodes = normalize_all(&cfg.nodes())?;
        let tree = PreferenceTree::build(&nodes, root);
        write!(out, "{}", tree.render())?;
        return Ok(());
    }

    let mut options = cfg.resolver_options();
    if let Some(max_paths) = args.max_paths {
        options.max_paths = Some(max_paths.max(1));
    }
    if let Some(score) = args.score {
        options.score = score.into();
    }

    let resolution = Resolver::new(options).resolve_detailed(&cfg.nodes())?;
    info!(
        actions = resolution.order.len(),
        chains = resolution.chains.len(),
        paths = resolution.paths_considered,
        truncated = resolution.truncated,
        "resolved execution order"
    );

    print_resolution(&resolution, args.chains, out)?;
    Ok(())
}

/// Resolved order, one id per line, optionally preceded by the chains.
fn print_resolution(resolution: &Resolution, chains: bool, out: &mut impl Write) -> Result<()> {
    if chains {
        writeln!(out, "chains ({}):", resolution.chains.len())?;
        for chain in &resolution.chains {
            writeln!(out, "  [{}]", chain.join(" -> "))?;
        }
        writeln!(out)?;
    }

    for id in &resolution.order {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

/// Simple dry-run output: print actions, deps and preferences.
fn print_dry_run(cfg: &ConfigFile, out: &mut impl Write) -> Result<()> {
    writeln!(out, "prefchain dry-run")?;
    writeln!(out, "  resolver.max_paths = {}", cfg.resolver.max_paths)?;
    writeln!(out, "  resolver.score = {:?}", cfg.resolver.score)?;
    writeln!(out)?;

    writeln!(out, "actions ({}):", cfg.action.len())?;
    for (name, action) in cfg.action.iter() {
        writeln!(out, "  - {name}")?;
        if let Some(ref description) = action.description {
            writeln!(out, "      description: {description}")?;
        }
        if !action.depends.is_empty() {
            writeln!(out, "      depends: {:?}", action.depends)?;
        }
        if let Some(ref after) = action.after {
            writeln!(out, "      after: {after}")?;
        }
    }

    debug!("dry-run complete (no resolution)");
    Ok(())
}
