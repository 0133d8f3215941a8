// src/resolve/report.rs

//! Failure reporting for unsatisfiable node sets.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::PrefchainError;
use crate::resolve::node::Node;

/// Build the `CircularDependency` error for a node set with no valid order.
///
/// The payload carries every id plus the dependency cycles among them, found
/// as strongly connected components of the `depends` graph.
pub fn circular_dependency(nodes: &[Node]) -> PrefchainError {
    cycle_error(nodes, find_cycles(nodes))
}

/// Fail fast on a node set whose `depends` graph is cyclic.
///
/// Such a set has no valid order whatever the chains look like, so there is
/// no point in searching for one.
pub fn ensure_acyclic(nodes: &[Node]) -> Result<(), PrefchainError> {
    let cycles = find_cycles(nodes);
    if cycles.is_empty() {
        return Ok(());
    }

    debug!(cycles = ?cycles, "dependency cycle found before path search");
    Err(cycle_error(nodes, cycles))
}

fn cycle_error(nodes: &[Node], cycles: Vec<Vec<String>>) -> PrefchainError {
    let mut ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    ids.sort();

    PrefchainError::CircularDependency { nodes: ids, cycles }
}

/// Dependency cycles in the node set, each sorted, in sorted order.
pub fn find_cycles(nodes: &[Node]) -> Vec<Vec<String>> {
    // Edge direction: dep -> node, so a topological order is an execution
    // order.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for node in nodes {
        graph.add_node(node.id.as_str());
    }
    for node in nodes {
        for dep in node.depends.iter() {
            graph.add_edge(dep.as_str(), node.id.as_str(), ());
        }
    }

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut ids: Vec<String> = scc.into_iter().map(str::to_string).collect();
            ids.sort();
            ids
        })
        .collect();
    cycles.sort();
    cycles
}

/// Check that `order` is a permutation of the node ids that runs every
/// dependency before its dependents.
pub fn verify_order(nodes: &[Node], order: &[String]) -> Result<(), PrefchainError> {
    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    if position.len() != order.len() || order.len() != nodes.len() {
        return Err(circular_dependency(nodes));
    }

    for node in nodes {
        let Some(&at) = position.get(node.id.as_str()) else {
            return Err(circular_dependency(nodes));
        };
        let violated = node
            .depends
            .iter()
            .any(|dep| position.get(dep.as_str()).is_none_or(|&dep_at| dep_at >= at));
        if violated {
            return Err(circular_dependency(nodes));
        }
    }

    Ok(())
}
