mod common;
use crate::common::{assert_respects_depends, index_of};

use std::collections::BTreeSet;

use proptest::prelude::*;
use prefchain::errors::PrefchainError;
use prefchain::{resolve, Node};

// Strategy to generate an acyclic set of nodes.
// Acyclicity comes from only letting node N depend on nodes 0..N-1.
fn dag_strategy(max_nodes: usize) -> impl Strategy<Value = Vec<Node>> {
    (1..=max_nodes).prop_flat_map(|num_nodes| {
        let deps_strat = proptest::collection::vec(
            (
                proptest::collection::vec(any::<usize>(), 0..num_nodes),
                any::<Option<usize>>(),
            ),
            num_nodes,
        );

        deps_strat.prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (potential_deps, after_pick))| {
                    let deps: BTreeSet<usize> = if i > 0 {
                        potential_deps.into_iter().map(|d| d % i).collect()
                    } else {
                        BTreeSet::new()
                    };
                    let depends: Vec<String> = deps.iter().map(|d| format!("n{d}")).collect();
                    let after = match after_pick {
                        Some(pick) if !depends.is_empty() => {
                            Some(depends[pick % depends.len()].clone())
                        }
                        _ => None,
                    };
                    Node {
                        id: format!("n{i}"),
                        depends,
                        after,
                    }
                })
                .collect()
        })
    })
}

/// A DAG plus one back edge from an early node to a later one.
fn cyclic_strategy(max_nodes: usize) -> impl Strategy<Value = Vec<Node>> {
    (dag_strategy(max_nodes), any::<usize>()).prop_filter_map(
        "needs a dependency to close a cycle",
        |(mut nodes, pick)| {
            let candidates: Vec<usize> = (0..nodes.len())
                .filter(|&i| !nodes[i].depends.is_empty())
                .collect();
            if candidates.is_empty() {
                return None;
            }
            let later = candidates[pick % candidates.len()];
            let earlier = nodes[later].depends[0].clone();
            let later_id = nodes[later].id.clone();
            let target = nodes.iter_mut().find(|n| n.id == earlier)?;
            target.depends.push(later_id);
            Some(nodes)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn acyclic_inputs_always_resolve(nodes in dag_strategy(7)) {
        let order = resolve(&nodes).expect("acyclic input resolves");

        prop_assert_eq!(order.len(), nodes.len());
        let unique: BTreeSet<&String> = order.iter().collect();
        prop_assert_eq!(unique.len(), nodes.len());
        assert_respects_depends(&nodes, &order);
    }

    #[test]
    fn resolution_ignores_input_and_dependency_order(nodes in dag_strategy(7)) {
        let expected = resolve(&nodes).expect("acyclic input resolves");

        let mut shuffled = nodes.clone();
        shuffled.reverse();
        for node in shuffled.iter_mut() {
            node.depends.reverse();
        }
        prop_assert_eq!(resolve(&shuffled).expect("acyclic input resolves"), expected);
    }

    #[test]
    fn single_dependencies_with_one_follower_run_immediately(nodes in dag_strategy(7)) {
        let order = resolve(&nodes).expect("acyclic input resolves");

        // A node whose only dependency has no other dependants can always
        // sit right after it.
        for node in nodes.iter().filter(|n| n.depends.len() == 1) {
            let dep = &node.depends[0];
            let dependants = nodes.iter().filter(|n| n.depends.contains(dep)).count();
            if dependants == 1 {
                prop_assert_eq!(index_of(&order, &node.id), index_of(&order, dep) + 1);
            }
        }
    }

    #[test]
    fn closing_a_cycle_is_reported(nodes in cyclic_strategy(14)) {
        match resolve(&nodes) {
            Err(PrefchainError::CircularDependency { nodes: reported, cycles }) => {
                prop_assert_eq!(reported.len(), nodes.len());
                prop_assert!(!cycles.is_empty());
            }
            other => prop_assert!(false, "expected CircularDependency, got {:?}", other),
        }
    }
}
