mod common;
use crate::common::{assert_respects_depends, index_of, init_tracing};

use prefchain::errors::PrefchainError;
use prefchain::resolve;
use prefchain_test_utils::builders::{node, node_after};

#[test]
fn empty_input_yields_empty_order() {
    init_tracing();

    let order = resolve(&[]).expect("empty input is valid");
    assert!(order.is_empty());
}

#[test]
fn single_node_without_dependencies() {
    init_tracing();

    let order = resolve(&[node("standalone", &[])]).unwrap();
    assert_eq!(order, vec!["standalone".to_string()]);
}

#[test]
fn linear_chain_with_explicit_preferences() {
    init_tracing();

    let nodes = vec![
        node("root", &[]),
        node_after("setup", &["root"], "root"),
        node_after("build", &["setup"], "setup"),
    ];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order, vec!["root", "setup", "build"]);
}

#[test]
fn linear_chain_with_inferred_preferences() {
    init_tracing();

    // Listed backwards on purpose.
    let nodes = vec![node("C", &["B"]), node("B", &["A"]), node("A", &[])];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn diamond_places_root_first_and_join_last() {
    init_tracing();

    let nodes = vec![
        node("A", &[]),
        node("B", &["A"]),
        node("C", &["A"]),
        node("D", &["B", "C"]),
    ];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order.first().map(String::as_str), Some("A"));
    assert_eq!(order.last().map(String::as_str), Some("D"));
    assert_respects_depends(&nodes, &order);
}

#[test]
fn multiple_external_dependencies_run_last() {
    init_tracing();

    let nodes = vec![node("A", &[]), node("B", &[]), node("C", &["A", "B"])];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order.last().map(String::as_str), Some("C"));
    assert_respects_depends(&nodes, &order);
}

#[test]
fn preference_with_extra_dependency() {
    init_tracing();

    let nodes = vec![
        node("root", &[]),
        node("test", &["root"]),
        node_after("coverage", &["test", "reporting"], "test"),
        node("reporting", &["root"]),
    ];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order[0], "root");
    assert_respects_depends(&nodes, &order);
    // `coverage` directly follows `test`.
    assert_eq!(index_of(&order, "coverage"), index_of(&order, "test") + 1);
}

#[test]
fn single_dependency_runs_immediately_before() {
    init_tracing();

    let nodes = vec![
        node("root", &[]),
        node("child", &["root"]),
        node("other", &[]),
    ];

    let order = resolve(&nodes).unwrap();
    assert_eq!(index_of(&order, "child"), index_of(&order, "root") + 1);
}

#[test]
fn complex_versioning_scenario() {
    init_tracing();

    let nodes = vec![
        node("root", &[]),
        node("versionning", &["root"]),
        node("github", &["versionning"]),
        node("github-actions", &["github"]),
        node("ci-pipeline", &["github-actions"]),
        node("pytest", &["ci-pipeline"]),
        node("coverage", &["pytest"]),
        node("test", &["root"]),
        node_after("github-action-test", &["test", "github"], "test"),
    ];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order[0], "root");
    assert_respects_depends(&nodes, &order);
    assert_eq!(
        index_of(&order, "github-action-test"),
        index_of(&order, "test") + 1
    );
}

#[test]
fn ci_pipeline_scenario() {
    init_tracing();

    let nodes = vec![
        node("checkout", &[]),
        node("install-deps", &["checkout"]),
        node("lint", &["install-deps"]),
        node("test", &["install-deps"]),
        node("build", &["lint", "test"]),
        node("docker-build", &["build"]),
        node("deploy-staging", &["docker-build"]),
        node("e2e-tests", &["deploy-staging"]),
        node("deploy-prod", &["e2e-tests"]),
    ];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order.len(), nodes.len());
    assert_respects_depends(&nodes, &order);
    assert_eq!(order.last().map(String::as_str), Some("deploy-prod"));
}

#[test]
fn multiple_roots_tie_break_is_lexical() {
    init_tracing();

    let nodes = vec![
        node("root2", &[]),
        node("child2", &["root2"]),
        node("root1", &[]),
        node("child1", &["root1"]),
    ];

    let order = resolve(&nodes).unwrap();
    assert_eq!(order, vec!["root1", "child1", "root2", "child2"]);
}

#[test]
fn resolution_is_independent_of_input_order() {
    init_tracing();

    let nodes = vec![
        node("core", &[]),
        node("git", &["core"]),
        node("poetry", &["core"]),
        node("license", &["git"]),
        node_after("documentation", &["poetry", "git"], "poetry"),
        node("jupyter", &["poetry"]),
        node_after("jupyter-tools", &["jupyter", "git"], "jupyter"),
    ];

    let expected = resolve(&nodes).unwrap();

    let mut reversed = nodes.clone();
    reversed.reverse();
    for n in reversed.iter_mut() {
        n.depends.reverse();
    }
    assert_eq!(resolve(&reversed).unwrap(), expected);

    let mut rotated = nodes.clone();
    rotated.rotate_left(3);
    assert_eq!(resolve(&rotated).unwrap(), expected);

    assert_respects_depends(&nodes, &expected);
}

#[test]
fn three_cycle_is_unsatisfiable() {
    init_tracing();

    let nodes = vec![node("A", &["B"]), node("B", &["C"]), node("C", &["A"])];

    match resolve(&nodes) {
        Err(PrefchainError::CircularDependency { nodes, cycles }) => {
            assert_eq!(nodes, vec!["A", "B", "C"]);
            assert_eq!(cycles, vec![vec!["A", "B", "C"]]);
        }
        other => panic!("expected CircularDependency, got {other:?}"),
    }
}

#[test]
fn mutual_preference_is_unsatisfiable() {
    init_tracing();

    let nodes = vec![node("A", &["B"]), node("B", &["A"]), node("C", &[])];

    match resolve(&nodes) {
        Err(PrefchainError::CircularDependency { nodes, cycles }) => {
            assert_eq!(nodes, vec!["A", "B", "C"]);
            assert_eq!(cycles, vec![vec!["A", "B"]]);
        }
        other => panic!("expected CircularDependency, got {other:?}"),
    }
}

#[test]
fn cycle_among_many_independent_actions_is_reported() {
    init_tracing();

    let mut nodes: Vec<_> = (0..20).map(|i| node(&format!("i{i:02}"), &[])).collect();
    nodes.push(node("x", &["y"]));
    nodes.push(node("y", &["x"]));

    match resolve(&nodes) {
        Err(PrefchainError::CircularDependency { nodes: ids, cycles }) => {
            assert_eq!(ids.len(), 22);
            assert_eq!(ids.first().map(String::as_str), Some("i00"));
            assert_eq!(cycles, vec![vec!["x", "y"]]);
        }
        other => panic!("expected CircularDependency, got {other:?}"),
    }
}

#[test]
fn self_dependency_is_unsatisfiable() {
    init_tracing();

    match resolve(&[node("loop", &["loop"])]) {
        Err(PrefchainError::CircularDependency { cycles, .. }) => {
            assert_eq!(cycles, vec![vec!["loop"]]);
        }
        other => panic!("expected CircularDependency, got {other:?}"),
    }
}

#[test]
fn preference_outside_depends_is_rejected() {
    init_tracing();

    let nodes = vec![
        node("A", &[]),
        node("B", &[]),
        node_after("C", &["A"], "B"),
    ];

    match resolve(&nodes) {
        Err(PrefchainError::InvalidPreference { node, after }) => {
            assert_eq!(node, "C");
            assert_eq!(after, "B");
        }
        other => panic!("expected InvalidPreference, got {other:?}"),
    }
}

#[test]
fn invalid_preference_is_reported_before_cycles() {
    init_tracing();

    let nodes = vec![node("A", &["B"]), node_after("B", &["A"], "Z")];

    assert!(matches!(
        resolve(&nodes),
        Err(PrefchainError::InvalidPreference { .. })
    ));
}

#[test]
fn unknown_dependency_is_rejected() {
    init_tracing();

    match resolve(&[node("A", &["ghost"])]) {
        Err(PrefchainError::UnknownDependency { node, dependency }) => {
            assert_eq!(node, "A");
            assert_eq!(dependency, "ghost");
        }
        other => panic!("expected UnknownDependency, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    init_tracing();

    let nodes = vec![node("A", &[]), node("A", &[])];

    assert!(matches!(
        resolve(&nodes),
        Err(PrefchainError::DuplicateNode(ref id)) if id == "A"
    ));
}
