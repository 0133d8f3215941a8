pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=prefchain=trace cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Position of `id` in `order`; panics with the whole order if missing.
pub fn index_of(order: &[String], id: &str) -> usize {
    order
        .iter()
        .position(|x| x == id)
        .unwrap_or_else(|| panic!("{id} missing from {order:?}"))
}

/// Assert that every dependency of every node runs before the node.
pub fn assert_respects_depends(nodes: &[prefchain::Node], order: &[String]) {
    for node in nodes {
        let at = index_of(order, &node.id);
        for dep in &node.depends {
            assert!(
                index_of(order, dep) < at,
                "{dep} should come before {} in {order:?}",
                node.id
            );
        }
    }
}
