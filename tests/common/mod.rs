#![allow(unused_imports)]

pub use prefchain_test_utils::{assert_respects_depends, index_of, init_tracing};
