//! Cross-module test suite
//!
//! - `fixtures`: shared rule sets and parameter builders
//! - `properties`: behavioural properties of the validation engine
//! - `integration`: documents, configuration and the validation service end to end

pub mod fixtures;
pub mod integration;
pub mod properties;

/// Test configuration and utilities
pub mod config {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize tracing for tests
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }
}
