//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_backend;

use std::sync::Once;

use docstore_client::{Config, Session};

static INIT_TRACING: Once = Once::new();

/// Initialize tracing output for tests, honoring `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Config pointed at a mock backend, with short timeouts.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 1;
    config.api.connect_timeout_seconds = 1;
    config
}

/// Session wired to a mock backend.
pub fn session_for(base_url: &str) -> Session {
    init_tracing();
    Session::new(test_config(base_url)).expect("failed to build session")
}

/// Minimal document payload as the API returns it.
pub fn document_json(id: &str, title: &str) -> String {
    format!(r#"{{"id": "{}", "title": "{}", "state": "active"}}"#, id, title)
}

/// Minimal collection payload as the API returns it.
pub fn collection_json(id: &str, label: &str) -> String {
    format!(r#"{{"id": "{}", "label": "{}"}}"#, id, label)
}
