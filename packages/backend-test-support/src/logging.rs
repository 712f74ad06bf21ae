//! Test log output, shared by unit and integration tests.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_TEST_FILTER: &str = "warn,sqlx=error";

/// The first of `TEST_LOG`, `RUST_LOG` and [`DEFAULT_TEST_FILTER`] that parses.
pub fn test_filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TEST_FILTER))
}

static SUBSCRIBER: Lazy<bool> = Lazy::new(|| {
    fmt()
        .with_env_filter(test_filter())
        .with_test_writer()
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok()
});

/// Install the test subscriber. Safe to call from every test binary's ctor.
/// Returns false if some other subscriber was already global.
pub fn init() -> bool {
    *SUBSCRIBER
}
