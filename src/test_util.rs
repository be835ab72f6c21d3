use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global subscriber that writes to the test output.
///
/// The filter is read from `TEST_LOG` and defaults to `error`. Calling this
/// more than once is harmless.
pub fn trace_init() {
    let levels = std::env::var("TEST_LOG").unwrap_or_else(|_| "error".to_owned());

    let _ = fmt()
        .with_env_filter(EnvFilter::new(levels))
        .with_test_writer()
        .try_init();
}
