//! Tracing subscriber setup for the binary and for tests.

use dapcheck_config::LogLevel;
use tracing_subscriber::EnvFilter;

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level`. Does nothing if a subscriber
/// is already installed.
pub fn init(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install a subscriber whose output is captured by the test runner.
///
/// Safe to call from every test.
pub fn init_for_tests(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_test_writer()
        .try_init();
}
