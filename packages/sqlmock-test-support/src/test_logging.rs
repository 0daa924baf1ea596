//! Test logging initialization
//!
//! Installs a `tracing` subscriber once per test binary so mock rejections
//! and fulfilled expectations show up in captured test output.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Default filter when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

fn filter_from_env() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging for tests.
///
/// Idempotent; safe to call from every test. The filter comes from
/// `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`]. Set
/// `TEST_LOG=sqlmock=debug` to see every expectation as it is declared and
/// fulfilled.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let installed = fmt()
            .with_env_filter(filter_from_env())
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!("test logging initialized");
        }
    });
}
