//! Shared helpers for `pollwait` integration tests.

pub mod builders;
pub mod scripted;
pub mod ticks;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

/// Upper bound for any single awaited step in a test.
pub const TEST_DEADLINE: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Route engine logs into the per-test capture buffer.
///
/// Directives come from `POLLWAIT_LOG` (the variable the binary reads),
/// falling back to `warn`, so `POLLWAIT_LOG=pollwait::wait=trace` shows each
/// tick and evaluation of a failing test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("POLLWAIT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, failing the test if it takes longer than [`TEST_DEADLINE`].
pub async fn with_timeout<F: Future>(f: F) -> F::Output {
    match tokio::time::timeout(TEST_DEADLINE, f).await {
        Ok(out) => out,
        Err(_) => panic!("test step did not finish within {TEST_DEADLINE:?}"),
    }
}
