//! Tracing subscriber setup

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the fmt subscriber, filtered by `DOCQA_LOG` (default `docqa=info`).
///
/// Logs go to stderr so `--json` output stays machine readable. Calling this
/// more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("DOCQA_LOG").unwrap_or_else(|_| EnvFilter::new("docqa=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
