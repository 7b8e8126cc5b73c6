//! Diagnostic logging.
//!
//! Log events go to stderr through a `tracing-subscriber` fmt layer; the
//! command reports printed by [`crate::output`] go to stdout and are not
//! affected. `RUST_LOG` overrides the default filter.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Default filter for a verbosity level (`-v` count).
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "wedding_site=info",
        1 => "wedding_site=debug",
        _ => "wedding_site=trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
        // A subscriber installed by the host (tests, embedding) wins.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
