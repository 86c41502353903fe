use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber on stderr. `RUST_LOG` overrides the
/// default `payables=info` level. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("payables=info"));

        // Another subscriber may already be installed, e.g. by a test harness.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
