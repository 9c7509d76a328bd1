//! Logging and tracing setup

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with default configuration.
///
/// Respects `RUST_LOG`; falls back to `info` for this crate and `warn`
/// for everything else.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,stock_research=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
