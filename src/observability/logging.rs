//! Structured logging.
//!
//! Uses the tracing crate; the level comes from `RUST_LOG` when set, falling
//! back to the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the tracing subscriber.
///
/// Safe to call more than once; later calls are ignored so tests and embedding
/// hosts can both set up logging.
pub fn init_logging(config: &ObservabilityConfig) {
    let fallback = format!("balanced_client={}", config.log_level);
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&fallback)),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
