//! Structured logging.
//!
//! Initializes the tracing subscriber once at startup. `RUST_LOG` wins
//! over the configured level so a deployment can be turned up without a
//! config change.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Call once, before anything logs.
pub fn init(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("algoforge={},tower_http=info", default_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
