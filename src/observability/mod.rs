// Observability infrastructure using tracing crate
// Installs the process-wide structured logging subscriber for services embedding this library

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global logging subscriber.
///
/// The filter comes from `RUST_LOG` (defaulting to `info`), and
/// `LOG_FORMAT=json` switches the human-readable output to JSON lines for
/// machine parsing. Call once from the binary's entry point; a second call
/// fails because the subscriber is process-global.
pub fn init() -> Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid RUST_LOG filter")?;

    let registry = tracing_subscriber::registry().with(filter_layer);

    if crate::env::string("LOG_FORMAT", "text") == "json" {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
            .context("failed to install tracing subscriber")?;
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .try_init()
            .context("failed to install tracing subscriber")?;
    }

    Ok(())
}
