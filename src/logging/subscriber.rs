//! Global `tracing` subscriber setup
//!
//! Diagnostics go to stderr through the `fmt` layer, filtered by `RUST_LOG`.
//! When a tracer is supplied, every event is also recorded into it.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::layer::TracerLayer;
use crate::tracer::SharedTracer;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "tracer=info,tracer_cat=info";

/// Build the env filter, falling back to [`DEFAULT_DIRECTIVE`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_logging(tracer: Option<SharedTracer>) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .with(tracer.map(TracerLayer::new))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
