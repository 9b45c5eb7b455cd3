//! Logging integration
//!
//! Installs the process-wide `tracing` subscriber and provides a layer that
//! feeds `tracing` events into a [`SharedTracer`](crate::tracer::SharedTracer).

mod layer;
mod subscriber;

pub use layer::TracerLayer;
pub use subscriber::{env_filter, init_logging, DEFAULT_DIRECTIVE};
