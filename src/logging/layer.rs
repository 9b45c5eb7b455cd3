//! Bridge from `tracing` events into a [`SharedTracer`]
//!
//! Each event becomes one entry with text `"<target>: <message> key=value ..."`.
//! Events whose target belongs to this crate are skipped so that recording an
//! entry can never emit an event that re-enters the same tracer.

use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::tracer::{Severity, SharedTracer};

/// Target prefix of this crate's own events
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// `tracing_subscriber` layer that records events into a tracer
#[derive(Debug, Clone)]
pub struct TracerLayer {
    tracer: SharedTracer,
}

impl TracerLayer {
    pub fn new(tracer: SharedTracer) -> Self {
        Self { tracer }
    }

    /// The tracer this layer records into
    pub fn tracer(&self) -> &SharedTracer {
        &self.tracer
    }
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

impl<S: Subscriber> Layer<S> for TracerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let severity = Severity::from(*metadata.level());
        // tracing levels never map to a sentinel, so this cannot be rejected
        let _ = self.tracer.try_trace(
            severity,
            format_args!("{}: {}", metadata.target(), visitor.finish()),
        );
    }
}

/// Collects the `message` field and any extra fields of an event
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        let _ = write!(self.fields, " {}={}", name, value);
    }

    fn finish(self) -> String {
        let mut text = self.message;
        text.push_str(&self.fields);
        text
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(threshold: Severity, emit: impl FnOnce()) -> SharedTracer {
        let tracer = SharedTracer::new(threshold);
        let subscriber =
            tracing_subscriber::registry().with(TracerLayer::new(tracer.clone()));
        tracing::subscriber::with_default(subscriber, emit);
        tracer
    }

    #[test]
    fn test_layer_records_events() {
        let tracer = capture(Severity::Debug, || {
            tracing::info!(target: "app", "server started");
            tracing::warn!(target: "app::disk", free_mb = 12, "disk low");
        });

        let entries = tracer.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity(), Severity::Info);
        assert_eq!(entries[0].message(), "app: server started");
        assert_eq!(entries[1].severity(), Severity::Warning);
        assert_eq!(entries[1].message(), "app::disk: disk low free_mb=12");
    }

    #[test]
    fn test_layer_respects_threshold() {
        let tracer = capture(Severity::Error, || {
            tracing::trace!(target: "app", "noise");
            tracing::debug!(target: "app", "noise");
            tracing::info!(target: "app", "noise");
            tracing::warn!(target: "app", "noise");
            tracing::error!(target: "app", "boom");
        });

        assert_eq!(tracer.len(), 1);
        assert_eq!(tracer.filter(Severity::Error)[0].message(), "app: boom");
    }

    #[test]
    fn test_layer_maps_trace_to_debug() {
        let tracer = capture(Severity::Debug, || {
            tracing::trace!(target: "app", "fine grained");
        });

        assert_eq!(tracer.filter(Severity::Debug).len(), 1);
    }

    #[test]
    fn test_layer_skips_own_events() {
        let tracer = capture(Severity::Debug, || {
            tracing::info!("from inside the crate");
            tracing::info!(target: "tracer::config", "also inside");
            tracing::info!(target: "tracery", "a different crate");
        });

        assert_eq!(tracer.len(), 1);
        assert_eq!(tracer.snapshot()[0].message(), "tracery: a different crate");
    }

    #[test]
    fn test_argument_that_emits_an_event_is_recorded_too() {
        struct Noisy;

        impl fmt::Display for Noisy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                tracing::warn!(target: "app::noisy", "formatting value");
                f.write_str("noisy")
            }
        }

        let tracer = SharedTracer::new(Severity::Debug);
        let subscriber =
            tracing_subscriber::registry().with(TracerLayer::new(tracer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            crate::record!(tracer, Severity::Info, "value {}", Noisy);
        });

        let entries = tracer.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity(), Severity::Warning);
        assert_eq!(entries[0].message(), "app::noisy: formatting value");
        assert_eq!(entries[1].message(), "value noisy");
    }

    #[test]
    fn test_own_target_matching() {
        assert!(is_own_target("tracer"));
        assert!(is_own_target("tracer::logging::layer"));
        assert!(!is_own_target("tracery"));
        assert!(!is_own_target("app"));
    }
}
