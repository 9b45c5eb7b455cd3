//! Thread-safe handle to a tracer
//!
//! Every operation holds one mutex for its whole duration. Messages are
//! formatted before the lock is taken. A poisoned lock is
//! recovered because an append is a single `Vec::push` and never leaves the
//! tracer half-updated.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::accumulator::{render_message, TraceError, Tracer};
use super::clock::Clock;
use super::entry::Entry;
use super::severity::Severity;

/// Cloneable, lock-guarded [`Tracer`]
#[derive(Clone)]
pub struct SharedTracer {
    inner: Arc<Mutex<Tracer>>,
}

impl SharedTracer {
    pub fn new(threshold: Severity) -> Self {
        Self::from_tracer(Tracer::new(threshold))
    }

    pub fn with_clock(threshold: Severity, clock: Box<dyn Clock>) -> Self {
        Self::from_tracer(Tracer::with_clock(threshold, clock))
    }

    pub fn from_tracer(tracer: Tracer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracer)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tracer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn threshold(&self) -> Severity {
        self.lock().threshold()
    }

    /// Record a message; see [`Tracer::trace`]
    ///
    /// # Panics
    /// Panics if `severity` is a sentinel. The panic is raised after the lock
    /// is released, so other handles keep working.
    pub fn trace(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if let Err(err) = self.try_trace(severity, args) {
            panic!("{}", err);
        }
    }

    /// Record a message at a raw level; see [`Tracer::trace_level`]
    pub fn trace_level(&self, raw: i32, args: fmt::Arguments<'_>) {
        if let Err(err) = self.try_trace_level(raw, args) {
            panic!("{}", err);
        }
    }

    pub fn try_trace(
        &self,
        severity: Severity,
        args: fmt::Arguments<'_>,
    ) -> Result<bool, TraceError> {
        self.try_trace_level(severity.as_raw(), args)
    }

    pub fn try_trace_level(
        &self,
        raw: i32,
        args: fmt::Arguments<'_>,
    ) -> Result<bool, TraceError> {
        let message = render_message(args);
        self.lock().try_trace_message(raw, message)
    }

    pub fn snapshot(&self) -> Vec<Entry> {
        self.lock().snapshot()
    }

    pub fn snapshot_text(&self) -> Vec<String> {
        self.lock().snapshot_text()
    }

    pub fn render(&self) -> String {
        self.lock().render()
    }

    pub fn filter(&self, severity: Severity) -> Vec<Entry> {
        self.lock().filter(severity)
    }

    pub fn filter_level(&self, raw: i32) -> Vec<Entry> {
        self.lock().filter_level(raw)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SharedTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedTracer").field(&*self.lock()).finish()
    }
}

impl fmt::Display for SharedTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
