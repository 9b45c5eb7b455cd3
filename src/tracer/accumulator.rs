//! The trace accumulator
//!
//! Stores entries in call order, gated by a threshold fixed at construction.
//! Every read returns freshly allocated data so callers cannot reach the
//! internal sequence.

use std::fmt::{self, Write};

use thiserror::Error;

use super::clock::{Clock, SystemClock};
use super::entry::Entry;
use super::severity::Severity;

/// Initial capacity for the entry sequence
const CAPACITY_HINT: usize = 100;

/// Reason a severity was refused by [`Tracer::try_trace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("tracer: level {0} is invalid: cannot trace with LevelEverything or below")]
    BelowRange(i32),
    #[error("tracer: level {0} is invalid: cannot trace with LevelNothing or above")]
    AboveRange(i32),
}

/// Outcome of checking a raw level against the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    Record(Severity),
    Skip,
    Reject(TraceError),
}

impl Admission {
    fn decide(raw: i32, threshold: Severity) -> Self {
        if raw <= Severity::Everything.as_raw() {
            return Admission::Reject(TraceError::BelowRange(raw));
        }
        if raw >= Severity::Nothing.as_raw() {
            return Admission::Reject(TraceError::AboveRange(raw));
        }
        match Severity::from_raw(raw) {
            Some(severity) if severity >= threshold => Admission::Record(severity),
            Some(_) => Admission::Skip,
            // unreachable: every value strictly between the sentinels maps to a level
            None => Admission::Reject(TraceError::AboveRange(raw)),
        }
    }
}

/// In-memory, leveled trace accumulator
pub struct Tracer {
    threshold: Severity,
    entries: Vec<Entry>,
    clock: Box<dyn Clock>,
}

impl Tracer {
    /// Create a tracer that keeps entries at or above `threshold`
    ///
    /// `Severity::Everything` keeps every entry and `Severity::Nothing` keeps
    /// none; the threshold is not validated.
    pub fn new(threshold: Severity) -> Self {
        Self::with_clock(threshold, Box::new(SystemClock))
    }

    /// Create a tracer that timestamps entries with the given clock
    pub fn with_clock(threshold: Severity, clock: Box<dyn Clock>) -> Self {
        Self {
            threshold,
            entries: Vec::with_capacity(CAPACITY_HINT),
            clock,
        }
    }

    /// The configured threshold
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Record a message at `severity`
    ///
    /// Entries below the threshold are dropped silently.
    ///
    /// # Panics
    /// Panics if `severity` is `Everything` or `Nothing`. Tracing at a
    /// sentinel level is a caller bug.
    pub fn trace(&mut self, severity: Severity, args: fmt::Arguments<'_>) {
        self.trace_level(severity.as_raw(), args);
    }

    /// Record a message at a raw numeric level
    ///
    /// # Panics
    /// Panics unless `raw` is one of the five real levels (1..=5).
    pub fn trace_level(&mut self, raw: i32, args: fmt::Arguments<'_>) {
        if let Err(err) = self.try_trace_level(raw, args) {
            panic!("{}", err);
        }
    }

    /// Like [`trace`](Self::trace) but reports an invalid level instead of panicking
    ///
    /// Returns `Ok(true)` when an entry was recorded and `Ok(false)` when the
    /// severity was below the threshold.
    pub fn try_trace(
        &mut self,
        severity: Severity,
        args: fmt::Arguments<'_>,
    ) -> Result<bool, TraceError> {
        self.try_trace_level(severity.as_raw(), args)
    }

    /// Like [`trace_level`](Self::trace_level) but reports an invalid level
    pub fn try_trace_level(
        &mut self,
        raw: i32,
        args: fmt::Arguments<'_>,
    ) -> Result<bool, TraceError> {
        self.admit(raw, || render_message(args))
    }

    /// Record a message that was already formatted
    ///
    /// Callers holding a lock around the tracer format first, so that a
    /// `Display` impl that logs cannot re-enter the lock.
    pub(crate) fn try_trace_message(
        &mut self,
        raw: i32,
        message: String,
    ) -> Result<bool, TraceError> {
        self.admit(raw, || message)
    }

    fn admit(&mut self, raw: i32, message: impl FnOnce() -> String) -> Result<bool, TraceError> {
        match Admission::decide(raw, self.threshold) {
            Admission::Record(severity) => {
                let entry = Entry::new(message(), severity, self.clock.now());
                self.entries.push(entry);
                Ok(true)
            }
            Admission::Skip => Ok(false),
            Admission::Reject(err) => Err(err),
        }
    }

    /// Copy of every entry, in the order recorded
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Every entry rendered as a text line, in the order recorded
    pub fn snapshot_text(&self) -> Vec<String> {
        self.entries.iter().map(Entry::to_line).collect()
    }

    /// All text lines joined with newlines
    pub fn render(&self) -> String {
        self.snapshot_text().join("\n")
    }

    /// Copy of the entries whose severity is exactly `severity`
    pub fn filter(&self, severity: Severity) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.severity() == severity)
            .cloned()
            .collect()
    }

    /// Like [`filter`](Self::filter) for a raw level; unknown values match nothing
    pub fn filter_level(&self, raw: i32) -> Vec<Entry> {
        Severity::from_raw(raw)
            .map(|severity| self.filter(severity))
            .unwrap_or_default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("threshold", &self.threshold)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Threshold of a possibly absent tracer; a missing tracer accepts nothing
pub fn threshold_of(tracer: Option<&Tracer>) -> Severity {
    tracer.map_or(Severity::Nothing, Tracer::threshold)
}

/// Format the arguments, keeping whatever was written if a `Display` impl fails
pub(crate) fn render_message(args: fmt::Arguments<'_>) -> String {
    if let Some(literal) = args.as_str() {
        return literal.to_string();
    }
    let mut message = String::new();
    let _ = message.write_fmt(args);
    message
}

/// Record a printf-style message on a [`Tracer`] or [`SharedTracer`](crate::tracer::SharedTracer)
///
/// ```
/// use tracer::{record, Severity, Tracer};
///
/// let mut tracer = Tracer::new(Severity::Info);
/// record!(tracer, Severity::Warning, "{} retries left", 3);
/// assert_eq!(tracer.snapshot()[0].message(), "3 retries left");
/// ```
#[macro_export]
macro_rules! record {
    ($tracer:expr, $severity:expr, $($arg:tt)+) => {
        $tracer.trace($severity, ::std::format_args!($($arg)+))
    };
}
