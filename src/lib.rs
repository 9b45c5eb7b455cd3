//! Tracer - in-memory, leveled trace accumulation
//!
//! Callers record timestamped text entries at one of five severities. A
//! threshold fixed at construction decides which entries are kept, and the
//! kept entries can be copied out, filtered by level, or rendered as text.

pub mod config;
pub mod logging;
pub mod tracer;

pub use tracer::{
    severity_label, threshold_of, Clock, Entry, ManualClock, ParseSeverityError, Severity,
    SharedTracer, SystemClock, TraceError, Tracer,
};
