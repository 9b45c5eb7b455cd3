//! Leveled, in-memory trace accumulation
//!
//! A [`Tracer`] keeps timestamped text entries whose severity meets its
//! threshold. [`SharedTracer`] wraps one behind a mutex for use across threads.

mod accumulator;
mod clock;
mod entry;
mod severity;
mod shared;

pub use accumulator::{threshold_of, TraceError, Tracer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::Entry;
pub use severity::{severity_label, ParseSeverityError, Severity};
pub use shared::SharedTracer;
