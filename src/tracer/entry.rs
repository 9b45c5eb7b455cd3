//! A single recorded trace

use chrono::{DateTime, Utc};

use super::severity::Severity;

/// An immutable trace entry
///
/// Only a [`Tracer`](super::Tracer) creates entries, so the severity is always
/// one of the five real levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    message: String,
    severity: Severity,
    timestamp: DateTime<Utc>,
}

impl Entry {
    pub(crate) fn new(message: String, severity: Severity, timestamp: DateTime<Utc>) -> Self {
        Self {
            message,
            severity,
            timestamp,
        }
    }

    /// The formatted message text
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// When the entry was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Render as one line: `TRACE: <timestamp>\t<label>\t\t<message>`
    pub fn to_line(&self) -> String {
        format!(
            "TRACE: {}\t{}\t\t{}",
            self.timestamp,
            self.severity.label(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_line_format() {
        let timestamp = Utc.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap();
        let entry = Entry::new("disk low".to_string(), Severity::Warning, timestamp);

        assert_eq!(
            entry.to_line(),
            "TRACE: 2026-01-21 14:30:45 UTC\t   LevelWarning\t\tdisk low"
        );
    }
}
