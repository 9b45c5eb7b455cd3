//! Severity levels for trace entries
//!
//! Seven ordered levels. `Everything` and `Nothing` are sentinels used only as
//! thresholds; the five levels between them are the ones an entry can carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trace severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "SeverityRepr")]
#[repr(i32)]
pub enum Severity {
    /// Threshold that admits every real level. Never valid for an entry.
    Everything = 0,
    /// Verbose tracing
    Debug = 1,
    /// Normal activity
    Info = 2,
    /// Warnings
    Warning = 3,
    /// Errors
    Error = 4,
    /// Critical errors
    Critical = 5,
    /// Threshold that admits nothing. Never valid for an entry.
    Nothing = 6,
}

/// Error returned when a severity name or number cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSeverityError {
    #[error("unknown severity name: {0:?}")]
    UnknownName(String),
    #[error("severity {0} is outside 0..=6")]
    OutOfRange(i64),
}

impl Severity {
    /// All seven levels in ascending order
    pub const ALL: [Severity; 7] = [
        Severity::Everything,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Nothing,
    ];

    /// Numeric value of this level
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Look up a level by its numeric value
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Severity::Everything),
            1 => Some(Severity::Debug),
            2 => Some(Severity::Info),
            3 => Some(Severity::Warning),
            4 => Some(Severity::Error),
            5 => Some(Severity::Critical),
            6 => Some(Severity::Nothing),
            _ => None,
        }
    }

    /// Whether an entry may carry this level (i.e. it is not a sentinel)
    pub fn is_real(self) -> bool {
        self > Severity::Everything && self < Severity::Nothing
    }

    /// Fixed-width display label, right-aligned to the widest label
    pub fn label(self) -> &'static str {
        match self {
            Severity::Everything => "LevelEverything",
            Severity::Debug => "     LevelDebug",
            Severity::Info => "      LevelInfo",
            Severity::Warning => "   LevelWarning",
            Severity::Error => "     LevelError",
            Severity::Critical => "  LevelCritical",
            Severity::Nothing => "   LevelNothing",
        }
    }

    /// Short lowercase name, as used in config files
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Everything => "everything",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Nothing => "nothing",
        }
    }
}

/// Label for a raw severity value; unknown values map to an empty string
pub fn severity_label(raw: i32) -> &'static str {
    Severity::from_raw(raw).map(Severity::label).unwrap_or("")
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "everything" => Ok(Severity::Everything),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            "nothing" => Ok(Severity::Nothing),
            _ => Err(ParseSeverityError::UnknownName(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

/// Config files may spell a threshold either as a name or as its number
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Raw(i64),
    Name(String),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = ParseSeverityError;

    fn try_from(repr: SeverityRepr) -> Result<Self, ParseSeverityError> {
        match repr {
            SeverityRepr::Raw(raw) => i32::try_from(raw)
                .ok()
                .and_then(Severity::from_raw)
                .ok_or(ParseSeverityError::OutOfRange(raw)),
            SeverityRepr::Name(name) => name.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].as_raw() + 1, pair[1].as_raw());
        }
    }

    #[test]
    fn test_sentinels_are_not_real() {
        assert!(!Severity::Everything.is_real());
        assert!(!Severity::Nothing.is_real());
        assert!(Severity::Debug.is_real());
        assert!(Severity::Critical.is_real());
    }

    #[test]
    fn test_labels_share_one_width() {
        let width = Severity::Everything.label().len();
        for severity in Severity::ALL {
            assert_eq!(severity.label().len(), width, "{:?}", severity);
            assert!(severity.label().trim_start().starts_with("Level"));
        }
        assert_eq!(Severity::Debug.label(), "     LevelDebug");
    }

    #[test]
    fn test_raw_label_lookup() {
        assert_eq!(severity_label(5), "  LevelCritical");
        assert_eq!(severity_label(0), "LevelEverything");
        assert_eq!(severity_label(-1), "");
        assert_eq!(severity_label(7), "");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("WARN".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" Critical ".parse::<Severity>(), Ok(Severity::Critical));
        assert!(matches!(
            "loud".parse::<Severity>(),
            Err(ParseSeverityError::UnknownName(_))
        ));
    }

    #[test]
    fn test_repr_conversion() {
        assert_eq!(Severity::try_from(SeverityRepr::Raw(4)), Ok(Severity::Error));
        assert_eq!(
            Severity::try_from(SeverityRepr::Name("critical".to_string())),
            Ok(Severity::Critical)
        );
        assert_eq!(
            Severity::try_from(SeverityRepr::Raw(i64::MAX)),
            Err(ParseSeverityError::OutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_from_tracing_level() {
        assert_eq!(Severity::from(tracing::Level::TRACE), Severity::Debug);
        assert_eq!(Severity::from(tracing::Level::DEBUG), Severity::Debug);
        assert_eq!(Severity::from(tracing::Level::INFO), Severity::Info);
        assert_eq!(Severity::from(tracing::Level::WARN), Severity::Warning);
        assert_eq!(Severity::from(tracing::Level::ERROR), Severity::Error);
    }
}
