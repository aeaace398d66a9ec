//! # Severity levels.
//!
//! [`Severity`] is a closed, totally ordered set of five levels:
//!
//! ```text
//! Verbose < Debug < Info < Warning < Error
//! ```
//!
//! Sinks use the ordering for threshold filtering (`severity >= min`) and map
//! each level onto whatever their backend understands (tracing levels,
//! console symbols, ...).
//!
//! ## Parsing
//! `FromStr` is case-insensitive and accepts both full names and the
//! single-letter shorthands used by the facade (`v`, `d`, `i`, `w`, `e`):
//! ```rust
//! use cedar_logging::Severity;
//!
//! assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
//! assert_eq!("E".parse::<Severity>().unwrap(), Severity::Error);
//! assert!(Severity::Info >= Severity::Debug);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParseSeverityError;

/// Ordered log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    /// Noisy tracing output.
    #[default]
    Verbose = 0,
    /// Developer diagnostics.
    Debug = 1,
    /// Normal operational messages.
    Info = 2,
    /// Something unexpected, but recoverable.
    Warning = 3,
    /// A failure the caller should know about.
    Error = 4,
}

impl Severity {
    /// All levels, least severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Verbose,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Returns a short stable label (lowercase) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Severity::Verbose => "verbose",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Pictogram used by console-style sinks.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Verbose => "🔍",
            Severity::Debug => "🐞",
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        }
    }

    /// True if `self` passes a `min` threshold.
    #[inline]
    pub fn is_at_least(self, min: Severity) -> bool {
        self >= min
    }

    pub(crate) fn from_repr(raw: u8) -> Option<Severity> {
        Severity::ALL.get(raw as usize).copied()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v" | "verbose" | "trace" => Ok(Severity::Verbose),
            "d" | "debug" => Ok(Severity::Debug),
            "i" | "info" => Ok(Severity::Info),
            "w" | "warn" | "warning" => Ok(Severity::Warning),
            "e" | "err" | "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
        }
        assert!(Severity::Error.is_at_least(Severity::Info));
        assert!(!Severity::Debug.is_at_least(Severity::Info));
        assert!(Severity::Info.is_at_least(Severity::Info));
    }

    #[test]
    fn test_repr_matches_ordinal() {
        for (idx, sev) in Severity::ALL.iter().enumerate() {
            assert_eq!(*sev as u8 as usize, idx);
            assert_eq!(Severity::from_repr(idx as u8), Some(*sev));
        }
        assert_eq!(Severity::from_repr(5), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Verbose".parse::<Severity>().unwrap(), Severity::Verbose);
        assert_eq!(" d ".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("err".parse::<Severity>().unwrap(), Severity::Error);

        let err = "loud".parse::<Severity>().unwrap_err();
        assert_eq!(err.input, "loud");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::default(), Severity::Verbose);
    }
}
