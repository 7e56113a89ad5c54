// Severity levels for the call-site macro layer

use serde::{Deserialize, Serialize};

/// Log severity, ordered from most to least severe.
///
/// Severity lives entirely in the macro layer: it selects the line prefix and
/// gates against the logger's minimum level before any formatting happens.
/// The logger core treats formatted text as opaque and never parses severity
/// back out of it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Error conditions
    Error = 1,
    /// Warning conditions
    Warning = 2,
    /// Informational (default minimum level)
    Info = 3,
    /// Debug-level messages
    Debug = 4,
}

impl Severity {
    /// ANSI sequence closing a colored log line.
    pub const COLOR_RESET: &'static str = "\x1b[1;0m";

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Single-letter tag used in log line prefixes.
    pub const fn letter(self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warning => 'W',
            Severity::Info => 'I',
            Severity::Debug => 'D',
        }
    }

    /// ANSI color opening a line of this severity.
    pub const fn color(self) -> &'static str {
        match self {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Info => "\x1b[1;36m",
            Severity::Debug => "\x1b[1;32m",
        }
    }

    /// Get severity name as static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Create from u8 value (returns None if invalid)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Severity::Error),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Info),
            4 => Some(Severity::Debug),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert!(Severity::Info < Severity::Debug);
    }

    #[test]
    fn test_severity_values() {
        assert_eq!(Severity::Error.as_u8(), 1);
        assert_eq!(Severity::Debug.as_u8(), 4);
    }

    #[test]
    fn test_severity_from_u8() {
        assert_eq!(Severity::from_u8(1), Some(Severity::Error));
        assert_eq!(Severity::from_u8(4), Some(Severity::Debug));
        assert_eq!(Severity::from_u8(0), None);
        assert_eq!(Severity::from_u8(5), None);
    }

    #[test]
    fn test_severity_letters() {
        assert_eq!(Severity::Error.letter(), 'E');
        assert_eq!(Severity::Warning.letter(), 'W');
        assert_eq!(Severity::Info.letter(), 'I');
        assert_eq!(Severity::Debug.letter(), 'D');
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::Error), "ERROR");
        assert_eq!(format!("{}", Severity::Info), "INFO");
    }
}
