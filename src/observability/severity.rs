//! Log severities.

use std::fmt;
use std::str::FromStr;

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log message. Lower values are more verbose.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Severity {
    /// All severities, most verbose first.
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Display label used in payloads and human-readable output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Apply this severity's style to `text`.
    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Severity::Debug => text.on_green().bold(),
            Severity::Info => text.on_blue().bold(),
            Severity::Warn => text.on_yellow().bold(),
            Severity::Error => text.on_red().bold(),
        }
    }

    /// Decode a stored level. `0` and unknown values mean "unset".
    pub(crate) fn from_repr(value: u8) -> Option<Self> {
        match value {
            1 => Some(Severity::Debug),
            2 => Some(Severity::Info),
            3 => Some(Severity::Warn),
            4 => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity `{0}` (expected debug, info, warn or error)")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

impl TryFrom<String> for Severity {
    type Error = ParseSeverityError;

    fn try_from(value: String) -> Result<Self, <Severity as TryFrom<String>>::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control;

    #[derive(Debug, Deserialize)]
    struct Level {
        level: Severity,
    }

    #[test]
    fn test_ordering_matches_numeric_values() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert_eq!(Severity::Error as u8, 4);
    }

    #[test]
    fn test_repr_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_repr(severity as u8), Some(severity));
        }
        assert_eq!(Severity::from_repr(0), None);
        assert_eq!(Severity::from_repr(9), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!(" Debug ".parse::<Severity>().unwrap(), Severity::Debug);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_deserialize_matches_from_str() {
        for (input, expected) in [
            ("warn", Severity::Warn),
            ("WARN", Severity::Warn),
            ("Error", Severity::Error),
        ] {
            let parsed: Level = toml::from_str(&format!("level = \"{}\"", input)).unwrap();
            assert_eq!(parsed.level, expected);
        }
        assert!(toml::from_str::<Level>("level = \"verbose\"").is_err());
    }

    #[test]
    fn test_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"warn\"");
    }

    #[test]
    fn test_paint_uses_distinct_backgrounds() {
        control::set_override(true);
        let expected = [
            (Severity::Debug, "\x1b[1;42m[DEBUG]\x1b[0m"),
            (Severity::Info, "\x1b[1;44m[INFO]\x1b[0m"),
            (Severity::Warn, "\x1b[1;43m[WARN]\x1b[0m"),
            (Severity::Error, "\x1b[1;41m[ERROR]\x1b[0m"),
        ];
        for (severity, styled) in expected {
            let label = format!("[{}]", severity.label());
            assert_eq!(severity.paint(&label).to_string(), styled);
        }
    }
}
