//! Mode signals returned to the host and keys forwarded by it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a hint-mode event, telling the host which mode to enter next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModeSignal {
    /// Nothing to do; stay in hint mode.
    #[default]
    #[serde(rename = "ignore")]
    Ignore,
    /// A text-entry element was focused.
    #[serde(rename = "mode::insert")]
    Insert,
    /// A hint was activated (or the mode was cancelled).
    #[serde(rename = "mode::normal")]
    Normal,
}

impl ModeSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Insert => "mode::insert",
            Self::Normal => "mode::normal",
        }
    }
}

impl fmt::Display for ModeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown mode signal: {0}")]
pub struct ParseModeSignalError(pub String);

impl FromStr for ModeSignal {
    type Err = ParseModeSignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "mode::insert" => Ok(Self::Insert),
            "mode::normal" => Ok(Self::Normal),
            other => Err(ParseModeSignalError(other.to_string())),
        }
    }
}

/// A key the host forwards while hint mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// A printable character (digits narrow the hints, anything else is ignored).
    Char(char),
    Backspace,
    Enter,
    Escape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_signal_default() {
        assert_eq!(ModeSignal::default(), ModeSignal::Ignore);
    }

    #[test]
    fn test_mode_signal_wire_names() {
        assert_eq!(ModeSignal::Ignore.to_string(), "ignore");
        assert_eq!(ModeSignal::Insert.to_string(), "mode::insert");
        assert_eq!(ModeSignal::Normal.to_string(), "mode::normal");
    }

    #[test]
    fn test_mode_signal_from_str() {
        assert_eq!("mode::insert".parse::<ModeSignal>(), Ok(ModeSignal::Insert));
        assert_eq!("ignore".parse::<ModeSignal>(), Ok(ModeSignal::Ignore));
        let err = "mode::visual".parse::<ModeSignal>().unwrap_err();
        assert!(err.to_string().contains("mode::visual"));
    }

    #[test]
    fn test_mode_signal_serialization() {
        let json = serde_json::to_string(&ModeSignal::Normal).unwrap();
        assert_eq!(json, "\"mode::normal\"");

        let parsed: ModeSignal = serde_json::from_str("\"mode::insert\"").unwrap();
        assert_eq!(parsed, ModeSignal::Insert);
    }
}
