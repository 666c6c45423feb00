//! Commonly used types.
use crate::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use slog::Level;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The severity of a log event.
///
/// Severities form a total order (`Debug < Info < Warn < Error < Fatal`) and
/// are represented as consecutive ordinals starting at 0, stable across the
/// whole framework.
///
/// # Examples
///
/// The default value:
///
/// ```
/// use syslog_appender::types::Severity;
///
/// assert_eq!(Severity::default(), Severity::Info);
/// ```
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
    #[serde(alias = "critical")]
    Fatal,
}

/// Number of severities, i.e. one past the highest ordinal.
pub(crate) const SEVERITY_COUNT: usize = 5;

impl Severity {
    /// Gets the name of this `Severity`, in lowercase.
    pub fn name(&self) -> &'static str {
        match *self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// The ordinal of this `Severity` (`Debug` is 0, `Fatal` is 4).
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Converts an ordinal back to a `Severity`.
    pub fn from_ordinal(ordinal: usize) -> Option<Severity> {
        match ordinal {
            0 => Some(Severity::Debug),
            1 => Some(Severity::Info),
            2 => Some(Severity::Warn),
            3 => Some(Severity::Error),
            4 => Some(Severity::Fatal),
            _ => None,
        }
    }

    /// Converts `Severity` to `Level`.
    pub fn as_level(&self) -> Level {
        match *self {
            Severity::Debug => Level::Debug,
            Severity::Info => Level::Info,
            Severity::Warn => Level::Warning,
            Severity::Error => Level::Error,
            Severity::Fatal => Level::Critical,
        }
    }

    /// Converts `Level` to `Severity`.
    pub fn from_level(level: Level) -> Severity {
        match level {
            Level::Critical => Severity::Fatal,
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warn,
            Level::Debug | Level::Trace => Severity::Debug,

            // `slog::Level` isn't non-exhaustive, so adding any more levels
            // would be a breaking change. Still, handle the possibility here.
            _ => Severity::Info,
        }
    }
}
impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}
impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Severity {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match &*s.to_ascii_lowercase() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" | "critical" => Ok(Severity::Fatal),
            _ => track_panic!(ErrorKind::Config, "Undefined severity: {:?}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordinals_are_consecutive() {
        for (i, severity) in [
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ]
        .iter()
        .enumerate()
        {
            assert_eq!(severity.ordinal(), i);
            assert_eq!(Severity::from_ordinal(i), Some(*severity));
        }
        assert_eq!(Severity::from_ordinal(SEVERITY_COUNT), None);
    }

    #[test]
    fn severity_from_str_accepts_aliases() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn severity_level_round_trip() {
        assert_eq!(Severity::from_level(slog::Level::Critical), Severity::Fatal);
        assert_eq!(Severity::Fatal.as_level(), slog::Level::Critical);
        assert_eq!(Severity::from_level(slog::Level::Trace), Severity::Debug);
    }
}
