use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::os::raw::c_int;
use std::result::Result as StdResult;
use std::str::FromStr;

/// A syslog priority code. Conversions are provided to and from `c_int`.
///
/// Not to be confused with [`Severity`](crate::types::Severity), the
/// framework's own level enumeration: a severity is what an event carries, a
/// priority is what the destination understands, and a
/// [`SeverityMap`](crate::syslog::SeverityMap) translates between the two.
///
/// Available priorities are platform-independent. They were originally
/// defined by BSD, are specified by POSIX, and carry the numeric codes 0
/// (`emerg`) through 7 (`debug`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Priority {
    /// The system has failed. This code is for kernel panics and similar
    /// system-wide failures.
    Emerg = 0,

    /// Something has happened that requires immediate action.
    Alert = 1,

    /// Critical error. Hardware failures fall under this code.
    Crit = 2,

    /// Error. Something has definitely gone wrong.
    Err = 3,

    /// Warning. Something has probably gone wrong.
    Warning = 4,

    /// The situation is not an error, but it probably needs attention.
    Notice = 5,

    /// Normal informational messages.
    Info = 6,

    /// Verbose debugging messages.
    Debug = 7,
}

impl Priority {
    /// Gets the name of this `Priority`, like `emerg` or `notice`.
    ///
    /// The `FromStr` implementation accepts the same names, but it is
    /// case-insensitive and also tolerates a `LOG_` prefix, so `"err"`,
    /// `"ERR"`, and `"LOG_ERR"` all resolve to [`Err`](Priority::Err).
    pub fn name(&self) -> &'static str {
        match *self {
            Priority::Emerg => "emerg",
            Priority::Alert => "alert",
            Priority::Crit => "crit",
            Priority::Err => "err",
            Priority::Warning => "warning",
            Priority::Notice => "notice",
            Priority::Info => "info",
            Priority::Debug => "debug",
        }
    }

    /// Converts a `LOG_*` numeric constant to a `Priority` value.
    ///
    /// Returns `Some` if the value is a valid priority code, or `None` if
    /// not.
    pub fn from_int(value: c_int) -> Option<Priority> {
        match value {
            0 => Some(Priority::Emerg),
            1 => Some(Priority::Alert),
            2 => Some(Priority::Crit),
            3 => Some(Priority::Err),
            4 => Some(Priority::Warning),
            5 => Some(Priority::Notice),
            6 => Some(Priority::Info),
            7 => Some(Priority::Debug),
            _ => None,
        }
    }

    /// The numeric code of this priority, as accepted by `syslog`.
    pub fn code(self) -> c_int {
        self as c_int
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Priority> for c_int {
    fn from(priority: Priority) -> Self {
        priority.code()
    }
}

impl FromStr for Priority {
    type Err = UnknownPriorityError;

    fn from_str(s: &str) -> StdResult<Self, <Self as FromStr>::Err> {
        let lowered = s.to_ascii_lowercase();
        let name = lowered.strip_prefix("log_").unwrap_or(&lowered);

        match name {
            "emerg" | "panic" => Ok(Priority::Emerg),
            "alert" => Ok(Priority::Alert),
            "crit" => Ok(Priority::Crit),
            "err" | "error" => Ok(Priority::Err),
            "warning" | "warn" => Ok(Priority::Warning),
            "notice" => Ok(Priority::Notice),
            "info" => Ok(Priority::Info),
            "debug" => Ok(Priority::Debug),
            _ => Err(UnknownPriorityError { name: lowered }),
        }
    }
}

/// Indicates that `<Priority as FromStr>::from_str` was called with an
/// unknown priority name.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(Eq, PartialEq))]
#[non_exhaustive]
pub struct UnknownPriorityError {
    name: String,
}

impl UnknownPriorityError {
    /// The unrecognized priority name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for UnknownPriorityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unrecognized syslog priority name `{}`", self.name)
    }
}

impl StdError for UnknownPriorityError {}

#[test]
fn test_priority_from_str() {
    use std::str::FromStr;

    assert_eq!(Priority::from_str("notice"), Ok(Priority::Notice));
    assert_eq!(Priority::from_str("ERR"), Ok(Priority::Err));
    assert_eq!(Priority::from_str("LOG_ERR"), Ok(Priority::Err));
    assert_eq!(Priority::from_str("panic"), Ok(Priority::Emerg));
    assert_eq!(
        Priority::from_str("foobar"),
        Err(UnknownPriorityError {
            name: "foobar".to_string()
        })
    );
    assert_eq!(
        Priority::from_str("foobar").unwrap_err().to_string(),
        "unrecognized syslog priority name `foobar`"
    );
}

#[test]
fn test_priority_codes_round_trip() {
    for code in 0..=7 {
        let priority = Priority::from_int(code).unwrap();
        assert_eq!(priority.code(), code);
    }
    assert_eq!(Priority::from_int(8), None);
    assert_eq!(Priority::Debug.code(), 7);
}

#[cfg(all(test, unix))]
#[test]
fn test_priority_codes_match_libc() {
    assert_eq!(Priority::Emerg.code(), libc::LOG_EMERG);
    assert_eq!(Priority::Err.code(), libc::LOG_ERR);
    assert_eq!(Priority::Warning.code(), libc::LOG_WARNING);
    assert_eq!(Priority::Debug.code(), libc::LOG_DEBUG);
}
