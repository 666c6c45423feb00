use crate::{Error, ErrorKind};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::{BitOr, BitOrAssign};
use std::os::raw::c_int;
use std::result::Result as StdResult;
use std::str::FromStr;

/// Option flags controlling how the syslog channel is opened, an
/// OR-combination of the POSIX `LOG_*` option constants.
///
/// Configuration accepts a `logopt` value as a raw integer, a single flag
/// name (`"pid"`, with or without the `LOG_` prefix), a `"pid|cons"` string,
/// or a list of flag names.
///
/// # Examples
///
/// ```
/// use syslog_appender::syslog::LogOption;
///
/// let options = LogOption::PID | LogOption::CONS;
/// assert!(options.contains(LogOption::PID));
/// assert!(!options.contains(LogOption::NDELAY));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct LogOption(c_int);

impl LogOption {
    /// Include the process ID in log messages.
    pub const PID: LogOption = LogOption(0x01);

    /// Write directly to the system console if there is an error while
    /// sending to the syslog daemon.
    pub const CONS: LogOption = LogOption(0x02);

    /// Wait until the first log message is sent before connecting to the
    /// syslog server. The converse of [`NDELAY`](LogOption::NDELAY).
    pub const ODELAY: LogOption = LogOption(0x04);

    /// Immediately open a connection to the syslog server, instead of
    /// waiting until the first log message is sent.
    pub const NDELAY: LogOption = LogOption(0x08);

    /// If a child process is created to send a log message, don't wait for
    /// that child process to exit.
    pub const NOWAIT: LogOption = LogOption(0x10);

    /// Also emit log messages on `stderr`.
    pub const PERROR: LogOption = LogOption(0x20);

    /// No flags at all.
    pub const fn empty() -> LogOption {
        LogOption(0)
    }

    /// The raw OR-combined bits, as accepted by `openlog`.
    pub const fn bits(self) -> c_int {
        self.0
    }

    /// Wraps a raw bit combination.
    pub const fn from_bits(bits: c_int) -> LogOption {
        LogOption(bits)
    }

    /// Whether no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is also set in `self`.
    pub const fn contains(self, other: LogOption) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LogOption {
    type Output = LogOption;

    fn bitor(self, rhs: LogOption) -> LogOption {
        LogOption(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogOption {
    fn bitor_assign(&mut self, rhs: LogOption) {
        self.0 |= rhs.0;
    }
}

const NAMED_FLAGS: [(LogOption, &str); 6] = [
    (LogOption::PID, "pid"),
    (LogOption::CONS, "cons"),
    (LogOption::ODELAY, "odelay"),
    (LogOption::NDELAY, "ndelay"),
    (LogOption::NOWAIT, "nowait"),
    (LogOption::PERROR, "perror"),
];

impl Display for LogOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }

        let mut remainder = self.0;
        let mut first = true;
        for (flag, name) in &NAMED_FLAGS {
            if self.contains(*flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
                remainder &= !flag.0;
            }
        }
        if remainder != 0 {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{:#x}", remainder)?;
        }
        Ok(())
    }
}

impl FromStr for LogOption {
    type Err = Error;

    fn from_str(s: &str) -> StdResult<Self, Error> {
        let mut options = LogOption::empty();
        for part in s.split('|') {
            let lowered = part.trim().to_ascii_lowercase();
            let name = lowered.strip_prefix("log_").unwrap_or(&lowered);
            match NAMED_FLAGS.iter().find(|(_, n)| *n == name) {
                Some((flag, _)) => options |= *flag,
                None => track_panic!(ErrorKind::Config, "Undefined syslog option: {:?}", part),
            }
        }
        Ok(options)
    }
}

impl Serialize for LogOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_i64(i64::from(self.0))
    }
}

impl<'de> Deserialize<'de> for LogOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        struct LogOptionVisitor;

        impl<'de> Visitor<'de> for LogOptionVisitor {
            type Value = LogOption;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a syslog option bit mask, flag name, or list of flag names")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> StdResult<LogOption, E> {
                if value < 0 || value > i64::from(c_int::MAX) {
                    return Err(E::custom(format_args!(
                        "syslog option bits out of range: {}",
                        value
                    )));
                }
                Ok(LogOption::from_bits(value as c_int))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> StdResult<LogOption, E> {
                if value > c_int::MAX as u64 {
                    return Err(E::custom(format_args!(
                        "syslog option bits out of range: {}",
                        value
                    )));
                }
                Ok(LogOption::from_bits(value as c_int))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> StdResult<LogOption, E> {
                value.parse().map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> StdResult<LogOption, A::Error> {
                let mut options = LogOption::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    options |= name.parse().map_err(de::Error::custom)?;
                }
                Ok(options)
            }
        }

        deserializer.deserialize_any(LogOptionVisitor)
    }
}
