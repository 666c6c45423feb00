use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::os::raw::c_int;
use std::result::Result as StdResult;
use std::str::FromStr;

/// A syslog facility. Conversions are provided to and from `c_int`.
///
/// Only the portable POSIX facilities are listed; their numeric codes are the
/// `LOG_*` values every known `syslog.h` agrees on (facility codes are the
/// facility number shifted left by three).
///
/// The default facility is [`User`](Facility::User). Configuration accepts a
/// facility either as its lowercase name or as its numeric code.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Facility {
    /// Operating system kernel. Programs other than the kernel are typically
    /// not allowed to use this facility.
    Kern = 0,
    /// General user processes.
    #[default]
    User = 1 << 3,
    /// Mail transport and delivery agents.
    Mail = 2 << 3,
    /// Daemons that don't fall into a more specific category.
    Daemon = 3 << 3,
    /// Authentication, authorization, and other security-related matters.
    Auth = 4 << 3,
    /// Messages generated internally by the syslog daemon.
    Syslog = 5 << 3,
    /// Print server.
    Lpr = 6 << 3,
    /// Usenet news system.
    News = 7 << 3,
    /// Unix-to-Unix Copy system.
    Uucp = 8 << 3,
    /// Periodic task scheduling daemons like `cron`.
    Cron = 9 << 3,
    /// Log messages containing sensitive information.
    AuthPriv = 10 << 3,
    /// FTP server.
    Ftp = 11 << 3,
    Local0 = 16 << 3,
    Local1 = 17 << 3,
    Local2 = 18 << 3,
    Local3 = 19 << 3,
    Local4 = 20 << 3,
    Local5 = 21 << 3,
    Local6 = 22 << 3,
    Local7 = 23 << 3,
}

const ALL_FACILITIES: [Facility; 20] = [
    Facility::Kern,
    Facility::User,
    Facility::Mail,
    Facility::Daemon,
    Facility::Auth,
    Facility::Syslog,
    Facility::Lpr,
    Facility::News,
    Facility::Uucp,
    Facility::Cron,
    Facility::AuthPriv,
    Facility::Ftp,
    Facility::Local0,
    Facility::Local1,
    Facility::Local2,
    Facility::Local3,
    Facility::Local4,
    Facility::Local5,
    Facility::Local6,
    Facility::Local7,
];

impl Facility {
    /// Gets the name of this `Facility`, in lowercase.
    ///
    /// The `FromStr` implementation accepts the same names, but it is
    /// case-insensitive.
    pub fn name(&self) -> &'static str {
        match *self {
            Facility::Kern => "kern",
            Facility::User => "user",
            Facility::Mail => "mail",
            Facility::Daemon => "daemon",
            Facility::Auth => "auth",
            Facility::Syslog => "syslog",
            Facility::Lpr => "lpr",
            Facility::News => "news",
            Facility::Uucp => "uucp",
            Facility::Cron => "cron",
            Facility::AuthPriv => "authpriv",
            Facility::Ftp => "ftp",
            Facility::Local0 => "local0",
            Facility::Local1 => "local1",
            Facility::Local2 => "local2",
            Facility::Local3 => "local3",
            Facility::Local4 => "local4",
            Facility::Local5 => "local5",
            Facility::Local6 => "local6",
            Facility::Local7 => "local7",
        }
    }

    /// Converts a `LOG_*` numeric constant to a `Facility` value.
    ///
    /// Returns `Some` if the value is a known facility code, or `None` if
    /// not.
    pub fn from_int(value: c_int) -> Option<Facility> {
        ALL_FACILITIES.iter().copied().find(|f| f.code() == value)
    }

    /// The numeric code of this facility, as accepted by `openlog`.
    pub fn code(self) -> c_int {
        self as c_int
    }
}

impl Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Facility> for c_int {
    fn from(facility: Facility) -> Self {
        facility.code()
    }
}

impl FromStr for Facility {
    type Err = UnknownFacilityError;

    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        let s = s.to_ascii_lowercase();

        match &*s {
            "kern" => Ok(Facility::Kern),
            "user" => Ok(Facility::User),
            "mail" => Ok(Facility::Mail),
            "daemon" => Ok(Facility::Daemon),
            "auth" => Ok(Facility::Auth),
            "syslog" => Ok(Facility::Syslog),
            "lpr" => Ok(Facility::Lpr),
            "news" => Ok(Facility::News),
            "uucp" => Ok(Facility::Uucp),
            "cron" => Ok(Facility::Cron),
            "authpriv" => Ok(Facility::AuthPriv),
            "ftp" => Ok(Facility::Ftp),
            "local0" => Ok(Facility::Local0),
            "local1" => Ok(Facility::Local1),
            "local2" => Ok(Facility::Local2),
            "local3" => Ok(Facility::Local3),
            "local4" => Ok(Facility::Local4),
            "local5" => Ok(Facility::Local5),
            "local6" => Ok(Facility::Local6),
            "local7" => Ok(Facility::Local7),
            _ => Err(UnknownFacilityError { name: s }),
        }
    }
}

impl Serialize for Facility {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Facility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NameOrCode {
            Name(String),
            Code(c_int),
        }

        match NameOrCode::deserialize(deserializer)? {
            NameOrCode::Name(name) => name.parse().map_err(de::Error::custom),
            NameOrCode::Code(code) => Facility::from_int(code).ok_or_else(|| {
                de::Error::custom(format_args!("unrecognized syslog facility code `{}`", code))
            }),
        }
    }
}

/// Indicates that `<Facility as FromStr>::from_str` was called with an
/// unknown facility name.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(Eq, PartialEq))]
#[non_exhaustive]
pub struct UnknownFacilityError {
    name: String,
}

impl UnknownFacilityError {
    /// The unrecognized facility name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for UnknownFacilityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unrecognized syslog facility name `{}`", self.name)
    }
}

impl StdError for UnknownFacilityError {}

#[test]
fn test_facility_from_str() {
    use std::str::FromStr;

    assert_eq!(Facility::from_str("daemon"), Ok(Facility::Daemon));
    assert_eq!(Facility::from_str("LOCAL5"), Ok(Facility::Local5));
    assert_eq!(
        Facility::from_str("foobar"),
        Err(UnknownFacilityError {
            name: "foobar".to_string()
        })
    );
    assert_eq!(
        Facility::from_str("foobar").unwrap_err().to_string(),
        "unrecognized syslog facility name `foobar`"
    );
}

#[test]
fn test_facility_codes_round_trip() {
    for facility in &ALL_FACILITIES {
        assert_eq!(Facility::from_int(facility.code()), Some(*facility));
    }
    assert_eq!(Facility::Daemon.code(), 3 << 3);
    assert_eq!(Facility::Local0.code(), 16 << 3);
    assert_eq!(Facility::from_int(7), None);
}

#[cfg(all(test, unix))]
#[test]
fn test_facility_codes_match_libc() {
    assert_eq!(Facility::Kern.code(), libc::LOG_KERN);
    assert_eq!(Facility::User.code(), libc::LOG_USER);
    assert_eq!(Facility::Daemon.code(), libc::LOG_DAEMON);
    assert_eq!(Facility::AuthPriv.code(), libc::LOG_AUTHPRIV);
    assert_eq!(Facility::Local0.code(), libc::LOG_LOCAL0);
    assert_eq!(Facility::Local7.code(), libc::LOG_LOCAL7);
}
