use crate::syslog::{UnknownFacilityError, UnknownPriorityError};
use trackable::error::{ErrorKind as TrackableErrorKind, ErrorKindExt, Failure, TrackableError};

/// The error type for this crate.
#[derive(Debug, Clone, TrackableError)]
pub struct Error(TrackableError<ErrorKind>);
impl From<Failure> for Error {
    fn from(f: Failure) -> Self {
        ErrorKind::Other.takes_over(f).into()
    }
}
impl From<std::fmt::Error> for Error {
    fn from(f: std::fmt::Error) -> Self {
        ErrorKind::Other.cause(f).into()
    }
}
impl From<slog::Error> for Error {
    fn from(f: slog::Error) -> Self {
        ErrorKind::Other.cause(f).into()
    }
}
impl From<UnknownFacilityError> for Error {
    fn from(f: UnknownFacilityError) -> Self {
        ErrorKind::Config.cause(f).into()
    }
}
impl From<UnknownPriorityError> for Error {
    fn from(f: UnknownPriorityError) -> Self {
        ErrorKind::InvalidPriority.cause(f).into()
    }
}

/// A list of error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configuration problem: a severity with no priority mapping, an
    /// unresolvable map key, or construction options that cannot be coerced
    /// (e.g. an ident containing a NUL byte).
    Config,

    /// A priority value supplied to a severity map does not name any known
    /// syslog priority.
    InvalidPriority,

    /// The destination refused to open a channel or to accept a message.
    Connection,

    /// Unknown error.
    Other,
}
impl TrackableErrorKind for ErrorKind {}
