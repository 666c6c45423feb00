//! Appender that sends log events to the local syslog daemon.
//!
//! The appender itself is platform-independent: it talks to the destination
//! through the [`Connection`] trait, and any implementation of that trait
//! can back it. The bundled [`PosixConnection`] uses the [POSIX syslog API]
//! and exists on Unix-like platforms only; elsewhere,
//! [`SyslogAppenderBuilder::build_with_connection`] is the way to construct
//! the appender.
//!
//! [POSIX syslog API]: https://pubs.opengroup.org/onlinepubs/9699919799/functions/closelog.html
//!
//! # Concurrency issues
//!
//! POSIX doesn't support opening more than one channel to syslogd at a time:
//! the `openlog` settings live in process-global libc state. Although it is
//! safe to construct more than one appender backed by [`PosixConnection`],
//! whichever opened last owns the real channel, and closing any of them
//! closes it for all. For this reason:
//!
//! * Libraries should not construct a syslog appender (or otherwise cause
//!   `openlog` to be called) unless specifically told to do so by the main
//!   application.
//! * An application should not keep more than one syslog appender at the
//!   same time, except momentarily when [`reopen`](crate::Appender::reopen)
//!   cycles the channel or a replacement appender is being constructed.

mod appender;
pub use self::appender::*;

mod builder;
pub use self::builder::*;

mod config;
pub use self::config::*;

mod connection;
pub use self::connection::*;

mod facility;
pub use self::facility::*;

mod logopt;
pub use self::logopt::*;

mod priority;
pub use self::priority::*;

mod severity_map;
pub use self::severity_map::*;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;
