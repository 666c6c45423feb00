//! One output sink ("appender") for a structured-logging framework: delivery
//! of log events to the operating system's syslog facility, together with
//! the generic [`Appender`] contract every sink of the framework satisfies.
//!
//! An appender is constructed once, is live as soon as it exists, and then
//! participates in the framework lifecycle: `write` per accepted event,
//! `close` at shutdown, `reopen` to cycle the destination channel (say,
//! after the syslog daemon restarts). Severities are translated to syslog
//! priorities through a [`SeverityMap`](syslog::SeverityMap), and message
//! text comes from a [`Layout`](layout::Layout) collaborator.
//!
//! # Examples
//!
//! Creating an appender via `SyslogAppenderBuilder`:
//!
//! ```no_run
//! use syslog_appender::syslog::{Facility, SyslogAppenderBuilder};
//! use syslog_appender::types::Severity;
//! use syslog_appender::{Appender, Build, Record};
//!
//! # fn main() -> Result<(), syslog_appender::Error> {
//! let appender = SyslogAppenderBuilder::new("example-app")
//!     .facility(Facility::User)
//!     .build()?;
//!
//! appender.write(&Record::new(Severity::Info, "Hello, syslog!").into())?;
//! # Ok(())
//! # }
//! ```
//!
//! Creating an appender from configuration text (TOML):
//!
//! ```
//! use syslog_appender::syslog::SyslogConfig;
//!
//! let config: SyslogConfig = serdeconv::from_toml_str(r#"
//! name = "example"
//! facility = "daemon"
//! "#).unwrap();
//! # let _ = config;
//! ```
#![warn(missing_docs)]

#[macro_use]
extern crate trackable;

#[cfg_attr(test, macro_use)]
extern crate slog;

pub use crate::appender::Appender;
pub use crate::build::Build;
pub use crate::config::Config;
pub use crate::drain::AppenderDrain;
pub use crate::error::{Error, ErrorKind};
pub use crate::event::{LogEvent, Record};

pub mod layout;
pub mod syslog;
pub mod types;

mod appender;
mod build;
mod config;
mod drain;
mod error;
mod event;

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
