use crate::build::Build;
use crate::layout::{DefaultLayout, Layout};
use crate::syslog::appender::SyslogAppender;
use crate::syslog::connection::Connection;
#[cfg(unix)]
use crate::syslog::connection::PosixConnection;
use crate::syslog::severity_map::{PrioritySpec, SeverityMap};
use crate::syslog::{Facility, LogOption};
use crate::{Error, ErrorKind, Result};
use std::collections::BTreeMap;
use std::ffi::CString;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use trackable::error::ErrorKindExt;

/// An appender builder which builds appenders that send log events to
/// syslog.
///
/// All settings except the appender name have defaults: the `ident` falls
/// back to the appender name, the facility to `user`, the open options to
/// `PID | CONS`, the layout to [`DefaultLayout`], and the severity map to
/// [`SeverityMap::default`].
///
/// # Example
///
/// ```no_run
/// use syslog_appender::syslog::{Facility, SyslogAppenderBuilder};
/// use syslog_appender::Build;
///
/// # fn main() -> Result<(), syslog_appender::Error> {
/// let appender = SyslogAppenderBuilder::new("example-app")
///     .facility(Facility::Daemon)
///     .log_perror()
///     .build()?;
/// # let _ = appender;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SyslogAppenderBuilder {
    name: String,
    ident: Option<String>,
    options: Option<LogOption>,
    facility: Facility,
    layout: Arc<dyn Layout>,
    map: Option<BTreeMap<String, PrioritySpec>>,
}

impl SyslogAppenderBuilder {
    /// Makes a new `SyslogAppenderBuilder` for an appender with the given
    /// name.
    pub fn new(name: impl Into<String>) -> Self {
        SyslogAppenderBuilder {
            name: name.into(),
            ident: None,
            options: None,
            facility: Facility::default(),
            layout: Arc::new(DefaultLayout),
            map: None,
        }
    }

    /// Sets the identification string prefixed to every message. (POSIX
    /// calls this the “tag”.)
    ///
    /// By default the appender's name is used. The string must not contain
    /// any zero (ASCII NUL) bytes; the byte check happens at build time and
    /// fails the build rather than panicking.
    pub fn ident(&mut self, ident: impl Into<String>) -> &mut Self {
        self.ident = Some(ident.into());
        self
    }

    /// Sets the syslog facility to send logs to.
    ///
    /// By default, this is the `user` facility.
    pub fn facility(&mut self, facility: Facility) -> &mut Self {
        self.facility = facility;
        self
    }

    /// Sets the connection-open options outright.
    ///
    /// The default, when neither this method nor any of the flag methods is
    /// called, is `PID | CONS`. Calling this (or any flag method) discards
    /// that default.
    pub fn logopt(&mut self, options: LogOption) -> &mut Self {
        self.options = Some(options);
        self
    }

    fn set_flag(&mut self, flag: LogOption) -> &mut Self {
        let options = self.options.get_or_insert(LogOption::empty());
        *options |= flag;
        self
    }

    /// Include the process ID in log messages.
    pub fn log_pid(&mut self) -> &mut Self {
        self.set_flag(LogOption::PID)
    }

    /// Write directly to the system console if there is an error while
    /// sending to the syslog daemon.
    pub fn log_cons(&mut self) -> &mut Self {
        self.set_flag(LogOption::CONS)
    }

    /// Immediately open a connection to the syslog server, instead of
    /// waiting until the first log message is sent.
    ///
    /// `log_ndelay` and `log_odelay` are mutually exclusive; setting one
    /// clears the other.
    pub fn log_ndelay(&mut self) -> &mut Self {
        let options = self.options.get_or_insert(LogOption::empty());
        *options = LogOption::from_bits(options.bits() & !LogOption::ODELAY.bits())
            | LogOption::NDELAY;
        self
    }

    /// *Don't* immediately open a connection to the syslog server. Wait
    /// until the first log message is sent before connecting.
    ///
    /// `log_ndelay` and `log_odelay` are mutually exclusive; setting one
    /// clears the other.
    pub fn log_odelay(&mut self) -> &mut Self {
        let options = self.options.get_or_insert(LogOption::empty());
        *options = LogOption::from_bits(options.bits() & !LogOption::NDELAY.bits())
            | LogOption::ODELAY;
        self
    }

    /// If a child process is created to send a log message, don't wait for
    /// that child process to exit.
    pub fn log_nowait(&mut self) -> &mut Self {
        self.set_flag(LogOption::NOWAIT)
    }

    /// Also emit log messages on `stderr`.
    pub fn log_perror(&mut self) -> &mut Self {
        self.set_flag(LogOption::PERROR)
    }

    /// Sets the layout used to render records.
    ///
    /// The default is [`DefaultLayout`]. This method wraps the layout in an
    /// `Arc`; if yours already is one, call
    /// [`layout_arc`](SyslogAppenderBuilder::layout_arc) instead.
    pub fn layout(&mut self, layout: impl Layout + 'static) -> &mut Self {
        self.layout_arc(Arc::new(layout))
    }

    /// Sets the layout used to render records, without re-wrapping it.
    pub fn layout_arc(&mut self, layout: Arc<dyn Layout>) -> &mut Self {
        self.layout = layout;
        self
    }

    /// Supplies a severity-to-priority table, applied at build time through
    /// [`SeverityMap::set_mapping`] and replacing the default table
    /// wholesale.
    pub fn map(&mut self, entries: BTreeMap<String, PrioritySpec>) -> &mut Self {
        self.map = Some(entries);
        self
    }

    /// Builds the appender around the given connection and opens it.
    ///
    /// This is the platform-independent entry point: the plain
    /// [`build`](Build::build) uses it with a
    /// [`PosixConnection`](crate::syslog::PosixConnection), while tests and
    /// exotic destinations pass their own [`Connection`] implementation.
    pub fn build_with_connection(
        &self,
        connection: Box<dyn Connection>,
    ) -> Result<SyslogAppender> {
        let ident = self.ident.clone().unwrap_or_else(|| self.name.clone());
        let ident = track!(CString::new(ident)
            .map_err(|e| Error::from(ErrorKind::Config.cause(e))))?;

        let options = self.options.unwrap_or(LogOption::PID | LogOption::CONS);

        let mut severity_map = SeverityMap::default();
        if let Some(map) = &self.map {
            track!(severity_map.set_mapping(map))?;
        }

        let mut connection = connection;
        track!(connection.open(&ident, options, self.facility))?;

        Ok(SyslogAppender {
            name: self.name.clone(),
            ident,
            options,
            facility: self.facility,
            severity_map,
            layout: Arc::clone(&self.layout),
            connection: Mutex::new(connection),
            enabled: AtomicBool::new(true),
        })
    }
}

impl Build for SyslogAppenderBuilder {
    type Appender = SyslogAppender;

    #[cfg(unix)]
    fn build(&self) -> Result<SyslogAppender> {
        self.build_with_connection(Box::new(PosixConnection::new()))
    }

    #[cfg(not(unix))]
    fn build(&self) -> Result<SyslogAppender> {
        track_panic!(ErrorKind::Config, "syslog is not supported on this platform");
    }
}
