use crate::appender::Appender;
use crate::event::LogEvent;
use crate::layout::Layout;
use crate::syslog::connection::Connection;
use crate::syslog::severity_map::{PrioritySpec, SeverityMap};
use crate::syslog::{Facility, LogOption, Priority, SyslogAppenderBuilder};
use crate::Result;
use std::borrow::Borrow;
use std::ffi::CString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// [`Appender`] implementation that delivers log events to syslog.
///
/// The appender owns one [`Connection`] and interacts with it only inside a
/// single mutual-exclusion lock shared by [`write`](Appender::write) and
/// [`reopen`](Appender::reopen), so at most one thread is mid-emit or
/// mid-reopen at a time. Priority resolution and layout formatting happen
/// before the lock is taken; a layout that itself logs cannot deadlock the
/// appender.
///
/// Constructed through [`SyslogAppenderBuilder`]; the connection is opened
/// during construction and the appender is live as soon as it exists.
#[derive(Debug)]
pub struct SyslogAppender {
    pub(super) name: String,
    pub(super) ident: CString,
    pub(super) options: LogOption,
    pub(super) facility: Facility,
    pub(super) severity_map: SeverityMap,
    pub(super) layout: Arc<dyn Layout>,
    pub(super) connection: Mutex<Box<dyn Connection>>,
    pub(super) enabled: AtomicBool,
}

impl SyslogAppender {
    /// Creates a new [`SyslogAppenderBuilder`] for an appender with the
    /// given name.
    pub fn builder(name: impl Into<String>) -> SyslogAppenderBuilder {
        SyslogAppenderBuilder::new(name)
    }

    /// The severity-to-priority table in use.
    pub fn severity_map(&self) -> &SeverityMap {
        &self.severity_map
    }

    /// Replaces the severity-to-priority table wholesale.
    ///
    /// See [`SeverityMap::set_mapping`] for how entries are resolved. Takes
    /// `&mut self`: the table is immutable while the appender is shared with
    /// the dispatch path.
    pub fn set_mapping<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Borrow<PrioritySpec>,
    {
        track!(self.severity_map.set_mapping(entries))
    }

    fn lock_connection(&self) -> MutexGuard<'_, Box<dyn Connection>> {
        // A thread that panicked mid-emit leaves no partial connection state
        // worth rejecting, so a poisoned lock is still usable.
        self.connection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Appender for SyslogAppender {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, event: &LogEvent) -> Result<()> {
        // Resolve the priority and render the text before taking the lock.
        let (priority, message, layout_err) = match event {
            LogEvent::Record(record) => {
                let priority = track!(self.severity_map.priority_for(record.severity()))?;
                match self.layout.format(record) {
                    Ok(message) => (priority, message, None),
                    // A layout failure must not surface past the framework
                    // boundary: fall back to the unformatted message and
                    // report the failure as a separate line.
                    Err(e) => (priority, record.message().to_string(), Some(e.to_string())),
                }
            }
            LogEvent::Raw(text) => (Priority::Debug, text.clone(), None),
        };

        if message.is_empty() {
            return Ok(());
        }

        let mut connection = self.lock_connection();
        track!(connection.emit(priority, &message))?;

        if let Some(layout_err) = layout_err {
            let notice = format!(
                "Error fully formatting the previous log message: {}",
                layout_err
            );
            track!(connection.emit(Priority::Err, &notice))?;
        }

        Ok(())
    }

    fn close(&self, write_footer: bool) -> Result<()> {
        let mut connection = self.lock_connection();

        if write_footer {
            if let Some(footer) = self.layout.footer() {
                if !footer.is_empty() && connection.is_open() {
                    track!(connection.emit(Priority::Info, &footer))?;
                }
            }
        }

        self.enabled.store(false, Ordering::SeqCst);
        connection.close();
        Ok(())
    }

    fn is_closed(&self) -> bool {
        !self.lock_connection().is_open()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn reopen(&self) -> Result<()> {
        let mut connection = self.lock_connection();

        if connection.is_open() {
            track!(self.flush())?;
            connection.close();
        }

        track!(connection.open(&self.ident, self.options, self.facility))?;
        self.enabled.store(true, Ordering::SeqCst);
        Ok(())
    }
}
