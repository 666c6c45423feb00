//! A recording fake of the syslog channel.
//!
//! Each mock connection records into its own event log, so every test owns
//! an isolated destination and can assert on the exact call sequence the
//! appender produced.

use crate::syslog::connection::Connection;
use crate::syslog::{Facility, LogOption, Priority};
use crate::{ErrorKind, Result};
use std::ffi::CStr;
use std::mem;
use std::sync::{Arc, Mutex};

/// One observed call on a [`MockConnection`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Open {
        ident: String,
        options: LogOption,
        facility: Facility,
    },
    Emit {
        priority: Priority,
        message: String,
    },
    Close,
}

/// Handle onto the call sequence recorded by one [`MockConnection`].
#[derive(Clone, Debug, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Event> {
        mem::take(&mut *self.0.lock().unwrap())
    }

    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

/// [`Connection`] implementation that records calls instead of talking to
/// the OS.
#[derive(Debug, Default)]
pub struct MockConnection {
    log: EventLog,
    open: bool,
    refuse_open: bool,
}

impl MockConnection {
    /// A fresh closed connection plus the handle to its event log.
    pub fn new() -> (MockConnection, EventLog) {
        let log = EventLog::default();
        let connection = MockConnection {
            log: log.clone(),
            open: false,
            refuse_open: false,
        };
        (connection, log)
    }

    /// A connection whose `open` always refuses.
    pub fn refusing() -> MockConnection {
        MockConnection {
            refuse_open: true,
            ..MockConnection::default()
        }
    }
}

impl Connection for MockConnection {
    fn open(&mut self, ident: &CStr, options: LogOption, facility: Facility) -> Result<()> {
        if self.refuse_open {
            track_panic!(ErrorKind::Connection, "syslog channel refused to open");
        }

        self.log.push(Event::Open {
            ident: ident.to_string_lossy().into_owned(),
            options,
            facility,
        });
        self.open = true;
        Ok(())
    }

    fn emit(&mut self, priority: Priority, message: &str) -> Result<()> {
        if !self.open {
            track_panic!(ErrorKind::Connection, "emit on a closed syslog connection");
        }

        self.log.push(Event::Emit {
            priority,
            message: message.to_string(),
        });
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            self.log.push(Event::Close);
            self.open = false;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
