//! Log events as seen by an appender.

use crate::types::Severity;

/// One value handed to [`Appender::write`](crate::Appender::write).
///
/// The dispatch path usually carries a structured [`Record`], but the
/// framework also accepts pre-rendered loggable values (for example a bare
/// string pushed through a legacy entry point); those arrive as `Raw`.
#[derive(Debug, Clone)]
pub enum LogEvent {
    /// A structured record produced by the framework.
    Record(Record),

    /// A pre-rendered loggable value. Logged verbatim at the destination's
    /// debug priority, bypassing the severity map and the layout.
    Raw(String),
}

impl LogEvent {
    /// Wraps a pre-rendered value.
    pub fn raw(text: impl Into<String>) -> Self {
        LogEvent::Raw(text.into())
    }

    /// The severity of this event, if it is a structured record.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            LogEvent::Record(record) => Some(record.severity()),
            LogEvent::Raw(_) => None,
        }
    }
}

impl From<Record> for LogEvent {
    fn from(record: Record) -> Self {
        LogEvent::Record(record)
    }
}

/// A structured log record: a severity, a message, and the key-value pairs
/// attached by the logging context.
#[derive(Debug, Clone)]
pub struct Record {
    severity: Severity,
    message: String,
    kv: Vec<(String, String)>,
}

impl Record {
    /// Makes a new `Record` with no key-value pairs.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Record {
            severity,
            message: message.into(),
            kv: Vec::new(),
        }
    }

    /// Attaches a key-value pair.
    pub fn with_kv(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kv.push((key.into(), value.into()));
        self
    }

    pub(crate) fn push_kv(&mut self, key: String, value: String) {
        self.kv.push((key, value));
    }

    /// The severity of this record.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The unformatted message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attached key-value pairs, in insertion order.
    pub fn kv(&self) -> &[(String, String)] {
        &self.kv
    }
}
