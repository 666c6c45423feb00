//! Bridging appenders into `slog`.

use crate::appender::Appender;
use crate::event::{LogEvent, Record};
use crate::types::Severity;
use crate::{Error, Result};
use slog::{Drain, OwnedKVList, KV};
use std::fmt;
use std::result::Result as StdResult;

/// A [`Drain`] that forwards every record to an [`Appender`].
///
/// The record's message and key-value pairs are collected into an owned
/// [`Record`] before the appender sees them, so the appender side is free of
/// `slog` lifetimes. Errors from the appender are surfaced as the drain's
/// error; call [`ignore_res`] (or install a framework-level error policy)
/// before handing the drain to a `Logger`.
///
/// [`Drain`]: https://docs.rs/slog/2/slog/trait.Drain.html
/// [`ignore_res`]: https://docs.rs/slog/2/slog/trait.Drain.html#method.ignore_res
#[derive(Debug)]
pub struct AppenderDrain<A: Appender>(A);

impl<A: Appender> AppenderDrain<A> {
    /// Wraps an appender.
    pub fn new(appender: A) -> Self {
        AppenderDrain(appender)
    }

    /// Returns a reference to the wrapped appender.
    pub fn appender(&self) -> &A {
        &self.0
    }

    /// Unwraps the appender.
    pub fn into_inner(self) -> A {
        self.0
    }
}

impl<A: Appender> Drain for AppenderDrain<A> {
    type Ok = ();
    type Err = Error;

    fn log(&self, record: &slog::Record, values: &OwnedKVList) -> StdResult<Self::Ok, Self::Err> {
        let record = collect_record(record, values)?;
        self.0.write(&LogEvent::Record(record))
    }
}

/// Flattens a borrowed `slog` record and its logger context into an owned
/// [`Record`].
fn collect_record(record: &slog::Record, values: &OwnedKVList) -> Result<Record> {
    struct Collector(Record);

    impl slog::Serializer for Collector {
        fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments) -> slog::Result {
            self.0.push_kv(key.to_string(), val.to_string());
            Ok(())
        }
    }

    let severity = Severity::from_level(record.level());
    let mut collector = Collector(Record::new(severity, record.msg().to_string()));

    values.serialize(record, &mut collector)?;
    record.kv().serialize(record, &mut collector)?;

    Ok(collector.0)
}
