//! Ways to format log records into destination text.
//!
//! Syslog does not support structured log data. If key-value pairs are to be
//! included with log messages, they must be included as part of the message.
//! Implementations of [`Layout`] determine if and how this will be done.

use crate::event::Record;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Write};
use std::sync::Arc;

/// A way to render a log record into the single line of text an appender
/// sends to its destination.
pub trait Layout: Send + Sync + Debug {
    /// Formats a record into a message string. An empty result makes the
    /// appender skip the event entirely.
    fn format(&self, record: &Record) -> Result<String>;

    /// Text emitted once when an appender closes with `write_footer` set.
    /// The default is no footer.
    fn footer(&self) -> Option<String> {
        None
    }
}

impl<T: Layout + ?Sized> Layout for Box<T> {
    fn format(&self, record: &Record) -> Result<String> {
        (**self).format(record)
    }

    fn footer(&self) -> Option<String> {
        (**self).footer()
    }
}

impl<T: Layout + ?Sized> Layout for Arc<T> {
    fn format(&self, record: &Record) -> Result<String> {
        (**self).format(record)
    }

    fn footer(&self) -> Option<String> {
        (**self).footer()
    }
}

/// An implementation of [`Layout`] that discards the key-value pairs and
/// renders only the message of a record.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicLayout;
impl Layout for BasicLayout {
    fn format(&self, record: &Record) -> Result<String> {
        Ok(record.message().to_string())
    }
}

/// A [`Layout`] implementation that calls a closure to perform the
/// formatting.
///
/// This is meant to provide a convenient way to implement a custom `Layout`.
pub struct CustomLayout<F: Fn(&Record) -> Result<String> + Send + Sync>(pub F);
impl<F: Fn(&Record) -> Result<String> + Send + Sync> Layout for CustomLayout<F> {
    fn format(&self, record: &Record) -> Result<String> {
        self.0(record)
    }
}
impl<F: Fn(&Record) -> Result<String> + Send + Sync> Debug for CustomLayout<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomLayout").finish()
    }
}

/// Copies input to output, but escapes characters as prescribed by RFC 5424
/// for PARAM-VALUEs.
struct Rfc5424LikeValueEscaper<W: fmt::Write>(W);

impl<W: fmt::Write> fmt::Write for Rfc5424LikeValueEscaper<W> {
    fn write_str(&mut self, mut s: &str) -> fmt::Result {
        while let Some(index) = s.find(|c| c == '\\' || c == '"' || c == ']') {
            if index != 0 {
                self.0.write_str(&s[..index])?;
            }

            // All three delimiters are ASCII characters, so this won't have
            // bogus results.
            self.write_char(s.as_bytes()[index] as char)?;
            s = &s[(index + 1)..];
        }

        if !s.is_empty() {
            self.0.write_str(s)?;
        }

        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        match c {
            '\\' => self.0.write_str(r"\\"),
            '"' => self.0.write_str("\\\""),
            ']' => self.0.write_str("\\]"),
            _ => write!(self.0, "{}", c),
        }
    }
}

/// An implementation of [`Layout`] that appends the key-value pairs of a
/// record to its message, similarly to [RFC 5424].
///
/// # Not really RFC 5424
///
/// This does not actually generate conformant RFC 5424 STRUCTURED-DATA. The
/// differences are:
///
/// * All key-value pairs are placed into a single SD-ELEMENT.
/// * The SD-ELEMENT does not contain an SD-ID, only SD-PARAMs.
/// * PARAM-NAMEs are encoded in UTF-8, not ASCII.
/// * Forbidden characters in PARAM-NAMEs are not filtered out, nor is an
///   error raised if a key contains such characters.
///
/// # Example output
///
/// Given a message `Hello, world!`, where the key `key1` has the value
/// `value1` and `key2` has the value `value2`, the formatted message will be
/// `Hello, world! [key1="value1" key2="value2"]`.
///
/// [RFC 5424]: https://tools.ietf.org/html/rfc5424
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLayout;
impl Layout for DefaultLayout {
    fn format(&self, record: &Record) -> Result<String> {
        let mut out = String::with_capacity(record.message().len());
        out.push_str(record.message());

        let mut is_first_kv = true;
        for (key, value) in record.kv() {
            out.push_str(if is_first_kv { " [" } else { " " });
            is_first_kv = false;

            // Write the key unaltered, but escape the value. RFC 5424 does
            // not allow space, ']', '"', or '\' to appear in PARAM-NAMEs,
            // and does not allow such characters to be escaped.
            write!(out, "{}=\"", key)?;
            write!(Rfc5424LikeValueEscaper(&mut out), "{}", value)?;
            out.push('"');
        }
        if !is_first_kv {
            out.push(']');
        }

        Ok(out)
    }
}

/// Enumeration of built-in `Layout`s, for use with serde.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum LayoutConfig {
    /// [`DefaultLayout`].
    Default,

    /// [`BasicLayout`].
    Basic,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig::Default
    }
}

impl From<LayoutConfig> for Arc<dyn Layout> {
    fn from(conf: LayoutConfig) -> Self {
        Self::from(&conf)
    }
}

impl From<&LayoutConfig> for Arc<dyn Layout> {
    fn from(conf: &LayoutConfig) -> Self {
        match *conf {
            LayoutConfig::Default => Arc::new(DefaultLayout),
            LayoutConfig::Basic => Arc::new(BasicLayout),
        }
    }
}
