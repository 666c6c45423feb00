//! The generic appender contract.

use crate::event::LogEvent;
use crate::Result;

/// An output sink for log events.
///
/// The framework's dispatch core holds appenders behind this trait and calls
/// [`write`](Appender::write) once for every event that passed its level and
/// filter checks. Everything here may be called from any dispatch thread;
/// implementations synchronize internally.
///
/// # Lifecycle
///
/// An appender is live as soon as it is constructed; there is no separate
/// activation step. `close` releases the destination channel and disables the
/// appender, `reopen` cycles the channel and re-enables it:
///
/// ```text
/// Open --close()--> Closed
/// Closed --reopen()--> Open
/// Open --reopen()--> Open   (channel cycled)
/// ```
///
/// Writing while closed is an error surfaced from the destination channel;
/// appenders do not reopen themselves on write.
pub trait Appender: Send + Sync {
    /// The name this appender was registered under.
    fn name(&self) -> &str;

    /// Delivers one log event to the destination.
    ///
    /// An event whose rendered message is empty is skipped silently. Failures
    /// of the destination propagate to the caller; the framework's own policy
    /// decides what happens from there.
    fn write(&self, event: &LogEvent) -> Result<()>;

    /// Flushes buffered state, if the destination has any. The default does
    /// nothing. Must not touch the destination channel itself: `reopen`
    /// invokes this hook while holding the write lock.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Shuts the appender down: writes the layout's footer (unless
    /// `write_footer` is false), disables the appender, and releases the
    /// destination channel. Idempotent with respect to the channel.
    fn close(&self, write_footer: bool) -> Result<()>;

    /// Whether the destination channel is currently closed. This queries the
    /// live channel state, never a cached flag.
    fn is_closed(&self) -> bool;

    /// Whether the appender accepts events. True after construction and
    /// `reopen`, false after `close`.
    fn is_enabled(&self) -> bool;

    /// Cycles the destination channel: flushes and closes the current one if
    /// it is open, then opens a fresh one from the stored configuration, in
    /// that order. Used to recover after the destination restarts.
    fn reopen(&self) -> Result<()>;
}
