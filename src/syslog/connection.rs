//! The destination channel owned by a syslog appender.

use crate::syslog::{Facility, LogOption, Priority};
use crate::Result;
use std::ffi::CStr;
use std::fmt::Debug;

#[cfg(unix)]
pub use self::posix::PosixConnection;

/// One channel to a syslog destination.
///
/// A connection is owned by exactly one appender and is never shared. It is
/// either open or closed; the appender treats this object as the single
/// point of truth for that state and caches nothing.
///
/// The default implementation is [`PosixConnection`] (Unix-like platforms
/// only). Supplying another implementation, for tests or for destinations
/// the platform libc cannot reach, is what
/// [`build_with_connection`](crate::syslog::SyslogAppenderBuilder::build_with_connection)
/// is for.
pub trait Connection: Send + Debug {
    /// Establishes the OS-level channel. A refusal (e.g. resource
    /// exhaustion) fails with [`ErrorKind::Connection`](crate::ErrorKind)
    /// and is not retried here.
    fn open(&mut self, ident: &CStr, options: LogOption, facility: Facility) -> Result<()>;

    /// Sends one pre-formatted line. The message is passed to the
    /// destination as a single opaque string argument, never interpreted as
    /// a format string. Emitting on a closed connection fails with
    /// [`ErrorKind::Connection`](crate::ErrorKind).
    fn emit(&mut self, priority: Priority, message: &str) -> Result<()>;

    /// Releases the channel. Idempotent: closing an already-closed
    /// connection is a no-op, not an error.
    fn close(&mut self);

    /// Whether the channel is currently open.
    fn is_open(&self) -> bool;
}

#[cfg(unix)]
mod posix {
    use super::Connection;
    use crate::syslog::{Facility, LogOption, Priority};
    use crate::{ErrorKind, Result};
    use libc::{closelog, openlog, syslog};
    use once_cell::sync::Lazy;
    use std::ffi::{CStr, CString};
    use std::sync::Mutex;

    /// Serializes `openlog`/`closelog` across connections.
    ///
    /// The POSIX syslog channel is process-global, and libc may retain the
    /// `ident` pointer passed to `openlog` in a global variable. Calls that
    /// change that pointer must not interleave with each other.
    static OPENLOG_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    /// [`Connection`] implementation over the POSIX syslog API.
    ///
    /// Because the underlying channel is process-global, an application
    /// should not keep more than one `PosixConnection` open at a time:
    /// whichever `openlog` ran last owns the real channel, and a `closelog`
    /// from any connection closes it for everyone. One appender owning one
    /// connection is the intended arrangement.
    ///
    /// `openlog` has no error return, so `open` only fails for invariant
    /// violations; refusal by the destination is a property of other
    /// [`Connection`] implementations.
    #[derive(Debug, Default)]
    pub struct PosixConnection {
        /// Kept alive while libc may retain the pointer passed to `openlog`.
        ident: Option<CString>,
        open: bool,
    }

    impl PosixConnection {
        /// Makes a new, closed connection.
        pub fn new() -> Self {
            PosixConnection::default()
        }
    }

    impl Connection for PosixConnection {
        fn open(&mut self, ident: &CStr, options: LogOption, facility: Facility) -> Result<()> {
            let ident = ident.to_owned();

            {
                let _guard = OPENLOG_LOCK.lock().unwrap();
                unsafe {
                    openlog(ident.as_ptr(), options.bits(), facility.code());
                }
            }

            // The previous ident string (if any) is freed only here, after
            // `openlog` has registered the new pointer.
            self.ident = Some(ident);
            self.open = true;
            Ok(())
        }

        fn emit(&mut self, priority: Priority, message: &str) -> Result<()> {
            if !self.open {
                track_panic!(ErrorKind::Connection, "emit on a closed syslog connection");
            }

            let message = to_cstring_lossy(message);
            unsafe {
                syslog(
                    priority.code(),
                    CStr::from_bytes_with_nul_unchecked(b"%s\0").as_ptr(),
                    message.as_ptr(),
                );
            }
            Ok(())
        }

        fn close(&mut self) {
            if self.open {
                let _guard = OPENLOG_LOCK.lock().unwrap();
                unsafe {
                    closelog();
                }
                self.open = false;
            }
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    impl Drop for PosixConnection {
        fn drop(&mut self) {
            self.close();
        }
    }

    /// Converts a `&str` to a `CString`, stripping NUL bytes in the middle.
    ///
    /// The difference between this and `CString::new` is that that method
    /// will fail if there are any NUL bytes instead of stripping them.
    fn to_cstring_lossy(s: &str) -> CString {
        let mut s: Vec<u8> = s.as_bytes().to_vec();

        s.retain(|b| *b != 0);

        // This is sound because we just stripped all the NUL bytes from the
        // input. `CString::from_vec_unchecked` adds the terminator itself.
        unsafe { CString::from_vec_unchecked(s) }
    }

}
