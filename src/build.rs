use crate::appender::Appender;
use crate::Result;

/// This trait allows building appenders.
pub trait Build {
    /// The type of the appender this builder produces.
    type Appender: Appender;

    /// Builds the appender. The destination channel is opened as part of the
    /// build; a failure here means no appender exists at all.
    fn build(&self) -> Result<Self::Appender>;
}
