use crate::build::Build;
use crate::Result;

/// Configuration of an appender builder.
pub trait Config {
    /// Appender builder.
    type Builder: Build;

    /// Makes an appender builder associated with this configuration.
    fn try_to_builder(&self) -> Result<Self::Builder>;

    /// Builds an appender with this configuration.
    fn build_appender(&self) -> Result<<Self::Builder as Build>::Appender> {
        let builder = track!(self.try_to_builder())?;
        let appender = track!(builder.build())?;
        Ok(appender)
    }
}
