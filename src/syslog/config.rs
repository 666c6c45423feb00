use crate::config::Config;
use crate::layout::LayoutConfig;
use crate::syslog::severity_map::PrioritySpec;
use crate::syslog::{Facility, LogOption, SyslogAppenderBuilder};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The configuration of `SyslogAppenderBuilder`.
///
/// # Examples
///
/// ```
/// use syslog_appender::syslog::SyslogConfig;
///
/// let config: SyslogConfig = serdeconv::from_toml_str(r#"
/// name = "accounting"
/// ident = "acct"
/// logopt = ["pid", "perror"]
/// facility = "local2"
///
/// [map]
/// debug = "info"
/// fatal = "emerg"
/// "#).unwrap();
/// # let _ = config;
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
#[serde(default)]
pub struct SyslogConfig {
    /// The name the appender is registered under.
    pub name: String,

    /// The identification string prefixed to every message. (POSIX calls
    /// this the “tag”.) Defaults to the appender's name.
    pub ident: Option<String>,

    /// Connection-open options: a raw integer, a flag name, a `"pid|cons"`
    /// string, or a list of flag names. Defaults to `PID | CONS`.
    pub logopt: Option<LogOption>,

    /// The syslog facility to send logs to, by name or numeric code.
    pub facility: Facility,

    /// How to render records into message text.
    ///
    /// Possible values are `default` and `basic`.
    pub layout: LayoutConfig,

    /// Severity-to-priority overrides. When present, this table replaces the
    /// default severity map wholesale; severities it does not name become
    /// unmapped.
    pub map: Option<BTreeMap<String, PrioritySpec>>,
}

impl SyslogConfig {
    /// Creates a new `SyslogConfig` with default settings.
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        SyslogConfig {
            name: "syslog".to_string(),
            ident: None,
            logopt: None,
            facility: Facility::default(),
            layout: LayoutConfig::default(),
            map: None,
        }
    }
}

impl Config for SyslogConfig {
    type Builder = SyslogAppenderBuilder;

    fn try_to_builder(&self) -> Result<Self::Builder> {
        let mut b = SyslogAppenderBuilder::new(self.name.clone());

        b.facility(self.facility);
        b.layout_arc((&self.layout).into());

        if let Some(ident) = &self.ident {
            b.ident(ident.clone());
        }

        if let Some(logopt) = self.logopt {
            b.logopt(logopt);
        }

        if let Some(map) = &self.map {
            b.map(map.clone());
        }

        Ok(b)
    }
}
