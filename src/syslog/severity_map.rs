use crate::syslog::Priority;
use crate::types::{Severity, SEVERITY_COUNT};
use crate::{Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::os::raw::c_int;

/// A priority value as it appears in configuration: either a symbolic name
/// (`"err"`, `"LOG_ERR"`, case-insensitive) or a raw numeric code.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrioritySpec {
    /// A symbolic priority name.
    Name(String),

    /// A numeric priority code (0–7).
    Code(c_int),
}

impl From<&str> for PrioritySpec {
    fn from(name: &str) -> Self {
        PrioritySpec::Name(name.to_string())
    }
}

impl From<String> for PrioritySpec {
    fn from(name: String) -> Self {
        PrioritySpec::Name(name)
    }
}

impl From<c_int> for PrioritySpec {
    fn from(code: c_int) -> Self {
        PrioritySpec::Code(code)
    }
}

impl From<Priority> for PrioritySpec {
    fn from(priority: Priority) -> Self {
        PrioritySpec::Name(priority.name().to_string())
    }
}

/// Translation table from framework severities to syslog priorities.
///
/// The table is indexed by severity ordinal. Every severity in use must have
/// an entry: looking up an unmapped severity is a configuration error, never
/// a silent default. The table is built once and only ever replaced
/// wholesale, via [`set_mapping`](SeverityMap::set_mapping).
///
/// # Default table
///
/// | Severity | Priority  |
/// |----------|-----------|
/// | `Debug`  | `debug`   |
/// | `Info`   | `info`    |
/// | `Warn`   | `warning` |
/// | `Error`  | `err`     |
/// | `Fatal`  | `crit`    |
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeverityMap {
    table: [Option<Priority>; SEVERITY_COUNT],
}

impl Default for SeverityMap {
    fn default() -> Self {
        SeverityMap {
            table: [
                Some(Priority::Debug),   // Severity::Debug
                Some(Priority::Info),    // Severity::Info
                Some(Priority::Warning), // Severity::Warn
                Some(Priority::Err),     // Severity::Error
                Some(Priority::Crit),    // Severity::Fatal
            ],
        }
    }
}

impl SeverityMap {
    /// Looks up the priority for a severity.
    ///
    /// Fails with [`ErrorKind::Config`] if the table has no entry for this
    /// severity.
    pub fn priority_for(&self, severity: Severity) -> Result<Priority> {
        match self.table[severity.ordinal()] {
            Some(priority) => Ok(priority),
            None => track_panic!(
                ErrorKind::Config,
                "No priority mapped for severity {:?}",
                severity
            ),
        }
    }

    /// The priority for a severity, or `None` if the table has no entry.
    pub fn get(&self, severity: Severity) -> Option<Priority> {
        self.table[severity.ordinal()]
    }

    /// Replaces the whole table with the given entries.
    ///
    /// Each key is a severity name (through the framework's name registry) or
    /// a severity ordinal in decimal; each value resolves either directly (a
    /// numeric code) or by case-insensitive symbolic name. Severities absent
    /// from `entries` end up unmapped. On error the previous table is kept.
    pub fn set_mapping<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Borrow<PrioritySpec>,
    {
        let mut table = [None; SEVERITY_COUNT];

        for (key, spec) in entries {
            let severity = track!(resolve_severity(key.as_ref()))?;
            let priority = track!(resolve_priority(spec.borrow()))?;
            table[severity.ordinal()] = Some(priority);
        }

        self.table = table;
        Ok(())
    }
}

fn resolve_severity(key: &str) -> Result<Severity> {
    if let Ok(ordinal) = key.parse::<usize>() {
        let severity = track_assert_some!(
            Severity::from_ordinal(ordinal),
            ErrorKind::Config,
            "Severity ordinal out of range: {}",
            ordinal
        );
        Ok(severity)
    } else {
        track!(key.parse::<Severity>())
    }
}

fn resolve_priority(spec: &PrioritySpec) -> Result<Priority> {
    match spec {
        PrioritySpec::Name(name) => track!(name.parse::<Priority>().map_err(Error::from)),
        PrioritySpec::Code(code) => {
            let priority = track_assert_some!(
                Priority::from_int(*code),
                ErrorKind::InvalidPriority,
                "Unrecognized syslog priority code: {}",
                code
            );
            Ok(priority)
        }
    }
}
