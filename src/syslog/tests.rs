use crate::appender::Appender;
use crate::config::Config;
use crate::drain::AppenderDrain;
use crate::event::{LogEvent, Record};
use crate::layout::{CustomLayout, Layout};
use crate::syslog::mock::{Event, EventLog, MockConnection};
use crate::syslog::{
    Facility, LogOption, Priority, PrioritySpec, SyslogAppender, SyslogAppenderBuilder,
    SyslogConfig,
};
use crate::types::Severity;
use crate::{ErrorKind, Result};
use slog::Drain;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

fn mock_appender(builder: &SyslogAppenderBuilder) -> (SyslogAppender, EventLog) {
    let (connection, log) = MockConnection::new();
    let appender = builder
        .build_with_connection(Box::new(connection))
        .expect("construction failed");
    (appender, log)
}

fn priority_map(entries: &[(&str, &str)]) -> BTreeMap<String, PrioritySpec> {
    entries
        .iter()
        .map(|(severity, priority)| (severity.to_string(), PrioritySpec::from(*priority)))
        .collect()
}

#[test]
fn construction_opens_the_connection() {
    let mut builder = SyslogAppender::builder("svc-writer");
    builder.ident("svc").facility(Facility::Local0);
    let (appender, log) = mock_appender(&builder);

    assert_eq!(
        log.take(),
        vec![Event::Open {
            ident: "svc".to_string(),
            options: LogOption::PID | LogOption::CONS,
            facility: Facility::Local0,
        }]
    );
    assert_eq!(appender.name(), "svc-writer");
    assert!(appender.is_enabled());
    assert!(!appender.is_closed());
    assert_eq!(
        appender.severity_map().priority_for(Severity::Fatal).unwrap(),
        Priority::Crit
    );
}

#[test]
fn ident_defaults_to_the_appender_name() {
    let (_appender, log) = mock_appender(&SyslogAppender::builder("payments"));

    match &log.take()[..] {
        [Event::Open { ident, .. }] => assert_eq!(ident, "payments"),
        events => panic!("unexpected events: {:?}", events),
    }
}

#[test]
fn write_emits_exactly_one_line() {
    let (appender, log) = mock_appender(&SyslogAppender::builder("app"));
    log.take();

    let record = Record::new(Severity::Error, "disk failed").with_kv("dev", "sda1");
    appender.write(&record.into()).unwrap();

    assert_eq!(
        log.take(),
        vec![Event::Emit {
            priority: Priority::Err,
            message: "disk failed [dev=\"sda1\"]".to_string(),
        }]
    );
}

#[test]
fn empty_messages_are_skipped_silently() {
    let mut builder = SyslogAppender::builder("app");
    builder.layout(CustomLayout(|_: &Record| Ok(String::new())));
    let (appender, log) = mock_appender(&builder);
    log.take();

    appender
        .write(&Record::new(Severity::Info, "ignored").into())
        .unwrap();
    appender.write(&LogEvent::raw("")).unwrap();

    assert_eq!(log.take(), vec![]);
}

#[test]
fn raw_values_log_at_debug_priority() {
    let (appender, log) = mock_appender(&SyslogAppender::builder("app"));
    log.take();

    appender.write(&LogEvent::raw("plain text")).unwrap();

    assert_eq!(
        log.take(),
        vec![Event::Emit {
            priority: Priority::Debug,
            message: "plain text".to_string(),
        }]
    );
}

#[test]
fn layout_failures_fall_back_to_the_unformatted_message() {
    use trackable::error::ErrorKindExt;

    let mut builder = SyslogAppender::builder("app");
    builder.layout(CustomLayout(|_: &Record| -> Result<String> {
        Err(ErrorKind::Other.cause("serializer exploded").into())
    }));
    let (appender, log) = mock_appender(&builder);
    log.take();

    appender
        .write(&Record::new(Severity::Warn, "original text").into())
        .unwrap();

    let events = log.take();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        Event::Emit {
            priority: Priority::Warning,
            message: "original text".to_string(),
        }
    );
    match &events[1] {
        Event::Emit { priority, message } => {
            assert_eq!(*priority, Priority::Err);
            assert!(
                message.starts_with("Error fully formatting the previous log message:"),
                "unexpected follow-up line: {}",
                message
            );
        }
        event => panic!("unexpected event: {:?}", event),
    }
}

#[test]
fn close_disables_the_appender_and_is_idempotent() {
    let (appender, log) = mock_appender(&SyslogAppender::builder("app"));
    log.take();

    appender.close(true).unwrap();
    assert!(appender.is_closed());
    assert!(!appender.is_enabled());
    assert_eq!(log.take(), vec![Event::Close]);

    // A second close attempts no further connection call.
    appender.close(true).unwrap();
    assert_eq!(log.take(), vec![]);
}

#[derive(Debug)]
struct FooterLayout;

impl Layout for FooterLayout {
    fn format(&self, record: &Record) -> Result<String> {
        Ok(record.message().to_string())
    }

    fn footer(&self) -> Option<String> {
        Some("appender closed".to_string())
    }
}

#[test]
fn close_writes_the_layout_footer_when_asked() {
    let mut builder = SyslogAppender::builder("app");
    builder.layout(FooterLayout);
    let (appender, log) = mock_appender(&builder);
    log.take();

    appender.close(true).unwrap();
    assert_eq!(
        log.take(),
        vec![
            Event::Emit {
                priority: Priority::Info,
                message: "appender closed".to_string(),
            },
            Event::Close,
        ]
    );
}

#[test]
fn close_skips_the_footer_when_not_asked() {
    let mut builder = SyslogAppender::builder("app");
    builder.layout(FooterLayout);
    let (appender, log) = mock_appender(&builder);
    log.take();

    appender.close(false).unwrap();
    assert_eq!(log.take(), vec![Event::Close]);
}

#[test]
fn write_after_close_surfaces_a_connection_error() {
    let (appender, log) = mock_appender(&SyslogAppender::builder("app"));
    appender.close(true).unwrap();
    log.take();

    let err = appender
        .write(&Record::new(Severity::Info, "too late").into())
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Connection);
    assert_eq!(log.take(), vec![]);
}

#[test]
fn reopen_cycles_an_open_connection() {
    let mut builder = SyslogAppender::builder("app");
    builder.ident("cycled").facility(Facility::Daemon);
    let (appender, log) = mock_appender(&builder);
    log.take();

    appender.reopen().unwrap();

    assert_eq!(
        log.take(),
        vec![
            Event::Close,
            Event::Open {
                ident: "cycled".to_string(),
                options: LogOption::PID | LogOption::CONS,
                facility: Facility::Daemon,
            },
        ]
    );
    assert!(!appender.is_closed());
    assert!(appender.is_enabled());
}

#[test]
fn reopen_revives_a_closed_appender() {
    let (appender, log) = mock_appender(&SyslogAppender::builder("app"));
    appender.close(true).unwrap();
    log.take();

    appender.reopen().unwrap();

    match &log.take()[..] {
        [Event::Open { .. }] => {}
        events => panic!("unexpected events: {:?}", events),
    }
    assert!(!appender.is_closed());
    assert!(appender.is_enabled());

    appender
        .write(&Record::new(Severity::Info, "back again").into())
        .unwrap();
    assert_eq!(log.take().len(), 1);
}

#[test]
fn a_supplied_map_replaces_the_default_wholesale() {
    let mut builder = SyslogAppender::builder("app");
    builder.map(priority_map(&[("debug", "LOG_ERR")]));
    let (appender, log) = mock_appender(&builder);
    log.take();

    appender
        .write(&Record::new(Severity::Debug, "remapped").into())
        .unwrap();
    assert_eq!(
        log.take(),
        vec![Event::Emit {
            priority: Priority::Err,
            message: "remapped".to_string(),
        }]
    );

    // Severities the map does not name are a configuration error, not a
    // silent default, and nothing reaches the connection.
    let err = appender
        .write(&Record::new(Severity::Info, "unmapped").into())
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Config);
    assert_eq!(log.take(), vec![]);
}

#[test]
fn set_mapping_replaces_the_table_after_construction() {
    let (mut appender, log) = mock_appender(&SyslogAppender::builder("app"));
    log.take();

    appender
        .set_mapping(vec![("info", PrioritySpec::from("notice"))])
        .unwrap();

    appender
        .write(&Record::new(Severity::Info, "promoted").into())
        .unwrap();
    assert_eq!(
        log.take(),
        vec![Event::Emit {
            priority: Priority::Notice,
            message: "promoted".to_string(),
        }]
    );
}

#[test]
fn an_unknown_priority_fails_construction() {
    let mut builder = SyslogAppender::builder("app");
    builder.map(priority_map(&[("debug", "loud")]));

    let (connection, log) = MockConnection::new();
    let err = builder
        .build_with_connection(Box::new(connection))
        .unwrap_err();

    assert_eq!(*err.kind(), ErrorKind::InvalidPriority);
    // The connection was never opened.
    assert_eq!(log.take(), vec![]);
}

#[test]
fn a_nul_byte_in_the_ident_fails_construction() {
    let mut builder = SyslogAppender::builder("app");
    builder.ident("bad\0ident");

    let (connection, _log) = MockConnection::new();
    let err = builder
        .build_with_connection(Box::new(connection))
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Config);
}

#[test]
fn a_refused_open_fails_construction() {
    let err = SyslogAppender::builder("app")
        .build_with_connection(Box::new(MockConnection::refusing()))
        .unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::Connection);
}

#[test]
fn concurrent_writes_do_not_interleave() {
    const THREADS: usize = 4;
    const WRITES_PER_THREAD: usize = 25;

    let (appender, log) = mock_appender(&SyslogAppender::builder("app"));
    log.take();
    let appender = Arc::new(appender);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let appender = Arc::clone(&appender);
            thread::spawn(move || {
                for i in 0..WRITES_PER_THREAD {
                    let record = Record::new(Severity::Error, format!("thread {} write {}", t, i));
                    appender.write(&record.into()).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Every (priority, message) pair appears atomically and in full in the
    // observed call sequence.
    let events = log.take();
    assert_eq!(events.len(), THREADS * WRITES_PER_THREAD);
    for t in 0..THREADS {
        for i in 0..WRITES_PER_THREAD {
            let expected = Event::Emit {
                priority: Priority::Err,
                message: format!("thread {} write {}", t, i),
            };
            assert_eq!(
                events.iter().filter(|e| **e == expected).count(),
                1,
                "missing or duplicated: {:?}",
                expected
            );
        }
    }
}

#[test]
fn config_builds_a_fully_wired_appender() {
    let config: SyslogConfig = serdeconv::from_toml_str(
        r#"
name = "accounting"
ident = "acct"
logopt = ["pid", "perror"]
facility = "local3"
layout = "basic"

[map]
debug = "LOG_ERR"
fatal = "emerg"
"#,
    )
    .unwrap();

    let builder = config.try_to_builder().unwrap();
    let (appender, log) = mock_appender(&builder);

    assert_eq!(
        log.take(),
        vec![Event::Open {
            ident: "acct".to_string(),
            options: LogOption::PID | LogOption::PERROR,
            facility: Facility::Local3,
        }]
    );

    // The basic layout discards key-value pairs.
    let record = Record::new(Severity::Fatal, "power lost").with_kv("rack", "r12");
    appender.write(&record.into()).unwrap();
    assert_eq!(
        log.take(),
        vec![Event::Emit {
            priority: Priority::Emerg,
            message: "power lost".to_string(),
        }]
    );
}

#[test]
fn config_accepts_numeric_logopt_and_facility() {
    let config: SyslogConfig = serdeconv::from_toml_str(
        r#"
logopt = 33
facility = 24
"#,
    )
    .unwrap();

    assert_eq!(
        config.logopt,
        Some(LogOption::PID | LogOption::PERROR)
    );
    assert_eq!(config.facility, Facility::Daemon);
}

#[test]
fn config_defaults_are_sensible() {
    let config: SyslogConfig = serdeconv::from_toml_str("").unwrap();

    assert_eq!(config.name, "syslog");
    assert_eq!(config.ident, None);
    assert_eq!(config.logopt, None);
    assert_eq!(config.facility, Facility::User);
    assert_eq!(config.map, None);
}

#[test]
fn drain_forwards_slog_records() {
    let (appender, log) = mock_appender(&SyslogAppender::builder("app"));
    log.take();
    let drain = AppenderDrain::new(appender);

    drain
        .log(
            &record!(
                slog::Level::Error,
                "",
                &format_args!("request failed"),
                b!("status" => "502")
            ),
            &o!("peer" => "10.0.0.7").into(),
        )
        .unwrap();

    assert_eq!(
        log.take(),
        vec![Event::Emit {
            priority: Priority::Err,
            message: "request failed [peer=\"10.0.0.7\" status=\"502\"]".to_string(),
        }]
    );
}
