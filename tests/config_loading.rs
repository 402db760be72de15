use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use pollwait::config::{ConfigFile, load_and_validate};
use pollwait::errors::PollwaitError;
use pollwait::types::PollMode;
use pollwait_test_utils::builders::RawConfigBuilder;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_is_parsed() {
    let file = write_config(
        r#"
[poll]
mode = "immediate"
interval = "250ms"
timeout = "30s"

[command]
cmd = "test -f /tmp/ready"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.poll.mode, PollMode::Immediate);
    assert_eq!(cfg.poll.interval, Duration::from_millis(250));
    assert_eq!(cfg.poll.timeout, Duration::from_secs(30));
    assert_eq!(cfg.command.as_deref(), Some("test -f /tmp/ready"));
}

#[test]
fn empty_file_uses_defaults() {
    let file = write_config("");

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.poll.mode, PollMode::Poll);
    assert_eq!(cfg.poll.interval, Duration::from_secs(1));
    assert_eq!(cfg.poll.timeout, Duration::ZERO);
    assert!(cfg.command.is_none());
}

#[test]
fn zero_interval_returns_config_error() {
    let raw = RawConfigBuilder::new().interval("0ms").build();

    match ConfigFile::try_from(raw) {
        Err(PollwaitError::ConfigError(msg)) => assert!(msg.contains("interval")),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn timeout_in_infinite_mode_returns_config_error() {
    let raw = RawConfigBuilder::new()
        .mode(PollMode::Infinite)
        .timeout("5s")
        .build();

    match ConfigFile::try_from(raw) {
        Err(PollwaitError::ConfigError(msg)) => {
            assert!(msg.contains("timeout"));
            assert!(msg.contains("infinite"));
        }
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn zero_timeout_is_allowed_in_any_mode() {
    let raw = RawConfigBuilder::new()
        .mode(PollMode::UntilFinish)
        .timeout("0")
        .cmd("true")
        .build();

    let cfg = ConfigFile::try_from(raw).unwrap();
    assert_eq!(cfg.poll.timeout, Duration::ZERO);
}

#[test]
fn bad_duration_returns_structured_error() {
    let raw = RawConfigBuilder::new().interval("fast").build();

    match ConfigFile::try_from(raw) {
        Err(PollwaitError::InvalidDuration { input, .. }) => assert_eq!(input, "fast"),
        other => panic!("Expected InvalidDuration, got: {other:?}"),
    }
}

#[test]
fn blank_command_returns_config_error() {
    let raw = RawConfigBuilder::new().cmd("   ").build();

    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(PollwaitError::ConfigError(_))
    ));
}

#[test]
fn unknown_mode_is_a_toml_error() {
    let file = write_config(
        r#"
[poll]
mode = "eventually"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PollwaitError::TomlError(_))
    ));
}

#[test]
fn unknown_poll_key_is_a_toml_error() {
    let file = write_config(
        r#"
[poll]
intervall = "1s"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PollwaitError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate("/definitely/not/here/Pollwait.toml"),
        Err(PollwaitError::IoError(_))
    ));
}
