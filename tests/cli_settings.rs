use std::io::Write;
use std::time::Duration;

use clap::Parser;
use tempfile::NamedTempFile;

use pollwait::cli::CliArgs;
use pollwait::errors::PollwaitError;
use pollwait::types::PollMode;
use pollwait::{
    EXIT_EXHAUSTED, WaitOutcome, exit_code, poll_until_interrupted, resolve_settings,
};
use pollwait_test_utils::scripted::ScriptedCondition;
use pollwait_test_utils::{init_tracing, with_timeout};
use tokio::sync::oneshot;

fn config_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[poll]
mode = "poll"
interval = "2s"
timeout = "1m"

[command]
cmd = "echo from-config"
"#
    )
    .unwrap();
    file
}

fn args(extra: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("pollwait").chain(extra.iter().copied())).unwrap()
}

#[test]
fn config_values_are_used_without_overrides() {
    let file = config_file();
    let path = file.path().to_str().unwrap();

    let settings = resolve_settings(&args(&["--config", path])).unwrap();

    assert_eq!(settings.poll.mode, PollMode::Poll);
    assert_eq!(settings.poll.interval, Duration::from_secs(2));
    assert_eq!(settings.poll.timeout, Duration::from_secs(60));
    assert_eq!(settings.command, "echo from-config");
}

#[test]
fn cli_overrides_config() {
    let file = config_file();
    let path = file.path().to_str().unwrap();

    let settings = resolve_settings(&args(&[
        "--config",
        path,
        "--mode",
        "immediate",
        "--interval",
        "100ms",
        "--timeout",
        "5s",
        "--",
        "curl",
        "-sf",
        "localhost:8080",
    ]))
    .unwrap();

    assert_eq!(settings.poll.mode, PollMode::Immediate);
    assert_eq!(settings.poll.interval, Duration::from_millis(100));
    assert_eq!(settings.poll.timeout, Duration::from_secs(5));
    assert_eq!(settings.command, "curl -sf localhost:8080");
}

#[test]
fn switching_to_an_infinite_mode_requires_dropping_the_timeout() {
    let file = config_file();
    let path = file.path().to_str().unwrap();

    let res = resolve_settings(&args(&["--config", path, "--mode", "infinite"]));
    assert!(matches!(res, Err(PollwaitError::ConfigError(_))));

    let settings =
        resolve_settings(&args(&["--config", path, "--mode", "infinite", "--timeout", "0"]))
            .unwrap();
    assert_eq!(settings.poll.mode, PollMode::Infinite);
    assert_eq!(settings.poll.timeout, Duration::ZERO);
}

#[test]
fn missing_command_is_a_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[poll]\ninterval = \"1s\"\n").unwrap();
    let path = file.path().to_str().unwrap();

    let res = resolve_settings(&args(&["--config", path]));
    match res {
        Err(PollwaitError::ConfigError(msg)) => assert!(msg.contains("no command")),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn exit_codes() {
    assert_eq!(exit_code(WaitOutcome::Satisfied), 0);
    assert_eq!(exit_code(WaitOutcome::Terminated), 0);
    assert_eq!(exit_code(WaitOutcome::Exhausted), EXIT_EXHAUSTED);
}

#[tokio::test]
async fn interrupt_ends_both_infinite_modes_as_exhausted() {
    init_tracing();

    for check_first in [false, true] {
        let cond = ScriptedCondition::never();
        let stats = cond.stats();
        let (interrupt_tx, interrupt_rx) = oneshot::channel::<()>();
        let interrupt = async move {
            let _ = interrupt_rx.await;
        };

        let waiter = tokio::spawn(poll_until_interrupted(
            Duration::from_millis(10),
            cond,
            check_first,
            interrupt,
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        interrupt_tx.send(()).unwrap();

        let outcome = with_timeout(waiter).await.expect("wait task panicked");
        assert_eq!(outcome, Ok(WaitOutcome::Exhausted), "check_first = {check_first}");
        assert_eq!(exit_code(outcome.unwrap()), EXIT_EXHAUSTED);
        assert!(stats.calls() >= 1);
    }
}

#[tokio::test]
async fn immediate_infinite_mode_returns_without_ticking_when_ready() {
    init_tracing();

    let cond = ScriptedCondition::ready_after(0);
    let stats = cond.stats();

    let outcome = with_timeout(poll_until_interrupted(
        Duration::from_secs(3600),
        cond,
        true,
        std::future::pending(),
    ))
    .await;

    assert_eq!(outcome, Ok(WaitOutcome::Satisfied));
    assert_eq!(stats.calls(), 1);
}
