#![cfg(unix)]

use std::time::Duration;

use pollwait::exec::ShellCommand;
use pollwait::{Condition, WaitOutcome, poll, poll_immediate};
use pollwait_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn exit_status_maps_to_satisfied() {
    init_tracing();

    let mut ok = ShellCommand::new("exit 0");
    let mut not_yet = ShellCommand::new("echo waiting >&2; exit 3");

    assert!(ok.check().await.unwrap());
    assert!(!not_yet.check().await.unwrap());
    assert_eq!(ok.runs(), 1);
    assert_eq!(not_yet.cmd(), "echo waiting >&2; exit 3");
}

#[tokio::test]
async fn immediate_poll_on_a_passing_command() {
    init_tracing();

    let outcome = with_timeout(poll_immediate(
        Duration::from_secs(3600),
        Duration::ZERO,
        ShellCommand::new("true"),
    ))
    .await;

    assert!(matches!(outcome, Ok(WaitOutcome::Satisfied)));
}

#[tokio::test]
async fn failing_command_exhausts_at_the_timeout() {
    init_tracing();

    let outcome = with_timeout(poll(
        Duration::from_millis(20),
        Duration::from_millis(100),
        ShellCommand::new("false"),
    ))
    .await;

    assert!(matches!(outcome, Ok(WaitOutcome::Exhausted)));
}

#[tokio::test]
async fn command_becomes_ready_when_a_file_appears() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ready");
    let cmd = format!("test -f '{}'", marker.display());

    let waiter = tokio::spawn(poll(
        Duration::from_millis(20),
        Duration::from_secs(4),
        ShellCommand::new(cmd),
    ));

    tokio::time::sleep(Duration::from_millis(80)).await;
    std::fs::write(&marker, b"").unwrap();

    let outcome = with_timeout(waiter).await.expect("wait task panicked");
    assert!(matches!(outcome, Ok(WaitOutcome::Satisfied)));
}
