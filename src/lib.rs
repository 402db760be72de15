// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;
pub mod wait;

pub use wait::{
    Condition, StopHandle, StopSignal, TickSource, Ticker, WaitOutcome, from_async_fn, poll,
    poll_immediate, poll_immediate_infinite, poll_infinite, poll_until, poll_until_finish,
    stop_channel, wait_for, wait_for_finish,
};

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{
    ConfigFile, PollSettings, RawConfigFile, default_config_path, load_and_validate,
    validate_settings,
};
use crate::errors::PollwaitError;
use crate::exec::ShellCommand;
use crate::types::PollMode;

/// Exit status for an exhausted wait (timeout or cancellation without
/// success).
pub const EXIT_EXHAUSTED: i32 = 2;

/// Fully resolved run settings: config file with CLI overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub poll: PollSettings,
    pub command: String,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the shell command condition
/// - the polling entry point selected by the mode
/// - Ctrl-C handling for the `infinite` modes
///
/// Returns `None` for `--dry-run`.
pub async fn run(args: CliArgs) -> Result<Option<WaitOutcome>> {
    let settings = resolve_settings(&args)?;

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(None);
    }

    let PollSettings {
        mode,
        interval,
        timeout,
    } = settings.poll;
    info!(%mode, ?interval, ?timeout, cmd = %settings.command, "polling");

    let condition = ShellCommand::new(settings.command);

    let outcome = match mode {
        PollMode::Poll => poll(interval, timeout, condition).await?,
        PollMode::Immediate => poll_immediate(interval, timeout, condition).await?,
        PollMode::Infinite => poll_until_interrupted(interval, condition, false, ctrl_c()).await?,
        PollMode::ImmediateInfinite => {
            poll_until_interrupted(interval, condition, true, ctrl_c()).await?
        }
        PollMode::UntilFinish => poll_until_finish(interval, condition).await?,
    };

    info!(?outcome, "wait finished");
    Ok(Some(outcome))
}

/// Map a wait outcome to a process exit status.
pub fn exit_code(outcome: WaitOutcome) -> i32 {
    match outcome {
        WaitOutcome::Satisfied | WaitOutcome::Terminated => 0,
        WaitOutcome::Exhausted => EXIT_EXHAUSTED,
    }
}

/// Merge the config file (explicit, default location, or built-in defaults)
/// with CLI overrides and validate the result.
pub fn resolve_settings(args: &CliArgs) -> errors::Result<RunSettings> {
    let cfg = load_config(args.config.as_deref())?;

    let mut poll = cfg.poll;
    if let Some(mode) = args.mode {
        poll.mode = mode;
    }
    if let Some(interval) = args.interval {
        poll.interval = interval;
    }
    if let Some(timeout) = args.timeout {
        poll.timeout = timeout;
    }
    validate_settings(&poll)?;

    let command = if !args.command.is_empty() {
        args.command.join(" ")
    } else if let Some(cmd) = cfg.command {
        cmd
    } else {
        return Err(PollwaitError::ConfigError(
            "no command given (pass one after `--` or set [command].cmd)".to_string(),
        ));
    };

    Ok(RunSettings { poll, command })
}

fn load_config(explicit: Option<&str>) -> errors::Result<ConfigFile> {
    if let Some(path) = explicit {
        debug!(path, "loading config");
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = %default_path.display(), "loading default config");
        return load_and_validate(&default_path);
    }

    ConfigFile::try_from(RawConfigFile::default())
}

/// [`poll_until`] with a stop handle fired when `interrupt` resolves, so an
/// interrupted wait ends as [`WaitOutcome::Exhausted`].
///
/// With `check_first` the condition is evaluated once before the ticker
/// starts, as in [`poll_immediate_infinite`].
pub async fn poll_until_interrupted<C, F>(
    interval: Duration,
    mut condition: C,
    check_first: bool,
    interrupt: F,
) -> std::result::Result<WaitOutcome, C::Error>
where
    C: Condition,
    F: Future<Output = ()> + Send + 'static,
{
    if check_first && condition.check().await? {
        return Ok(WaitOutcome::Satisfied);
    }

    let (stop, signal) = stop_channel();
    let interrupter = tokio::spawn(async move {
        interrupt.await;
        stop.stop();
    });

    let outcome = poll_until(interval, condition, signal).await;
    interrupter.abort();
    outcome
}

/// Resolves on Ctrl-C; never resolves if the listener cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received; stopping");
}

/// Simple dry-run output: print the resolved settings.
fn print_dry_run(settings: &RunSettings) {
    println!("pollwait dry-run");
    println!("  mode     = {}", settings.poll.mode);
    println!("  interval = {:?}", settings.poll.interval);
    if settings.poll.timeout.is_zero() {
        println!("  timeout  = none");
    } else {
        println!("  timeout  = {:?}", settings.poll.timeout);
    }
    println!("  command  = {}", settings.command);

    debug!("dry-run complete (no execution)");
}
