// src/exec/command.rs

//! Shell command as a wait condition.

use std::future::Future;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{PollwaitError, Result};
use crate::wait::Condition;

/// Runs a shell command on every check.
///
/// - exit status 0: satisfied,
/// - any other exit status (or death by signal): not satisfied yet,
/// - failing to spawn or wait for the process: condition error.
///
/// stdout and stderr are drained and logged at debug level. If the check
/// future is dropped mid-run the child is killed.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    cmd: String,
    runs: u64,
}

impl ShellCommand {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            runs: 0,
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Number of times the command has been started.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    async fn run_once(cmd: String, run: u64) -> Result<bool> {
        debug!(%cmd, run, "starting condition command");

        // Build a shell command appropriate for the platform.
        let mut command = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&cmd);
            c
        };

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| {
            PollwaitError::IoError(std::io::Error::new(
                e.kind(),
                format!("spawning condition command '{cmd}': {e}"),
            ))
        })?;

        if let Some(stdout) = child.stdout.take() {
            drain_lines(stdout, run, "stdout");
        }
        if let Some(stderr) = child.stderr.take() {
            drain_lines(stderr, run, "stderr");
        }

        let status = child.wait().await?;
        let satisfied = status.success();

        if satisfied {
            info!(%cmd, run, "condition command succeeded");
        } else {
            debug!(%cmd, run, exit_code = ?status.code(), "condition command not yet successful");
        }

        Ok(satisfied)
    }
}

impl Condition for ShellCommand {
    type Error = PollwaitError;

    fn check(&mut self) -> impl Future<Output = Result<bool>> + Send {
        self.runs += 1;
        Self::run_once(self.cmd.clone(), self.runs)
    }
}

/// Always consume output so pipe buffers don't fill; log at debug.
fn drain_lines<R>(stream: R, run: u64, label: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(run, "{label}: {line}");
        }
    });
}
