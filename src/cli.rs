// src/cli.rs

//! CLI argument parsing using `clap`.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::duration::parse_duration_arg;
use crate::types::PollMode;

/// Command-line arguments for `pollwait`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pollwait",
    version,
    about = "Poll a shell command until it succeeds, times out, or is interrupted.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Pollwait.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Polling mode; overrides `[poll].mode`.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<PollMode>,

    /// Time between checks (e.g. `500ms`, `2s`); overrides `[poll].interval`.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration_arg)]
    pub interval: Option<Duration>,

    /// Give up after this long (`0` for never); overrides `[poll].timeout`.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `POLLWAIT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the settings, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Command to poll; overrides `[command].cmd`. Arguments are joined with
    /// spaces and run through the shell.
    #[arg(last = true, value_name = "CMD")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_command_and_overrides() {
        let args = CliArgs::try_parse_from([
            "pollwait",
            "--mode",
            "immediate-infinite",
            "--interval",
            "250ms",
            "--",
            "test",
            "-f",
            "/tmp/ready",
        ])
        .unwrap();

        assert_eq!(args.mode, Some(PollMode::ImmediateInfinite));
        assert_eq!(args.interval, Some(Duration::from_millis(250)));
        assert_eq!(args.timeout, None);
        assert_eq!(args.command, vec!["test", "-f", "/tmp/ready"]);
    }

    #[test]
    fn bad_duration_is_a_parse_error() {
        assert!(CliArgs::try_parse_from(["pollwait", "--timeout", "soon"]).is_err());
    }
}
