use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Which polling entry point the binary drives.
///
/// - `Poll`: tick until satisfied or the timeout elapses.
/// - `Immediate`: like `Poll`, but check once before the first tick.
/// - `Infinite`: tick until satisfied; no timeout.
/// - `ImmediateInfinite`: `Infinite` with an up-front check.
/// - `UntilFinish`: run the command every tick until SIGINT/SIGTERM, ignoring
///   whether it succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PollMode {
    Poll,
    Immediate,
    Infinite,
    ImmediateInfinite,
    UntilFinish,
}

impl PollMode {
    /// Whether this mode honours a timeout.
    pub fn is_bounded(&self) -> bool {
        matches!(self, PollMode::Poll | PollMode::Immediate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PollMode::Poll => "poll",
            PollMode::Immediate => "immediate",
            PollMode::Infinite => "infinite",
            PollMode::ImmediateInfinite => "immediate-infinite",
            PollMode::UntilFinish => "until-finish",
        }
    }
}

impl Default for PollMode {
    fn default() -> Self {
        PollMode::Poll
    }
}

impl fmt::Display for PollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PollMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poll" => Ok(PollMode::Poll),
            "immediate" => Ok(PollMode::Immediate),
            "infinite" => Ok(PollMode::Infinite),
            "immediate-infinite" => Ok(PollMode::ImmediateInfinite),
            "until-finish" => Ok(PollMode::UntilFinish),
            other => Err(format!(
                "invalid poll mode: {other} (expected \"poll\", \"immediate\", \"infinite\", \"immediate-infinite\" or \"until-finish\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_its_name() {
        for mode in [
            PollMode::Poll,
            PollMode::Immediate,
            PollMode::Infinite,
            PollMode::ImmediateInfinite,
            PollMode::UntilFinish,
        ] {
            assert_eq!(mode.as_str().parse::<PollMode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "sometimes".parse::<PollMode>().unwrap_err();
        assert!(err.contains("invalid poll mode"));
    }

    #[test]
    fn only_finite_modes_are_bounded() {
        assert!(PollMode::Poll.is_bounded());
        assert!(PollMode::Immediate.is_bounded());
        assert!(!PollMode::Infinite.is_bounded());
        assert!(!PollMode::UntilFinish.is_bounded());
    }
}
