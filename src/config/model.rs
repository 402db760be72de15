// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::PollMode;

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [poll]
/// mode = "immediate"
/// interval = "500ms"
/// timeout = "30s"
///
/// [command]
/// cmd = "curl -sf http://localhost:8080/health"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Polling behaviour from `[poll]`.
    #[serde(default)]
    pub poll: RawPollSection,

    /// The condition command from `[command]`.
    #[serde(default)]
    pub command: Option<CommandSection>,
}

/// `[poll]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPollSection {
    /// Which entry point to use; defaults to `"poll"`.
    #[serde(default)]
    pub mode: PollMode,

    /// Time between checks, e.g. `"1s"`.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Give up after this long. Only valid for `poll` / `immediate`.
    ///
    /// Absent or `"0"` means no timeout.
    #[serde(default)]
    pub timeout: Option<String>,
}

fn default_interval() -> String {
    "1s".to_string()
}

impl Default for RawPollSection {
    fn default() -> Self {
        Self {
            mode: PollMode::default(),
            interval: default_interval(),
            timeout: None,
        }
    }
}

/// `[command]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSection {
    /// Shell command whose zero exit status means "satisfied".
    pub cmd: String,
}

/// Validated polling settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub mode: PollMode,
    /// Always non-zero.
    pub interval: Duration,
    /// `Duration::ZERO` means no timeout.
    pub timeout: Duration,
}

/// Validated configuration.
///
/// Only constructible via `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holding one means the invariants on [`PollSettings`] hold.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub poll: PollSettings,
    pub command: Option<String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(poll: PollSettings, command: Option<String>) -> Self {
        Self { poll, command }
    }
}
