// src/config/validate.rs

use crate::config::duration::parse_duration;
use crate::config::model::{ConfigFile, PollSettings, RawConfigFile, RawPollSection};
use crate::errors::{PollwaitError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::PollwaitError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let poll = validate_poll_section(&raw.poll)?;
        let command = validate_command(&raw)?;
        Ok(ConfigFile::new_unchecked(poll, command))
    }
}

fn validate_poll_section(raw: &RawPollSection) -> Result<PollSettings> {
    let interval = parse_duration(&raw.interval)?;
    let timeout = match raw.timeout.as_deref() {
        Some(s) => parse_duration(s)?,
        None => std::time::Duration::ZERO,
    };

    let settings = PollSettings {
        mode: raw.mode,
        interval,
        timeout,
    };
    validate_settings(&settings)?;
    Ok(settings)
}

/// Check the invariants of [`PollSettings`].
///
/// Also used after CLI overrides are applied.
pub fn validate_settings(settings: &PollSettings) -> Result<()> {
    if settings.interval.is_zero() {
        return Err(PollwaitError::ConfigError(
            "[poll].interval must be greater than zero".to_string(),
        ));
    }

    if !settings.timeout.is_zero() && !settings.mode.is_bounded() {
        return Err(PollwaitError::ConfigError(format!(
            "[poll].timeout is not supported in mode '{}' (only 'poll' and 'immediate' time out)",
            settings.mode
        )));
    }

    if !settings.timeout.is_zero() && settings.timeout < settings.interval {
        tracing::warn!(
            interval = ?settings.interval,
            timeout = ?settings.timeout,
            "timeout is shorter than the interval; the condition is checked at most once or twice"
        );
    }

    Ok(())
}

fn validate_command(raw: &RawConfigFile) -> Result<Option<String>> {
    match &raw.command {
        None => Ok(None),
        Some(section) if section.cmd.trim().is_empty() => Err(PollwaitError::ConfigError(
            "[command].cmd must not be empty".to_string(),
        )),
        Some(section) => Ok(Some(section.cmd.clone())),
    }
}
