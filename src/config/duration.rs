// src/config/duration.rs

use std::time::Duration;

use crate::errors::{PollwaitError, Result};

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
///
/// A bare `"0"` is accepted as zero (used for "no timeout").
pub fn parse_duration(s: &str) -> Result<Duration> {
    let input = s;
    let s = s.trim();
    let invalid = |reason: String| PollwaitError::InvalidDuration {
        input: input.to_string(),
        reason,
    };

    if s.is_empty() {
        return Err(invalid("empty duration string".to_string()));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| invalid("duration missing unit suffix".to_string()))?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| invalid(format!("invalid duration number '{num_part}': {e}")))?;
    let unit = unit_part.trim().to_lowercase();

    let secs = |factor: u64| {
        value
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| invalid("duration overflows".to_string()))
    };

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => secs(1),
        "m" => secs(60),
        "h" => secs(60 * 60),
        _ => Err(invalid(format!(
            "unsupported duration unit '{unit}'; expected ms, s, m, or h"
        ))),
    }
}

/// Clap value parser wrapper around [`parse_duration`].
pub fn parse_duration_arg(s: &str) -> std::result::Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}
