// src/wait/poll.rs

//! Convenience entry points composed from [`Ticker`] and the wait loop.
//!
//! | Function                    | Ticker deadline | Stop signal        | Checks first? |
//! |-----------------------------|-----------------|--------------------|---------------|
//! | [`poll`]                    | `timeout`       | private            | no            |
//! | [`poll_immediate`]          | `timeout`       | private            | yes           |
//! | [`poll_infinite`]           | none            | private            | no            |
//! | [`poll_immediate_infinite`] | none            | private            | yes           |
//! | [`poll_until`]              | none            | caller's           | no            |
//! | [`poll_until_finish`]       | none            | private + signals  | yes, errors only |
//!
//! A "private" stop signal is owned by the call and fires when the call
//! returns, which shuts the ticker task down.

use std::time::Duration;

use super::condition::Condition;
use super::stop::{StopSignal, stop_channel};
use super::ticker::{TickSource, Ticker};
use super::wait_loop::{WaitOutcome, wait_for, wait_for_finish};

/// Check `condition` every `interval` until it is satisfied, it errors, or
/// `timeout` elapses (`Duration::ZERO` for no timeout).
///
/// Running out of time is **not** an error: it returns
/// `Ok(WaitOutcome::Exhausted)`.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub async fn poll<C: Condition>(
    interval: Duration,
    timeout: Duration,
    condition: C,
) -> Result<WaitOutcome, C::Error> {
    poll_with(&Ticker::new(interval, timeout), condition).await
}

/// [`poll`] driven by an arbitrary tick source.
pub async fn poll_with<S, C>(source: &S, condition: C) -> Result<WaitOutcome, C::Error>
where
    S: TickSource + ?Sized,
    C: Condition,
{
    let (_stop, signal) = stop_channel();
    wait_for(source, condition, signal).await
}

/// Like [`poll`], but checks `condition` once before starting the ticker.
///
/// If that first check is satisfied or errors, no ticker is ever started.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub async fn poll_immediate<C: Condition>(
    interval: Duration,
    timeout: Duration,
    condition: C,
) -> Result<WaitOutcome, C::Error> {
    poll_immediate_with(&Ticker::new(interval, timeout), condition).await
}

/// [`poll_immediate`] driven by an arbitrary tick source.
pub async fn poll_immediate_with<S, C>(
    source: &S,
    mut condition: C,
) -> Result<WaitOutcome, C::Error>
where
    S: TickSource + ?Sized,
    C: Condition,
{
    if condition.check().await? {
        return Ok(WaitOutcome::Satisfied);
    }
    poll_with(source, condition).await
}

/// Check `condition` every `interval` until it is satisfied or errors.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub async fn poll_infinite<C: Condition>(
    interval: Duration,
    condition: C,
) -> Result<WaitOutcome, C::Error> {
    let (_stop, signal) = stop_channel();
    poll_until(interval, condition, signal).await
}

/// [`poll_infinite`] with one check before the ticker starts.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub async fn poll_immediate_infinite<C: Condition>(
    interval: Duration,
    mut condition: C,
) -> Result<WaitOutcome, C::Error> {
    if condition.check().await? {
        return Ok(WaitOutcome::Satisfied);
    }
    poll_infinite(interval, condition).await
}

/// Check `condition` every `interval` until it is satisfied, it errors, or
/// the caller fires `stop`.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub async fn poll_until<C: Condition>(
    interval: Duration,
    condition: C,
    stop: StopSignal,
) -> Result<WaitOutcome, C::Error> {
    wait_for(&Ticker::unbounded(interval), condition, stop).await
}

/// Run `condition` every `interval` until the process is asked to terminate
/// (`SIGINT` / `SIGTERM`) or the condition errors.
///
/// The condition is checked once up front; an error there is returned
/// immediately, but a satisfied result does not skip the loop.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub async fn poll_until_finish<C: Condition>(
    interval: Duration,
    mut condition: C,
) -> Result<WaitOutcome, C::Error> {
    let ticker = Ticker::unbounded(interval);
    condition.check().await?;

    let (_stop, signal) = stop_channel();
    wait_for_finish(&ticker, condition, signal).await
}
