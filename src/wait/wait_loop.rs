// src/wait/wait_loop.rs

//! The core evaluation loop.
//!
//! [`wait_for`] drives a [`Condition`] off a [`TickSource`]:
//! - on each tick the condition is evaluated; an error or a satisfied result
//!   ends the wait,
//! - when the tick stream closes the condition gets one last evaluation, and
//!   an unsatisfied result ends the wait as [`WaitOutcome::Exhausted`].
//!
//! [`wait_for_finish_until`] is the "run until told to finish" flavour: it
//! also races a shutdown future, and treats a satisfied condition as one more
//! completed round of work rather than as the end of the wait.
//!
//! Evaluations always happen on the caller's task, one at a time.

use std::future::Future;

use tracing::{debug, info, trace};

use super::condition::Condition;
use super::stop::StopSignal;
use super::termination::TerminationListener;
use super::ticker::TickSource;

/// How a wait ended without a condition error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition reported satisfied.
    Satisfied,
    /// The tick stream closed (deadline or stop signal) before the condition
    /// was satisfied. Not an error, but not a success either.
    Exhausted,
    /// A termination request ended a finish-variant wait early.
    Terminated,
}

impl WaitOutcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, WaitOutcome::Satisfied)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, WaitOutcome::Exhausted)
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, WaitOutcome::Terminated)
    }
}

/// Evaluate `condition` on every tick from `source` until it is satisfied,
/// errors, or the tick stream closes.
///
/// The stream is started with `stop`; firing it closes the stream.
pub async fn wait_for<S, C>(
    source: &S,
    mut condition: C,
    stop: StopSignal,
) -> Result<WaitOutcome, C::Error>
where
    S: TickSource + ?Sized,
    C: Condition,
{
    let mut ticks = source.ticks(stop);
    let mut evaluations: u64 = 0;

    loop {
        let open = ticks.recv().await.is_some();

        evaluations += 1;
        let satisfied = match condition.check().await {
            Ok(satisfied) => satisfied,
            Err(e) => {
                debug!(evaluations, "condition returned an error; stopping");
                return Err(e);
            }
        };

        if satisfied {
            debug!(evaluations, "condition satisfied");
            return Ok(WaitOutcome::Satisfied);
        }

        if !open {
            debug!(evaluations, "tick stream closed before condition was satisfied");
            return Ok(WaitOutcome::Exhausted);
        }

        trace!(evaluations, "condition not yet satisfied");
    }
}

/// Like [`wait_for`], but also stops early when the process receives a
/// termination request (`SIGINT` / `SIGTERM`).
///
/// The signal subscription exists only for the duration of this call.
pub async fn wait_for_finish<S, C>(
    source: &S,
    condition: C,
    stop: StopSignal,
) -> Result<WaitOutcome, C::Error>
where
    S: TickSource + ?Sized,
    C: Condition,
{
    let mut listener = TerminationListener::install();

    let shutdown = async {
        let signal = listener.recv().await;
        info!(signal = %signal, "caught termination signal");
    };

    wait_for_finish_until(source, condition, stop, shutdown).await
}

/// Evaluate `condition` on every tick until `shutdown` resolves, the
/// condition errors, or the tick stream closes.
///
/// `shutdown` takes priority over a pending tick and ends the wait as
/// [`WaitOutcome::Terminated`] without evaluating the condition again. A
/// satisfied condition does **not** end the wait.
pub async fn wait_for_finish_until<S, C, F>(
    source: &S,
    mut condition: C,
    stop: StopSignal,
    shutdown: F,
) -> Result<WaitOutcome, C::Error>
where
    S: TickSource + ?Sized,
    C: Condition,
    F: Future<Output = ()>,
{
    let mut ticks = source.ticks(stop);
    tokio::pin!(shutdown);
    let mut evaluations: u64 = 0;

    loop {
        let open = tokio::select! {
            biased;

            () = &mut shutdown => {
                info!(evaluations, "termination requested; finishing early");
                return Ok(WaitOutcome::Terminated);
            }
            tick = ticks.recv() => tick.is_some(),
        };

        evaluations += 1;
        match condition.check().await {
            Ok(true) => trace!(evaluations, "round complete"),
            Ok(false) => trace!(evaluations, "round reported not satisfied"),
            Err(e) => {
                debug!(evaluations, "condition returned an error; stopping");
                return Err(e);
            }
        }

        if !open {
            debug!(evaluations, "tick stream closed; finishing");
            return Ok(WaitOutcome::Exhausted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_predicates() {
        assert!(WaitOutcome::Satisfied.is_satisfied());
        assert!(WaitOutcome::Exhausted.is_exhausted());
        assert!(WaitOutcome::Terminated.is_terminated());
        assert!(!WaitOutcome::Exhausted.is_satisfied());
    }
}
