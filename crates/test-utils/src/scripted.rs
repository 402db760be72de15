use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pollwait::Condition;

/// One scripted condition result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    NotYet,
    Ready,
    Fail(&'static str),
}

/// Shared counters a test keeps after handing the condition to the engine.
#[derive(Debug, Default)]
pub struct EvalStats {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl EvalStats {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of evaluations observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// A condition that plays back a fixed list of results, then repeats a
/// fallback forever.
///
/// Every evaluation is recorded in [`EvalStats`]; with [`holding`] each
/// evaluation also sleeps, which makes overlapping evaluations observable.
///
/// [`holding`]: ScriptedCondition::holding
#[derive(Debug)]
pub struct ScriptedCondition {
    script: VecDeque<Step>,
    fallback: Step,
    hold: Option<Duration>,
    stats: Arc<EvalStats>,
}

impl ScriptedCondition {
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: Step::NotYet,
            hold: None,
            stats: Arc::new(EvalStats::default()),
        }
    }

    /// `n` times `NotYet`, then `Ready`.
    pub fn ready_after(n: usize) -> Self {
        Self::new(std::iter::repeat_n(Step::NotYet, n).chain([Step::Ready]))
    }

    /// Never satisfied, never failing.
    pub fn never() -> Self {
        Self::new([])
    }

    pub fn then_always(mut self, step: Step) -> Self {
        self.fallback = step;
        self
    }

    pub fn holding(mut self, hold: Duration) -> Self {
        self.hold = Some(hold);
        self
    }

    pub fn stats(&self) -> Arc<EvalStats> {
        Arc::clone(&self.stats)
    }
}

impl Condition for ScriptedCondition {
    type Error = String;

    fn check(&mut self) -> impl Future<Output = Result<bool, String>> + Send {
        let step = self.script.pop_front().unwrap_or(self.fallback);
        let stats = Arc::clone(&self.stats);
        let hold = self.hold;

        async move {
            let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            stats.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let call = stats.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::trace!(call, ?step, "scripted condition evaluated");

            if let Some(hold) = hold {
                tokio::time::sleep(hold).await;
            }
            stats.in_flight.fetch_sub(1, Ordering::SeqCst);

            match step {
                Step::NotYet => Ok(false),
                Step::Ready => Ok(true),
                Step::Fail(msg) => Err(msg.to_string()),
            }
        }
    }
}
