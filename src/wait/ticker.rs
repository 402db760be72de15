// src/wait/ticker.rs

//! Fixed-interval tick producer.
//!
//! A [`Ticker`] spawns one Tokio task per [`TickSource::ticks`] call. The task
//! owns an interval timer and (optionally) a deadline timer and offers a tick
//! into a single-slot mailbox every interval. Offers never block: if the
//! consumer has not taken the previous tick yet, the new one is dropped.
//!
//! The task exits, dropping its sender and thereby closing [`Ticks`], on the
//! first of:
//! - the stop signal firing,
//! - the deadline elapsing,
//! - the consumer dropping its [`Ticks`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::stop::StopSignal;

/// Stream of payload-less tick notifications.
///
/// `recv()` returning `None` means the producer has stopped and no further
/// ticks will arrive.
#[derive(Debug)]
pub struct Ticks {
    rx: mpsc::Receiver<()>,
}

impl Ticks {
    /// Wrap a receiver fed by a custom tick producer.
    pub fn from_receiver(rx: mpsc::Receiver<()>) -> Self {
        Self { rx }
    }

    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}

/// Anything that can start a tick stream bounded by a stop signal.
///
/// Implementations must close the returned stream once `stop` fires.
pub trait TickSource {
    fn ticks(&self, stop: StopSignal) -> Ticks;
}

/// Fixed-interval ticker with an optional deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    timeout: Option<Duration>,
}

impl Ticker {
    /// Ticker that stops after `timeout`; `Duration::ZERO` means never.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        assert!(!interval.is_zero(), "ticker interval must be non-zero");
        Self {
            interval,
            timeout: (!timeout.is_zero()).then_some(timeout),
        }
    }

    /// Ticker without a deadline; only the stop signal ends it.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn unbounded(interval: Duration) -> Self {
        Self::new(interval, Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl TickSource for Ticker {
    fn ticks(&self, stop: StopSignal) -> Ticks {
        let (tx, rx) = mpsc::channel::<()>(1);
        tokio::spawn(run_ticker(self.interval, self.timeout, tx, stop));
        Ticks::from_receiver(rx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    Stopped,
    DeadlineElapsed,
    ConsumerGone,
}

async fn run_ticker(
    period: Duration,
    timeout: Option<Duration>,
    tx: mpsc::Sender<()>,
    mut stop: StopSignal,
) {
    debug!(?period, ?timeout, "ticker started");

    // First tick one full period from now, not immediately.
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let deadline = async move {
        match timeout {
            Some(timeout) => time::sleep(timeout).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let reason = loop {
        tokio::select! {
            biased;

            _ = stop.stopped() => break ExitReason::Stopped,
            _ = &mut deadline => break ExitReason::DeadlineElapsed,
            _ = tx.closed() => break ExitReason::ConsumerGone,
            _ = interval.tick() => match tx.try_send(()) {
                Ok(()) => trace!("tick delivered"),
                Err(TrySendError::Full(())) => trace!("consumer busy; tick dropped"),
                Err(TrySendError::Closed(())) => break ExitReason::ConsumerGone,
            },
        }
    };

    debug!(?reason, "ticker stopped");
}
