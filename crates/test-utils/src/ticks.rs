use pollwait::wait::Ticks;
use pollwait::{StopSignal, TickSource};
use tokio::sync::mpsc;

/// Delivers exactly `n` ticks, waiting for the consumer to take each one,
/// then closes. Stops early if the stop signal fires.
///
/// Unlike the real ticker nothing is ever dropped, so evaluation counts are
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct CountedTicks(pub usize);

impl TickSource for CountedTicks {
    fn ticks(&self, mut stop: StopSignal) -> Ticks {
        let (tx, rx) = mpsc::channel(1);
        let n = self.0;
        tokio::spawn(async move {
            for _ in 0..n {
                tokio::select! {
                    biased;
                    _ = stop.stopped() => return,
                    res = tx.send(()) => if res.is_err() { return },
                }
            }
        });
        Ticks::from_receiver(rx)
    }
}

/// A tick source that must never be started.
#[derive(Debug, Clone, Copy)]
pub struct ForbiddenTicks;

impl TickSource for ForbiddenTicks {
    fn ticks(&self, _stop: StopSignal) -> Ticks {
        panic!("tick source was started but the test expected it never to be");
    }
}
