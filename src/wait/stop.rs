// src/wait/stop.rs

//! Caller-owned cancellation for tick sources.
//!
//! A [`StopHandle`] owns the signal; any number of [`StopSignal`] receivers
//! observe it. The signal fires when `stop()` is called **or** when the
//! handle is dropped, so a handle bound to a local variable acts as a scoped
//! "close on return" guard.

use tokio::sync::watch;

/// Create a new, not-yet-fired stop signal.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, StopSignal { rx })
}

/// Owning side of a stop signal.
#[derive(Debug)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    /// Fire the signal. Idempotent.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }

    /// Another receiver for this handle.
    pub fn signal(&self) -> StopSignal {
        StopSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read-only side of a stop signal.
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    /// True once the handle has fired or been dropped.
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once the handle fires or is dropped.
    ///
    /// Cancel safe: dropping the future before it resolves loses nothing.
    pub async fn stopped(&mut self) {
        // An Err means the handle is gone, which counts as stopped.
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}
