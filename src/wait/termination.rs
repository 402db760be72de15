// src/wait/termination.rs

//! Per-call subscription to process termination requests.
//!
//! **Unix:** `SIGINT` and `SIGTERM`.
//! **Other platforms:** Ctrl-C via [`tokio::signal::ctrl_c`].
//!
//! A [`TerminationListener`] is meant to live for exactly one wait call.
//! Dropping it removes its subscriptions; on unix the signals then get their
//! default action again.

use std::fmt;

/// Which termination request was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl TerminationSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(unix)]
pub use unix_impl::TerminationListener;

#[cfg(not(unix))]
pub use ctrl_c_impl::TerminationListener;

#[cfg(unix)]
mod unix_impl {
    use std::ffi::c_int;
    use std::os::unix::net::UnixStream as StdUnixStream;
    use std::sync::Once;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use signal_hook::SigId;
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::low_level;
    use tokio::io::AsyncReadExt;
    use tokio::net::UnixStream;
    use tracing::{debug, warn};

    use super::TerminationSignal;

    /// Number of listeners currently alive in the process.
    static ACTIVE: AtomicUsize = AtomicUsize::new(0);
    static FALLBACK: Once = Once::new();

    /// Scoped listener for `SIGINT` / `SIGTERM`.
    ///
    /// Each listener registers its own signal actions and unregisters them on
    /// drop. While no listener is alive, both signals get their default
    /// action, so the process terminates as if nothing had been installed.
    ///
    /// A signal whose registration failed is treated as never arriving.
    #[derive(Debug)]
    pub struct TerminationListener {
        interrupt: Option<Subscription>,
        terminate: Option<Subscription>,
    }

    /// One registered signal action writing into a socket pair.
    #[derive(Debug)]
    struct Subscription {
        id: SigId,
        rx: UnixStream,
    }

    impl TerminationListener {
        /// Subscribe to termination requests. Must be called inside a Tokio
        /// runtime.
        pub fn install() -> Self {
            install_default_fallback();
            ACTIVE.fetch_add(1, Ordering::SeqCst);

            Self {
                interrupt: subscribe(SIGINT, TerminationSignal::Interrupt),
                terminate: subscribe(SIGTERM, TerminationSignal::Terminate),
            }
        }

        /// Wait for the next termination request.
        pub async fn recv(&mut self) -> TerminationSignal {
            tokio::select! {
                () = next(&mut self.interrupt) => TerminationSignal::Interrupt,
                () = next(&mut self.terminate) => TerminationSignal::Terminate,
            }
        }
    }

    impl Drop for TerminationListener {
        fn drop(&mut self) {
            self.interrupt.take();
            self.terminate.take();
            ACTIVE.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl Drop for Subscription {
        fn drop(&mut self) {
            low_level::unregister(self.id);
        }
    }

    #[cfg(test)]
    pub(super) fn active_listeners() -> usize {
        ACTIVE.load(Ordering::SeqCst)
    }

    /// Once per process: run the default action of `SIGINT` / `SIGTERM`
    /// whenever no listener is alive.
    ///
    /// The signal-hook registry keeps its OS-level handler installed after
    /// the last action is removed, and that handler swallows the signal.
    fn install_default_fallback() {
        FALLBACK.call_once(|| {
            for (sig, which) in [
                (SIGINT, TerminationSignal::Interrupt),
                (SIGTERM, TerminationSignal::Terminate),
            ] {
                // SAFETY: the action only loads an atomic and calls
                // `emulate_default_handler`, both async-signal-safe.
                let res = unsafe {
                    low_level::register(sig, move || {
                        if ACTIVE.load(Ordering::SeqCst) == 0 {
                            let _ = low_level::emulate_default_handler(sig);
                        }
                    })
                };
                if let Err(e) = res {
                    warn!(
                        signal = %which,
                        error = %e,
                        "failed to install default signal fallback"
                    );
                }
            }
        });
    }

    fn subscribe(sig: c_int, which: TerminationSignal) -> Option<Subscription> {
        match try_subscribe(sig) {
            Ok(sub) => {
                debug!(signal = %which, "listening for termination signal");
                Some(sub)
            }
            Err(e) => {
                warn!(signal = %which, error = %e, "failed to listen for termination signal");
                None
            }
        }
    }

    fn try_subscribe(sig: c_int) -> std::io::Result<Subscription> {
        let (rx, tx) = StdUnixStream::pair()?;
        rx.set_nonblocking(true)?;
        let rx = UnixStream::from_std(rx)?;
        let id = low_level::pipe::register(sig, tx)?;
        Ok(Subscription { id, rx })
    }

    async fn next(sub: &mut Option<Subscription>) {
        let Some(sub) = sub else {
            return std::future::pending().await;
        };

        let mut buf = [0u8; 16];
        match sub.rx.read(&mut buf).await {
            Ok(n) if n > 0 => {}
            Ok(_) => std::future::pending().await,
            Err(e) => {
                warn!(error = %e, "termination signal pipe failed");
                std::future::pending().await
            }
        }
    }
}

#[cfg(not(unix))]
mod ctrl_c_impl {
    use tracing::warn;

    use super::TerminationSignal;

    /// Scoped listener for Ctrl-C.
    #[derive(Debug, Default)]
    pub struct TerminationListener {
        _private: (),
    }

    impl TerminationListener {
        pub fn install() -> Self {
            Self::default()
        }

        pub async fn recv(&mut self) -> TerminationSignal {
            match tokio::signal::ctrl_c().await {
                Ok(()) => TerminationSignal::Interrupt,
                Err(e) => {
                    warn!(error = %e, "failed to listen for Ctrl+C");
                    std::future::pending().await
                }
            }
        }
    }
}
