// src/wait/condition.rs

//! The predicate a wait loop evaluates on every tick.

use std::future::Future;

/// A re-evaluable "are we there yet?" check.
///
/// `Ok(true)` means satisfied, `Ok(false)` means keep waiting, and `Err(e)`
/// ends the wait with `e`.
///
/// Any `FnMut() -> Result<bool, E>` closure is a condition. Async checks can
/// be adapted with [`from_async_fn`].
pub trait Condition {
    type Error;

    fn check(&mut self) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

impl<F, E> Condition for F
where
    F: FnMut() -> Result<bool, E>,
    E: Send,
{
    type Error = E;

    fn check(&mut self) -> impl Future<Output = Result<bool, E>> + Send {
        std::future::ready(self())
    }
}

/// Condition backed by a closure returning a future.
///
/// Built by [`from_async_fn`].
#[derive(Debug, Clone)]
pub struct AsyncFnCondition<F> {
    f: F,
}

/// Adapt `FnMut() -> impl Future<Output = Result<bool, E>>` into a
/// [`Condition`].
///
/// ```
/// use pollwait::wait::condition::{from_async_fn, Condition};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut ready = from_async_fn(|| async { Ok::<_, std::io::Error>(true) });
/// assert!(ready.check().await.unwrap());
/// # });
/// ```
pub fn from_async_fn<F, Fut, E>(f: F) -> AsyncFnCondition<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>> + Send,
{
    AsyncFnCondition { f }
}

impl<F, Fut, E> Condition for AsyncFnCondition<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>> + Send,
{
    type Error = E;

    fn check(&mut self) -> impl Future<Output = Result<bool, E>> + Send {
        (self.f)()
    }
}
