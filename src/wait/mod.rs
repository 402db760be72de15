// src/wait/mod.rs

//! Condition-polling engine.
//!
//! Two layers:
//! - [`ticker`]: a [`TickSource`] producing coalesced tick notifications
//!   until a deadline or a [`StopSignal`],
//! - [`wait_loop`]: evaluates a [`Condition`] per tick until it is satisfied,
//!   errors, or the ticks run out; optionally racing process termination
//!   requests ([`termination`]).
//!
//! [`poll`] holds the everyday entry points built on top.

pub mod condition;
pub mod poll;
pub mod stop;
pub mod termination;
pub mod ticker;
pub mod wait_loop;

pub use condition::{AsyncFnCondition, Condition, from_async_fn};
pub use poll::{
    poll, poll_immediate, poll_immediate_infinite, poll_immediate_with, poll_infinite,
    poll_until, poll_until_finish, poll_with,
};
pub use stop::{StopHandle, StopSignal, stop_channel};
pub use termination::{TerminationListener, TerminationSignal};
pub use ticker::{TickSource, Ticker, Ticks};
pub use wait_loop::{WaitOutcome, wait_for, wait_for_finish, wait_for_finish_until};
