// src/exec/mod.rs

//! Process-backed conditions.
//!
//! - [`command`] provides [`ShellCommand`], which treats a zero exit status
//!   as "satisfied".

pub mod command;

pub use command::ShellCommand;
