//! Scripted queue driver
//!
//! Reads line-oriented commands (`new`, `ih`, `it`, `rh`, `reverse`,
//! `sort`, ...), applies them to a [`StringQueue`](crate::queue::StringQueue)
//! and reports every failed check as an `ERROR:` line. Allocation accounting
//! is audited when the queue is freed.

pub mod command;
pub mod interpreter;

pub use command::{Command, CommandError, DriverOption};
pub use interpreter::{Flow, Interpreter, RunSummary};
