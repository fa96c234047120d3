// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] turns a command string into an [`Invocation`] (whitespace
//!   split, or dispatch through the platform shell).
//! - [`backend`] provides the `ProcessBackend` trait and the concrete
//!   `RealProcessBackend` used in production, which tests can replace with a
//!   fake that never spawns anything.
//! - [`outcome`] is what a directive reports back: the process exit, or one
//!   of the two ways it never ran.

pub mod backend;
pub mod command;
pub mod outcome;

pub use backend::{CapturedOutput, ProcessBackend, RealProcessBackend};
pub use command::Invocation;
pub use outcome::ExecOutcome;
