// src/exec/backend.rs

//! Pluggable process backend.
//!
//! Directives talk to a `ProcessBackend` instead of `std::process` directly,
//! so tests can record invocations and hand back canned output.

use std::fmt::Debug;
use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use super::command::Invocation;

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Trait abstracting how a single invocation is run to completion.
pub trait ProcessBackend: Send + Sync + Debug {
    /// Spawn `invocation`, block until it exits and capture its output.
    ///
    /// An `Err` means the process could not be created or waited on; a
    /// non-zero exit is an `Ok`.
    fn run(&self, invocation: &Invocation) -> io::Result<CapturedOutput>;
}

/// Real backend used in production: `std::process::Command`, stdin closed,
/// stdout and stderr piped separately.
#[derive(Debug, Clone, Default)]
pub struct RealProcessBackend;

impl ProcessBackend for RealProcessBackend {
    fn run(&self, invocation: &Invocation) -> io::Result<CapturedOutput> {
        debug!(program = %invocation.program, args = ?invocation.args, "spawning process");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CapturedOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
