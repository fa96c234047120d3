// src/exec/outcome.rs

/// Result of one `Directive::execute` call.
///
/// `execute` never returns an error; the two ways a command can fail to run
/// at all are variants here, distinct from a process that ran and exited
/// non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The process ran to completion. `code` is `-1` when it was killed by a
    /// signal.
    Exited { code: i32, stderr: String },

    /// The operating system could not create or run the process (missing
    /// executable, permission denied, ...).
    SpawnFailed { diagnostic: String },

    /// The command string had nothing to run.
    InvalidCommand { diagnostic: String },
}

impl ExecOutcome {
    /// Exit code in the `(code, stderr)` convention; both "never ran"
    /// variants report `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecOutcome::Exited { code, .. } => *code,
            ExecOutcome::SpawnFailed { .. } | ExecOutcome::InvalidCommand { .. } => 1,
        }
    }

    /// Captured stderr, or the diagnostic when the process never ran.
    pub fn error_output(&self) -> &str {
        match self {
            ExecOutcome::Exited { stderr, .. } => stderr,
            ExecOutcome::SpawnFailed { diagnostic } | ExecOutcome::InvalidCommand { diagnostic } => {
                diagnostic
            }
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ExecOutcome::Exited { code: 0, .. })
    }

    /// The `(exit code, error output)` pair.
    pub fn into_parts(self) -> (i32, String) {
        let code = self.exit_code();
        match self {
            ExecOutcome::Exited { stderr, .. } => (code, stderr),
            ExecOutcome::SpawnFailed { diagnostic } | ExecOutcome::InvalidCommand { diagnostic } => {
                (code, diagnostic)
            }
        }
    }
}
