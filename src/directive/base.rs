// src/directive/base.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::directive::Host;
use crate::errors::Result;
use crate::exec::{ExecOutcome, Invocation, ProcessBackend};
use crate::fs::FileSystem;
use crate::makelog::Makelog;
use crate::paths::norm_path;
use crate::types::OsName;

/// Caller-supplied inputs for a [`Directive`].
#[derive(Debug, Clone)]
pub struct DirectiveOptions {
    /// `"posix"` or `"nt"`; anything else fails construction.
    pub os_name: String,
    /// Dispatch through the platform shell instead of splitting on
    /// whitespace.
    pub shell: bool,
    /// Shared build log. `None` disables makelog writing.
    pub makelog: Option<Makelog>,
    /// Per-directive log, overwritten on each `write_log`.
    pub log: Option<PathBuf>,
}

impl Default for DirectiveOptions {
    fn default() -> Self {
        Self {
            os_name: OsName::current().as_str().to_string(),
            shell: false,
            makelog: None,
            log: None,
        }
    }
}

/// Run context for one external command.
#[derive(Debug)]
pub struct Directive {
    os: OsName,
    shell: bool,
    makelog: Option<Makelog>,
    log: Option<PathBuf>,
    last_output: String,
    fs: Arc<dyn FileSystem>,
    backend: Arc<dyn ProcessBackend>,
}

impl Directive {
    pub fn new(options: DirectiveOptions, host: &Host) -> Result<Self> {
        let os = validate_os_name(&options.os_name)?;
        let log = normalize_log(options.log);

        Ok(Self {
            os,
            shell: options.shell,
            makelog: options.makelog,
            log,
            last_output: String::new(),
            fs: Arc::clone(&host.fs),
            backend: Arc::clone(&host.backend),
        })
    }

    /// Run `command` once and capture its output.
    ///
    /// Prints the `Executing: "<command>"` banner to stdout, then blocks until
    /// the process exits. Never fails: a process that cannot be started is
    /// reported as [`ExecOutcome::SpawnFailed`], an empty command as
    /// [`ExecOutcome::InvalidCommand`].
    ///
    /// `last_output` becomes the banner, stdout (if any), then stderr or the
    /// diagnostic (if any), each on its own line.
    pub fn execute(&mut self, command: &str) -> ExecOutcome {
        let banner = format!("Executing: \"{command}\"");
        println!("{banner}");

        let mut output = banner;
        output.push('\n');

        let outcome = match Invocation::new(command, self.shell, self.os) {
            None => ExecOutcome::InvalidCommand {
                diagnostic: format!("ERROR! Empty command, nothing to execute: \"{command}\""),
            },
            Some(invocation) => match self.backend.run(&invocation) {
                Ok(captured) => {
                    push_section(&mut output, &captured.stdout);
                    push_section(&mut output, &captured.stderr);
                    ExecOutcome::Exited {
                        code: captured.code.unwrap_or(-1),
                        stderr: captured.stderr,
                    }
                }
                Err(err) => ExecOutcome::SpawnFailed {
                    diagnostic: format!(
                        "ERROR! The following command cannot be executed by the operating system: \"{command}\"\n{err} ({:?})",
                        err.kind()
                    ),
                },
            },
        };

        match &outcome {
            ExecOutcome::Exited { code, .. } => {
                info!(command, exit_code = code, success = outcome.success(), "command finished");
            }
            ExecOutcome::SpawnFailed { diagnostic } | ExecOutcome::InvalidCommand { diagnostic } => {
                warn!(command, "command did not run");
                push_section(&mut output, diagnostic);
            }
        }

        self.last_output = output;
        outcome
    }

    /// Append the last output to the makelog and overwrite the independent
    /// log with it.
    ///
    /// If the makelog file is gone this fails with
    /// [`MakelogNotStarted`](crate::errors::DirectiveError::MakelogNotStarted)
    /// before anything is written. Failed executions are logged like any
    /// other.
    pub fn write_log(&self) -> Result<()> {
        self.append_to_makelog(self.last_output.as_bytes())?;

        if let Some(log) = &self.log {
            self.fs.write(log, self.last_output.as_bytes())?;
        }
        Ok(())
    }

    pub(crate) fn append_to_makelog(&self, contents: &[u8]) -> Result<()> {
        match &self.makelog {
            Some(makelog) => makelog.append(self.fs.as_ref(), contents),
            None => Ok(()),
        }
    }

    pub fn os(&self) -> OsName {
        self.os
    }

    pub fn shell(&self) -> bool {
        self.shell
    }

    pub fn makelog(&self) -> Option<&Makelog> {
        self.makelog.as_ref()
    }

    pub fn log(&self) -> Option<&Path> {
        self.log.as_deref()
    }

    pub fn last_output(&self) -> &str {
        &self.last_output
    }

    pub(crate) fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }
}

fn validate_os_name(os_name: &str) -> Result<OsName> {
    os_name.parse()
}

fn normalize_log(log: Option<PathBuf>) -> Option<PathBuf> {
    log.filter(|p| !p.as_os_str().is_empty()).map(norm_path)
}

fn push_section(output: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    output.push_str(text);
    if !text.ends_with('\n') {
        output.push('\n');
    }
}
