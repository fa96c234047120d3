// src/exec/command.rs

use std::fmt;

use crate::types::OsName;

/// A fully resolved program + argument vector, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build the invocation for `command`.
    ///
    /// Without a shell the command is split on whitespace (no quoting rules);
    /// with one it is handed verbatim to `sh -c` or `cmd /C` depending on
    /// `os`. Returns `None` when the command contains no tokens.
    pub fn new(command: &str, shell: bool, os: OsName) -> Option<Self> {
        if command.trim().is_empty() {
            return None;
        }

        if shell {
            let (program, flag) = match os {
                OsName::Posix => ("sh", "-c"),
                OsName::Nt => ("cmd", "/C"),
            };
            return Some(Self {
                program: program.to_string(),
                args: vec![flag.to_string(), command.to_string()],
            });
        }

        let mut tokens = command.split_whitespace().map(str::to_string);
        let program = tokens.next()?;
        Some(Self {
            program,
            args: tokens.collect(),
        })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
