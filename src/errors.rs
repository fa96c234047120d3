// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectiveError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown system: `{0}` (expected \"posix\" or \"nt\")")]
    UnknownSystem(String),

    #[error("Makelog has not been started: {}", .0.display())]
    MakelogNotStarted(PathBuf),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Wrong extension for {}: expected `{expected}`", path.display())]
    WrongExtension { path: PathBuf, expected: String },

    #[error("Unknown application `{application}` in metadata table `{table}`")]
    UnknownApplication { application: String, table: String },

    #[error("Program failed with exit code {code}: `{command}`\n{stderr}")]
    ProgramFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DirectiveError {
    /// Configuration and validation errors abort the build before any
    /// command runs; a failed program run is reported after it was logged.
    pub fn is_critical(&self) -> bool {
        !matches!(self, DirectiveError::ProgramFailed { .. })
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DirectiveError>;
