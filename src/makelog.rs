// src/makelog.rs

//! The shared, append-only build log.
//!
//! A [`Makelog`] value is the proof that the log-initialization step ran:
//! it can only be obtained from [`Makelog::start`] (which creates the file)
//! or [`Makelog::attach`] (which requires the file to exist already, for
//! build scripts that start the log in one process and run directives in
//! later ones). Directives hold an `Option<Makelog>`; writing to a makelog
//! that was never started cannot be expressed.
//!
//! The file can still disappear between steps, so every append re-checks
//! that it exists and fails without writing if it does not.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{DirectiveError, Result};
use crate::fs::FileSystem;
use crate::paths::norm_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Makelog {
    path: PathBuf,
}

impl Makelog {
    /// Create (or truncate) the makelog at `path` and write its header.
    pub fn start(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Self> {
        let path = checked_path(path.as_ref())?;

        let cwd = std::env::current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        let header = format!("*** Makelog started\n*** Working directory: {cwd}\n");

        fs.write(&path, header.as_bytes())?;
        info!(makelog = %path.display(), "makelog started");

        Ok(Self { path })
    }

    /// Resume a makelog started earlier; the file must exist.
    pub fn attach(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Self> {
        let path = checked_path(path.as_ref())?;
        if !fs.is_file(&path) {
            return Err(DirectiveError::MakelogNotStarted(path));
        }
        debug!(makelog = %path.display(), "attached to makelog");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `contents` to the makelog. Never truncates.
    ///
    /// Contents are raw bytes: tool logs are not always UTF-8.
    pub fn append(&self, fs: &dyn FileSystem, contents: impl AsRef<[u8]>) -> Result<()> {
        let contents = contents.as_ref();
        if !fs.is_file(&self.path) {
            return Err(DirectiveError::MakelogNotStarted(self.path.clone()));
        }
        fs.append(&self.path, contents)?;
        debug!(makelog = %self.path.display(), bytes = contents.len(), "appended to makelog");
        Ok(())
    }

    /// Write the closing footer. Consumes the handle.
    pub fn end(self, fs: &dyn FileSystem) -> Result<()> {
        self.append(fs, "\n*** Makelog ended\n")?;
        info!(makelog = %self.path.display(), "makelog ended");
        Ok(())
    }
}

fn checked_path(path: &Path) -> Result<PathBuf> {
    let path = norm_path(path);
    if path.as_os_str().is_empty() {
        return Err(DirectiveError::ConfigError(
            "makelog path must not be empty".to_string(),
        ));
    }
    Ok(path)
}
