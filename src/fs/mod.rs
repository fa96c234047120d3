// src/fs/mod.rs

//! Filesystem seam used by the makelog and by directives.
//!
//! Every operation opens, writes and closes within the call; nothing keeps a
//! handle across calls.

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or truncate `path` and write `contents`, creating parent
    /// directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Append `contents` to `path`, creating the file if it is missing.
    fn append(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path).with_context(|| format!("creating file {:?}", path))?;
        file.write_all(contents).with_context(|| format!("writing to file {:?}", path))?;
        Ok(())
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {:?} for append", path))?;
        file.write_all(contents).with_context(|| format!("appending to file {:?}", path))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        // std::fs::copy carries permission bits along with the contents.
        fs::copy(from, to).with_context(|| format!("copying {:?} to {:?}", from, to))?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("removing file {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }
}
