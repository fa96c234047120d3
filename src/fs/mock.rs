// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem for tests.
///
/// Clones share the same underlying map, so a test can keep one handle for
/// assertions while a directive owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("."), MockEntry::Dir);

        Self {
            files: Arc::new(Mutex::new(files)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.lock();
        if let Some(parent) = path.parent() {
            ensure_dir_entry(&mut files, parent);
        }
        files.insert(path, MockEntry::File(content.into()));
    }

    /// Contents of a file as UTF-8, or `None` if absent.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.lock().get(path.as_ref()) {
            Some(MockEntry::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        // A panicking test thread must not hide the map from the others.
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if path.as_os_str().is_empty() || files.contains_key(path) {
        return;
    }
    files.insert(path.to_path_buf(), MockEntry::Dir);
    if let Some(parent) = path.parent() {
        if parent != path {
            ensure_dir_entry(files, parent);
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match self.lock().get(path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut files = self.lock();
        match files.get_mut(path) {
            Some(MockEntry::File(existing)) => {
                existing.extend_from_slice(contents);
                Ok(())
            }
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => {
                files.insert(path.to_path_buf(), MockEntry::File(contents.to_vec()));
                Ok(())
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.lock().get(path), Some(MockEntry::File(_)))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        let content = match self.lock().get(from) {
            Some(MockEntry::File(content)) => content.clone(),
            _ => return Err(anyhow!("File not found: {:?}", from)),
        };
        self.add_file(to, content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let mut files = self.lock();
        match files.get(path) {
            Some(MockEntry::File(_)) => {
                files.remove(path);
                Ok(())
            }
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        ensure_dir_entry(&mut self.lock(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_grows_and_remove_deletes() {
        let fs = MockFileSystem::new();
        let path = Path::new("log/make.log");
        fs.append(path, b"one\n").unwrap();
        fs.append(path, b"two\n").unwrap();
        assert_eq!(fs.contents(path).as_deref(), Some("one\ntwo\n"));

        fs.remove_file(path).unwrap();
        assert!(!fs.exists(path));
        assert!(fs.remove_file(path).is_err());
    }

    #[test]
    fn read_returns_raw_bytes() {
        let fs = MockFileSystem::new();
        fs.add_file("job.log", b"caf\xe9\n".to_vec());
        assert_eq!(fs.read(Path::new("job.log")).unwrap(), b"caf\xe9\n");
        assert!(fs.read(Path::new("missing.log")).is_err());
    }

    #[test]
    fn add_file_registers_parent_directories() {
        let fs = MockFileSystem::new();
        fs.add_file("a/b/c.txt", "x");
        assert!(fs.exists(Path::new("a/b")));
        assert!(!fs.is_file(Path::new("a")));
        assert!(fs.is_file(Path::new("a/b/c.txt")));
    }
}
