// src/paths.rs

//! Path normalization and program path decomposition.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// - `.` components are dropped and `dir/..` pairs are folded.
/// - Leading `..` on a relative path is kept; a rooted path never climbs
///   above its root.
/// - Backslashes are treated as separators on non-Windows hosts too, so
///   paths copied from Windows build scripts still resolve.
/// - An empty path stays empty (meaning "not set" for log paths).
///
/// The filesystem is never touched; symlinks are not resolved.
pub fn norm_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return PathBuf::new();
    }

    let unified = if cfg!(windows) {
        path.to_path_buf()
    } else {
        PathBuf::from(path.to_string_lossy().replace('\\', "/"))
    };

    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in unified.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last().copied() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => out.push(comp),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// A program path split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramPath {
    /// Normalized full path.
    pub path: PathBuf,
    /// Parent directory; empty for a bare filename.
    pub dir: PathBuf,
    /// `name.ext`.
    pub base: String,
    pub name: String,
    /// Extension including the leading dot, or empty.
    pub ext: String,
}

impl ProgramPath {
    pub fn parse(program: impl AsRef<Path>) -> Self {
        let path = norm_path(program);
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let base = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self {
            path,
            dir,
            base,
            name,
            ext,
        }
    }
}
