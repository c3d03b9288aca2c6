use std::{
    io,
    path::{Path, PathBuf},
};

/// Result of a directory creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirResult {
    /// Directory was created
    Created,
    /// Directory was already present
    Existing,
}

/// Create a directory and its parents unless it already exists.
pub fn ensure_dir(path: &Path) -> io::Result<DirResult> {
    if path.is_dir() {
        return Ok(DirResult::Existing);
    }
    std::fs::create_dir_all(path)?;
    Ok(DirResult::Created)
}

/// List the immediate child directories of `path`, sorted by name.
///
/// Symlinks are followed, so a link to a directory counts as one.
/// Regular files and dangling links are skipped.
pub fn child_dirs(path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let child = entry?.path();
        if child.is_dir() {
            dirs.push(child);
        }
    }
    dirs.sort();
    Ok(dirs)
}
