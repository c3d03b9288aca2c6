use std::path::{Path, PathBuf};

use crate::Provider;

/// Directory layout of a project.
#[derive(Debug, Clone)]
pub struct Layout {
    project_dir: PathBuf,
    build_dir: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `project_dir` with the default `build` directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let build_dir = project_dir.join("build");
        Self {
            project_dir,
            build_dir,
        }
    }

    /// Get the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Resolve a path against the project directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn file(&self, path: impl AsRef<Path>) -> PathBuf {
        self.project_dir.join(path)
    }

    /// Get the build output root as currently configured.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Move the build output root; relative paths resolve against the project directory.
    pub fn set_build_dir(&mut self, path: impl AsRef<Path>) {
        self.build_dir = self.file(path);
    }

    /// The build output root, resolved when read.
    pub fn build_directory() -> Provider<PathBuf> {
        Provider::new(|project| project.layout().build_dir().to_path_buf())
    }

    /// A directory below the build output root, resolved when read.
    pub fn dir(name: impl Into<String>) -> Provider<PathBuf> {
        let name = name.into();
        Self::build_directory().map(move |build_dir| build_dir.join(&name))
    }
}
