//! Core operations.
//!
//! This module contains the business logic for avrogen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod idea;
pub mod tasks;

use std::path::{Path, PathBuf};

use avrogen_manifest::AvrogenToml;
use avrogen_pipeline::Pipeline;
use avrogen_project::{Project, Result};
use tracing::debug;

pub use check::check;
pub use idea::idea;
pub use tasks::tasks;

/// Configure the project described by an avrogen.toml.
pub fn configure(avrogen_toml: &AvrogenToml) -> Result<Project> {
    let project_dir = avrogen_toml.project_dir();
    debug!(
        config = %avrogen_toml.path().display(),
        project_dir = %project_dir.display(),
        "configuring project"
    );
    Pipeline::new().run(avrogen_toml.manifest(), project_dir)
}

/// `path` relative to the project directory, or unchanged when outside it.
pub(crate) fn relative(project_dir: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(project_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative() {
        let dir = Path::new("/work/demo");
        assert_eq!(
            relative(dir, Path::new("/work/demo/src/main/avro")),
            PathBuf::from("src/main/avro")
        );
        assert_eq!(
            relative(dir, Path::new("/opt/lib/avro.jar")),
            PathBuf::from("/opt/lib/avro.jar")
        );
        assert_eq!(
            relative(Path::new("."), Path::new("./build/tmp")),
            PathBuf::from("build/tmp")
        );
    }
}
