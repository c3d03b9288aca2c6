use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// An avrogen.toml file and its parsed manifest.
pub struct AvrogenToml {
    path: PathBuf,
    manifest: Manifest,
}

impl AvrogenToml {
    /// Open and parse an avrogen.toml file, applying environment overrides.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let mut manifest = Manifest::from_str_with_filename(&content, &filename)?;
        manifest.apply_env_overrides();

        Ok(Self { path, manifest })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the manifest lives in; relative paths resolve against it.
    pub fn project_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}
