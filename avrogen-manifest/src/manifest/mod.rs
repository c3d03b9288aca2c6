//! Manifest types and parsing for avrogen.toml files.

mod file;
mod parse;
mod validate;

use std::{collections::BTreeMap, path::PathBuf};

use avrogen_core::{MAIN_GROUPING, TEST_GROUPING};
pub use file::AvrogenToml;
pub use parse::BUILD_DIR_ENV;
use serde::Deserialize;
pub use validate::ParseContext;

/// Root manifest for avrogen.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Project layout and compiler settings
    pub project: ProjectConfig,

    /// Avro generation settings
    #[serde(default)]
    pub avro: AvroConfig,

    /// Base IDE model; absent when the project has no IDE integration
    pub ide: Option<IdeConfig>,
}

/// The `[project]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Build output root, relative to the project directory
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Language of the primary compiler (names the compile steps)
    #[serde(default = "default_language")]
    pub language: String,

    /// Source encoding of the primary compile steps
    pub encoding: Option<String>,

    /// Resolved dependency classpath handed to the schema compiler
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Groupings in addition to `main` and `test`
    #[serde(default)]
    pub groupings: Vec<String>,

    /// Secondary compiler toolchains applied to the project
    #[serde(default)]
    pub toolchains: Vec<String>,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_language() -> String {
    "java".to_string()
}

impl ProjectConfig {
    /// All grouping names, `main` and `test` first.
    pub fn all_groupings(&self) -> impl Iterator<Item = &str> {
        [MAIN_GROUPING, TEST_GROUPING]
            .into_iter()
            .chain(self.groupings.iter().map(String::as_str))
    }

    /// Check if a grouping is declared (`main` and `test` always are).
    pub fn has_grouping(&self, name: &str) -> bool {
        self.all_groupings().any(|g| g == name)
    }
}

/// The `[avro]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct AvroConfig {
    /// Toolchain whose compile steps also consume generated sources
    #[serde(default = "default_secondary_toolchain")]
    pub secondary_toolchain: String,

    /// Per-grouping output directory overrides
    #[serde(default)]
    pub output: BTreeMap<String, OutputOverride>,
}

fn default_secondary_toolchain() -> String {
    "kotlin".to_string()
}

impl Default for AvroConfig {
    fn default() -> Self {
        Self {
            secondary_toolchain: default_secondary_toolchain(),
            output: BTreeMap::new(),
        }
    }
}

/// Overrides for the convention-derived output directories of a grouping.
///
/// Relative paths resolve against the project directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputOverride {
    pub protocol: Option<PathBuf>,
    pub source: Option<PathBuf>,
}

/// The `[ide]` table: directory sets the IDE model starts from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeConfig {
    #[serde(default)]
    pub source_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub test_source_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub exclude_dirs: Vec<PathBuf>,
}
