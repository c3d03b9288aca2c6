//! Manifest parsing from files and strings.

use std::{collections::HashSet, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

/// Environment variable overriding `project.build_dir`.
pub const BUILD_DIR_ENV: &str = "AVROGEN_BUILD_DIR";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "avrogen.toml")
    }
}

impl Manifest {
    /// Parse an avrogen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }

    /// Apply overrides read from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|var| std::env::var(var).ok());
    }

    /// Apply overrides using `lookup` to read variables.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(BUILD_DIR_ENV).filter(|d| !d.is_empty()) {
            self.project.build_dir = dir.into();
        }
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);
    let project = &manifest.project;

    if project.name.trim().is_empty() {
        return Err(ctx
            .source_context()
            .validation_error("project name cannot be empty"));
    }

    ctx.validate_name(&project.language, "language")?;

    let groupings_ctx = ctx.push("groupings");
    let mut seen: HashSet<&str> = HashSet::new();
    for name in project.all_groupings() {
        groupings_ctx.validate_name(name, "grouping")?;
        if !seen.insert(name) {
            return Err(groupings_ctx.duplicate(name, "grouping"));
        }
    }

    let toolchains_ctx = ctx.push("toolchains");
    let mut seen: HashSet<&str> = HashSet::new();
    for id in &project.toolchains {
        toolchains_ctx.validate_name(id, "toolchain")?;
        if id == &project.language {
            return Err(toolchains_ctx.duplicate(id, "toolchain"));
        }
        if !seen.insert(id.as_str()) {
            return Err(toolchains_ctx.duplicate(id, "toolchain"));
        }
    }

    let avro_ctx = ctx.push("avro");
    avro_ctx.validate_name(&manifest.avro.secondary_toolchain, "toolchain")?;
    for grouping in manifest.avro.output.keys() {
        if !project.has_grouping(grouping) {
            return Err(avro_ctx.unknown_grouping(grouping));
        }
    }

    Ok(())
}
