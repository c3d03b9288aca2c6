//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Project name.
    pub name: String,
    /// Language of the primary compiler.
    pub language: String,
    /// Grouping names in declaration order.
    pub groupings: Vec<String>,
    /// Applied secondary toolchains.
    pub toolchains: Vec<String>,
    /// Number of registered steps.
    pub steps: usize,
    /// Whether the IDE model is reconciled.
    pub ide: bool,
    /// Configuration that is valid but probably unintended.
    pub warnings: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        out.key_value("project", &format!("{} ({})", self.name, self.language));
        out.key_value("steps", &self.steps.to_string());
        out.key_value("ide", if self.ide { "enabled" } else { "disabled" });

        out.section("groupings");
        for grouping in &self.groupings {
            out.list_item(grouping);
        }

        if !self.toolchains.is_empty() {
            out.section("toolchains");
            for toolchain in &self.toolchains {
                out.list_item(toolchain);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render() {
        let report = CheckReport {
            config_path: PathBuf::from("avrogen.toml"),
            name: "demo".to_string(),
            language: "java".to_string(),
            groupings: vec!["main".to_string(), "test".to_string()],
            toolchains: vec!["kotlin".to_string()],
            steps: 8,
            ide: false,
            warnings: Vec::new(),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        insta::assert_snapshot!(out.text, @r"
        ✓ avrogen.toml is valid

        project: demo (java)
        steps: 8
        ide: disabled
        groupings:
          - main
          - test
        toolchains:
          - kotlin
        ");
    }
}
