use std::collections::BTreeMap;

use avrogen_core::{MAIN_GROUPING, TEST_GROUPING};
use avrogen_manifest::{AvroConfig, OutputOverride};
use avrogen_project::{IDE_PLUGIN_ID, Plugin, Project, Result};

use crate::{configure::configure, ide, wiring::wire};

/// Plugin id of the Avro pipeline.
pub const AVRO_PLUGIN_ID: &str = "avro";

/// Toolchain whose compile steps also consume generated sources by default.
pub const DEFAULT_SECONDARY_TOOLCHAIN: &str = "kotlin";

/// Adds Avro protocol and source generation to every grouping of a project.
///
/// Applying it makes sure the `main` and `test` groupings exist, then
/// configures and wires each grouping, present or future. When the IDE
/// plugin is (or later gets) applied, it also reconciles the IDE model.
#[derive(Debug, Clone)]
pub struct AvroPlugin {
    secondary_toolchain: String,
    overrides: BTreeMap<String, OutputOverride>,
}

impl AvroPlugin {
    pub fn new() -> Self {
        Self {
            secondary_toolchain: DEFAULT_SECONDARY_TOOLCHAIN.to_string(),
            overrides: BTreeMap::new(),
        }
    }

    /// Build the plugin from the `[avro]` table.
    pub fn from_config(config: &AvroConfig) -> Self {
        Self {
            secondary_toolchain: config.secondary_toolchain.clone(),
            overrides: config.output.clone(),
        }
    }

    pub fn with_secondary_toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.secondary_toolchain = toolchain.into();
        self
    }

    /// Override the output directories of one grouping.
    pub fn with_output(mut self, grouping: impl Into<String>, output: OutputOverride) -> Self {
        self.overrides.insert(grouping.into(), output);
        self
    }

    pub fn secondary_toolchain(&self) -> &str {
        &self.secondary_toolchain
    }
}

impl Default for AvroPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for AvroPlugin {
    fn id(&self) -> &str {
        AVRO_PLUGIN_ID
    }

    fn apply(&self, project: &mut Project) -> Result<()> {
        for grouping in [MAIN_GROUPING, TEST_GROUPING] {
            if !project.has_grouping(grouping) {
                project.add_grouping(grouping)?;
            }
        }

        let toolchain = self.secondary_toolchain.clone();
        let overrides = self.overrides.clone();
        project.configure_each_grouping(move |project, grouping| {
            let source = configure(project, grouping, overrides.get(grouping))?;
            wire(project, grouping, &source, &toolchain)
        })?;

        project.with_plugin(IDE_PLUGIN_ID, |project| {
            project.before_ide_generation(ide::reconcile)?;
            project.before_ide_finalize(ide::ensure_output_dirs)
        })
    }
}
