//! Check operation - manifest and configuration validation.

use avrogen_core::MAIN_GROUPING;
use avrogen_manifest::AvrogenToml;
use avrogen_pipeline::{AVRO_PLUGIN_ID, conventions::definition_dir};
use avrogen_project::{IDE_PLUGIN_ID, Project};

use super::relative;
use crate::reports::CheckReport;

/// Execute the check operation on a configured project.
///
/// Configuration errors are fatal before this runs; the report only
/// carries warnings about setups that are valid but likely unintended.
pub fn check(avrogen_toml: &AvrogenToml, project: &Project) -> CheckReport {
    let manifest = avrogen_toml.manifest();
    let secondary = &manifest.avro.secondary_toolchain;

    let mut warnings = Vec::new();
    if !manifest.project.toolchains.is_empty() && !project.has_plugin(secondary) {
        warnings.push(format!(
            "secondary toolchain '{}' is not applied; generated sources only feed the {} compiler",
            secondary, manifest.project.language
        ));
    }
    let definitions = definition_dir(project.layout(), MAIN_GROUPING);
    if !definitions.is_dir() {
        warnings.push(format!(
            "no Avro definitions found: {} does not exist",
            relative(project.layout().project_dir(), &definitions).display()
        ));
    }

    CheckReport {
        config_path: avrogen_toml.path().to_path_buf(),
        name: project.name().to_string(),
        language: project.language().to_string(),
        groupings: project
            .groupings()
            .map(|g| g.name().to_string())
            .collect(),
        toolchains: project
            .plugins()
            .applied()
            .filter(|id| *id != AVRO_PLUGIN_ID && *id != IDE_PLUGIN_ID)
            .map(String::from)
            .collect(),
        steps: project.steps().len(),
        ide: project.ide().is_some(),
        warnings,
    }
}
