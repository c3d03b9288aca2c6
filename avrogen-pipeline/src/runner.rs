//! Pipeline orchestrator.

use std::path::PathBuf;

use avrogen_manifest::Manifest;
use avrogen_project::{CompilerPlugin, IdePlugin, Plugin, Project, Result};
use tracing::debug;

use crate::{
    lower::{ide_module, lower},
    plugin::AvroPlugin,
};

/// Turns a manifest into a fully configured project.
///
/// The pipeline lowers the manifest, then applies plugins in a fixed order:
/// the Avro plugin, one [`CompilerPlugin`] per declared toolchain, any
/// extra plugins, and finally the IDE plugin when the manifest has an
/// `[ide]` table. The resulting configuration does not depend on that
/// order.
///
/// # Example
///
/// ```ignore
/// let project = Pipeline::new()
///     .plugin(CompilerPlugin::new("scala"))
///     .run(&manifest, "/work/demo")?;
///
/// for step in project.steps().iter() {
///     println!("{}", step.name());
/// }
/// ```
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline with only the built-in plugins.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Add a plugin applied after the declared toolchains.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a manifest.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error, e.g. two groupings whose
    /// names map to the same step name.
    pub fn run(&self, manifest: &Manifest, project_dir: impl Into<PathBuf>) -> Result<Project> {
        let mut project = lower(manifest, project_dir)?;

        self.apply(&mut project, &AvroPlugin::from_config(&manifest.avro))?;
        for toolchain in &manifest.project.toolchains {
            self.apply(&mut project, &CompilerPlugin::new(toolchain))?;
        }
        for plugin in &self.plugins {
            self.apply(&mut project, plugin.as_ref())?;
        }
        if let Some(config) = &manifest.ide {
            let module = ide_module(project.layout(), config);
            self.apply(&mut project, &IdePlugin::new(module))?;
        }

        debug!(
            project = project.name(),
            steps = project.steps().len(),
            "configured project"
        );
        Ok(project)
    }

    fn apply(&self, project: &mut Project, plugin: &dyn Plugin) -> Result<()> {
        debug!(plugin = plugin.id(), "applying plugin");
        project.apply(plugin)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
