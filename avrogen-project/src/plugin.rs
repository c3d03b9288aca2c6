//! Plugins extending a project.

use avrogen_core::{qualified_name, to_pascal_case};

use crate::{
    IdeModule, Project, Result,
    ide::IDE_PLUGIN_ID,
    step::{Step, StepRole},
};

/// A plugin that can be applied to a project.
///
/// Applying a plugin runs [`Plugin::apply`] once, then marks its id as
/// present, which runs every listener registered for that id through
/// [`Project::with_plugin`].
///
/// # Example
///
/// ```ignore
/// struct DocsPlugin;
///
/// impl Plugin for DocsPlugin {
///     fn id(&self) -> &str { "docs" }
///
///     fn apply(&self, project: &mut Project) -> Result<()> {
///         project.configure_each_grouping(|project, grouping| {
///             // register a docs step per grouping
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Plugin {
    /// The plugin id other plugins react to.
    fn id(&self) -> &str;

    /// Configure the project.
    ///
    /// # Errors
    ///
    /// Return an error to abort configuration.
    fn apply(&self, project: &mut Project) -> Result<()>;
}

/// A secondary compiler toolchain.
///
/// Registers `compile<Grouping><Language>` in every grouping, including
/// groupings added after the plugin is applied.
#[derive(Debug, Clone)]
pub struct CompilerPlugin {
    id: String,
    language: String,
}

impl CompilerPlugin {
    /// Create a toolchain whose compile steps are named after `id`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            language: id.clone(),
            id,
        }
    }

    /// Name the compile steps after `language` instead of the id.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Plugin for CompilerPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, project: &mut Project) -> Result<()> {
        let id = self.id.clone();
        let language = self.language.clone();
        project.configure_each_grouping(move |project, grouping| {
            let name = qualified_name("compile", grouping, &language);
            let step = Step::new(name, grouping, StepRole::SecondaryCompile(id.clone()))
                .with_description(format!(
                    "Compiles {} {} source.",
                    grouping,
                    to_pascal_case(&language)
                ))
                .with_group("build");
            project.register_step(step)?;
            Ok(())
        })
    }
}

/// The IDE integration.
#[derive(Debug, Clone, Default)]
pub struct IdePlugin {
    module: IdeModule,
}

impl IdePlugin {
    /// Create the plugin with the directory sets the IDE model starts from.
    pub fn new(module: IdeModule) -> Self {
        Self { module }
    }
}

impl Plugin for IdePlugin {
    fn id(&self) -> &str {
        IDE_PLUGIN_ID
    }

    fn apply(&self, project: &mut Project) -> Result<()> {
        project.enable_ide(self.module.clone());
        Ok(())
    }
}
