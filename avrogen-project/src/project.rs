use std::{path::PathBuf, rc::Rc};

use avrogen_core::{ensure_dir, qualified_name, to_pascal_case};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::{
    Error, IdeModule, Layout, Plugin, PluginRegistry, Provider, Result, SourceGrouping,
    compiler::{GenerationRequest, SchemaCompiler},
    ide::IdeIntegration,
    registry::{RoleKey, StepRegistry},
    step::{Step, StepHandle, StepRole},
};

type GroupingCallback = Rc<dyn Fn(&mut Project, &str) -> Result<()>>;
type StepCallback = Box<dyn FnOnce(&mut Project, StepHandle) -> Result<()>>;

/// A project being configured.
///
/// Configuration is single-threaded: plugins and listeners receive
/// `&mut Project` one after another, and lazy values are resolved later
/// against `&Project`.
pub struct Project {
    name: String,
    language: String,
    layout: Layout,
    classpath: Vec<PathBuf>,
    groupings: IndexMap<String, SourceGrouping>,
    grouping_listeners: Vec<GroupingCallback>,
    steps: StepRegistry,
    step_listeners: Vec<(RoleKey, StepCallback)>,
    plugins: PluginRegistry,
    ide: Option<IdeIntegration>,
}

impl Project {
    /// Create a project whose primary compiler is `language`.
    pub fn new(name: impl Into<String>, layout: Layout, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            layout,
            classpath: Vec::new(),
            groupings: IndexMap::new(),
            grouping_listeners: Vec::new(),
            steps: StepRegistry::new(),
            step_listeners: Vec::new(),
            plugins: PluginRegistry::new(),
            ide: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language of the primary compiler.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Resolved runtime classpath.
    ///
    /// [`Project::classpath_provider`] reads it lazily.
    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    pub fn set_classpath(&mut self, classpath: Vec<PathBuf>) {
        self.classpath = classpath;
    }

    /// A provider reading the project classpath at resolve time.
    pub fn classpath_provider() -> Provider<Vec<PathBuf>> {
        Provider::new(|project: &Project| project.classpath().to_vec())
    }

    // Groupings

    /// Add a grouping together with its primary compile step
    /// `compile<Grouping><Language>`.
    ///
    /// Runs every [`Project::configure_each_grouping`] callback for it.
    pub fn add_grouping(&mut self, name: &str) -> Result<()> {
        if self.groupings.contains_key(name) {
            return Err(Box::new(Error::DuplicateGrouping {
                name: name.to_string(),
            }));
        }

        let compile = qualified_name("compile", name, &self.language);
        self.groupings
            .insert(name.to_string(), SourceGrouping::new(name, &compile));

        let step = Step::new(&compile, name, StepRole::PrimaryCompile)
            .with_description(format!(
                "Compiles {} {} source.",
                name,
                to_pascal_case(&self.language)
            ))
            .with_group("build");
        if let Err(err) = self.register_step(step) {
            self.groupings.shift_remove(name);
            return Err(err);
        }
        debug!(grouping = name, compile_step = %compile, "added grouping");

        let listeners = self.grouping_listeners.clone();
        for listener in listeners {
            listener(self, name)?;
        }
        Ok(())
    }

    /// Run `callback` for every grouping, present and future.
    pub fn configure_each_grouping(
        &mut self,
        callback: impl Fn(&mut Project, &str) -> Result<()> + 'static,
    ) -> Result<()> {
        let callback: GroupingCallback = Rc::new(callback);
        self.grouping_listeners.push(Rc::clone(&callback));

        let existing: Vec<String> = self.groupings.keys().cloned().collect();
        for name in existing {
            callback(self, &name)?;
        }
        Ok(())
    }

    pub fn grouping(&self, name: &str) -> Result<&SourceGrouping> {
        self.groupings.get(name).ok_or_else(|| {
            Box::new(Error::UnknownGrouping {
                name: name.to_string(),
            })
        })
    }

    pub fn grouping_mut(&mut self, name: &str) -> Result<&mut SourceGrouping> {
        self.groupings.get_mut(name).ok_or_else(|| {
            Box::new(Error::UnknownGrouping {
                name: name.to_string(),
            })
        })
    }

    pub fn has_grouping(&self, name: &str) -> bool {
        self.groupings.contains_key(name)
    }

    /// Groupings in the order they were added.
    pub fn groupings(&self) -> impl Iterator<Item = &SourceGrouping> {
        self.groupings.values()
    }

    // Steps

    /// Register a step and run the [`Project::when_step`] listeners waiting
    /// for its grouping and role.
    ///
    /// # Errors
    ///
    /// Fails when the step's grouping does not exist, or when the name or
    /// the (grouping, role) pair is taken.
    pub fn register_step(&mut self, step: Step) -> Result<StepHandle> {
        if !self.groupings.contains_key(step.grouping()) {
            return Err(Box::new(Error::UnknownGrouping {
                name: step.grouping().to_string(),
            }));
        }

        let key = RoleKey::new(step.grouping(), step.role().clone());
        let handle = self.steps.insert(step)?;
        debug!(
            step = handle.name(),
            grouping = %key.grouping,
            role = %key.role,
            "registered step"
        );

        let (ready, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.step_listeners)
            .into_iter()
            .partition(|(listening, _)| *listening == key);
        self.step_listeners = pending;
        for (_, callback) in ready {
            callback(self, handle.clone())?;
        }

        Ok(handle)
    }

    /// Run `callback` once the step playing `role` in `grouping` exists.
    ///
    /// Fires immediately when it is already registered and never when it
    /// never is.
    pub fn when_step(
        &mut self,
        grouping: &str,
        role: StepRole,
        callback: impl FnOnce(&mut Project, StepHandle) -> Result<()> + 'static,
    ) -> Result<()> {
        match self.steps.by_role(grouping, &role) {
            Some(handle) => callback(self, handle),
            None => {
                self.step_listeners
                    .push((RoleKey::new(grouping, role), Box::new(callback)));
                Ok(())
            }
        }
    }

    pub fn step(&self, name: &str) -> Result<&Step> {
        self.steps.get(name).ok_or_else(|| {
            Box::new(Error::UnknownStep {
                name: name.to_string(),
            })
        })
    }

    pub fn step_mut(&mut self, name: &str) -> Result<&mut Step> {
        self.steps.get_mut(name).ok_or_else(|| {
            Box::new(Error::UnknownStep {
                name: name.to_string(),
            })
        })
    }

    pub fn steps(&self) -> &StepRegistry {
        &self.steps
    }

    // Plugins

    /// Apply a plugin unless one with the same id already was.
    pub fn apply(&mut self, plugin: &dyn Plugin) -> Result<()> {
        let id = plugin.id().to_string();
        if self.plugins.is_applied(&id) {
            debug!(plugin = %id, "plugin already applied");
            return Ok(());
        }

        plugin.apply(self)?;

        let ready = self.plugins.mark_applied(&id);
        debug!(plugin = %id, listeners = ready.len(), "applied plugin");
        for callback in ready {
            callback(self)?;
        }
        Ok(())
    }

    /// Run `callback` once the plugin `id` is applied.
    pub fn with_plugin(
        &mut self,
        id: &str,
        callback: impl FnOnce(&mut Project) -> Result<()> + 'static,
    ) -> Result<()> {
        match self.plugins.listen(id, Box::new(callback)) {
            Some(callback) => callback(self),
            None => Ok(()),
        }
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.is_applied(id)
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    // IDE

    /// Attach the IDE integration. A second call keeps the first base module.
    pub fn enable_ide(&mut self, base: IdeModule) {
        if self.ide.is_none() {
            self.ide = Some(IdeIntegration::new(base));
        }
    }

    pub fn ide(&self) -> Option<&IdeIntegration> {
        self.ide.as_ref()
    }

    fn ide_mut(&mut self) -> Result<&mut IdeIntegration> {
        self.ide.as_mut().ok_or_else(|| Box::new(Error::IdeNotEnabled))
    }

    /// Rewrite the IDE module before it is generated.
    pub fn before_ide_generation(
        &mut self,
        hook: impl Fn(&Project, &mut IdeModule) -> Result<()> + 'static,
    ) -> Result<()> {
        self.ide_mut()?.add_hook(Rc::new(hook));
        Ok(())
    }

    /// Run `action` right before the IDE module is finalized.
    pub fn before_ide_finalize(
        &mut self,
        action: impl Fn(&Project) -> Result<()> + 'static,
    ) -> Result<()> {
        self.ide_mut()?.add_action(Rc::new(action));
        Ok(())
    }

    /// Compute the IDE module from the base module and every hook and
    /// action registered so far.
    pub fn sync_ide(&self) -> Result<IdeModule> {
        let ide = self.ide.as_ref().ok_or_else(|| Box::new(Error::IdeNotEnabled))?;
        let module = ide.generate(self)?;
        info!(
            source_dirs = module.source_dirs.len(),
            test_source_dirs = module.test_source_dirs.len(),
            exclude_dirs = module.exclude_dirs.len(),
            "synchronized IDE module"
        );
        Ok(module)
    }

    // Execution

    /// Resolve everything the schema compiler needs to run `name`.
    pub fn generation_request(&self, name: &str) -> Result<GenerationRequest> {
        let step = self.step(name)?;
        let output_dir = step.output_dir.get(self).ok_or_else(|| {
            Box::new(Error::MissingOutput {
                name: name.to_string(),
            })
        })?;

        Ok(GenerationRequest {
            step: name.to_string(),
            role: step.role().clone(),
            inputs: step.input_files(self)?,
            classpath: step.classpath.get(self).unwrap_or_default(),
            output_dir,
            encoding: step.encoding.get(self),
        })
    }

    /// Run a generation step through `compiler`.
    ///
    /// Only this step runs; ordering against its dependencies is up to the
    /// caller.
    pub fn execute_step(&self, name: &str, compiler: &dyn SchemaCompiler) -> Result<Vec<PathBuf>> {
        let request = self.generation_request(name)?;
        ensure_dir(&request.output_dir).map_err(|source| {
            Box::new(Error::OutputDir {
                step: name.to_string(),
                path: request.output_dir.clone(),
                source,
            })
        })?;

        debug!(step = name, inputs = request.inputs.len(), "running schema compiler");
        compiler.compile(&request).map_err(|failure| {
            Box::new(Error::Generation {
                step: name.to_string(),
                failure,
            })
        })
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .field("groupings", &self.groupings.keys().collect::<Vec<_>>())
            .field("steps", &self.steps.len())
            .field("plugins", &self.plugins)
            .field("ide", &self.ide)
            .finish()
    }
}
