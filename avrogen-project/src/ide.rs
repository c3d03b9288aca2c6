//! IDE project model.
//!
//! The IDE integration keeps a base module (the directory sets configured
//! up front) and two lists of deferred work: hooks that rewrite the module
//! before it is generated, and actions that run right before it is
//! finalized. [`Project::sync_ide`] always starts again from the base
//! module, so repeated synchronization gives the same result.

use std::{collections::BTreeSet, path::PathBuf, rc::Rc};

use serde::Serialize;

use crate::{Project, Result};

/// Plugin id of the IDE integration.
pub const IDE_PLUGIN_ID: &str = "idea";

/// Hook rewriting the module before generation.
pub type IdeHook = Rc<dyn Fn(&Project, &mut IdeModule) -> Result<()>>;

/// Action run before the module is finalized.
pub type IdeAction = Rc<dyn Fn(&Project) -> Result<()>>;

/// Directory sets of an IDE module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdeModule {
    pub source_dirs: BTreeSet<PathBuf>,
    pub test_source_dirs: BTreeSet<PathBuf>,
    pub exclude_dirs: BTreeSet<PathBuf>,
}

/// IDE state attached to a project once the IDE plugin is applied.
#[derive(Default)]
pub struct IdeIntegration {
    base: IdeModule,
    hooks: Vec<IdeHook>,
    actions: Vec<IdeAction>,
}

impl IdeIntegration {
    pub fn new(base: IdeModule) -> Self {
        Self {
            base,
            hooks: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// The module as configured before any hook runs.
    pub fn base(&self) -> &IdeModule {
        &self.base
    }

    pub(crate) fn add_hook(&mut self, hook: IdeHook) {
        self.hooks.push(hook);
    }

    pub(crate) fn add_action(&mut self, action: IdeAction) {
        self.actions.push(action);
    }

    /// Run hooks then actions, returning the finalized module.
    pub(crate) fn generate(&self, project: &Project) -> Result<IdeModule> {
        let mut module = self.base.clone();
        for hook in &self.hooks {
            hook(project, &mut module)?;
        }
        for action in &self.actions {
            action(project)?;
        }
        Ok(module)
    }
}

impl std::fmt::Debug for IdeIntegration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdeIntegration")
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}
