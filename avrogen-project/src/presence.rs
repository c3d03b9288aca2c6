//! Presence-reactive registry of applied plugins.
//!
//! Listeners registered for a plugin id run exactly once: immediately when
//! the plugin is already applied, otherwise when it gets applied. A plugin
//! that is never applied never runs its listeners.

use indexmap::IndexSet;

use crate::{Project, Result};

/// Callback run when a plugin becomes present.
pub type PluginCallback = Box<dyn FnOnce(&mut Project) -> Result<()>>;

/// Applied plugin ids and listeners waiting for ids not yet applied.
#[derive(Default)]
pub struct PluginRegistry {
    applied: IndexSet<String>,
    pending: Vec<(String, PluginCallback)>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the plugin `id` has been applied.
    pub fn is_applied(&self, id: &str) -> bool {
        self.applied.contains(id)
    }

    /// Applied plugin ids in application order.
    pub fn applied(&self) -> impl Iterator<Item = &str> {
        self.applied.iter().map(String::as_str)
    }

    /// Number of listeners still waiting for `id`.
    pub fn pending_for(&self, id: &str) -> usize {
        self.pending.iter().filter(|(pending, _)| pending == id).count()
    }

    /// Register a listener for `id`.
    ///
    /// Returns the callback back when `id` is already applied; the caller
    /// must run it right away.
    pub(crate) fn listen(&mut self, id: &str, callback: PluginCallback) -> Option<PluginCallback> {
        if self.is_applied(id) {
            return Some(callback);
        }
        self.pending.push((id.to_string(), callback));
        None
    }

    /// Mark `id` as applied and hand back the listeners that were waiting for it.
    pub(crate) fn mark_applied(&mut self, id: &str) -> Vec<PluginCallback> {
        if !self.applied.insert(id.to_string()) {
            return Vec::new();
        }
        let (ready, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(pending, _)| pending == id);
        self.pending = pending;
        ready.into_iter().map(|(_, callback)| callback).collect()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("applied", &self.applied)
            .field("pending", &self.pending.len())
            .finish()
    }
}
