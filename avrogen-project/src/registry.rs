//! Name-unique step registry.
//!
//! Steps are stored in registration order. Besides lookup by name, every
//! step is indexed by its (grouping, role) pair so configuration code can
//! locate e.g. the secondary compile step of a grouping without matching
//! on naming patterns.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    Error, Result,
    step::{Step, StepHandle, StepRole},
};

/// Lookup key of a step: the grouping it belongs to and its role there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleKey {
    pub grouping: String,
    pub role: StepRole,
}

impl RoleKey {
    pub fn new(grouping: impl Into<String>, role: StepRole) -> Self {
        Self {
            grouping: grouping.into(),
            role,
        }
    }
}

/// Registry of all steps of a project.
#[derive(Debug, Default)]
pub struct StepRegistry {
    steps: IndexMap<String, Step>,
    roles: HashMap<RoleKey, String>,
}

impl StepRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step.
    ///
    /// # Errors
    ///
    /// Fails if a step with the same name, or the same role in the same
    /// grouping, is already registered. The registry is left unchanged.
    pub fn insert(&mut self, step: Step) -> Result<StepHandle> {
        if self.steps.contains_key(step.name()) {
            return Err(Box::new(Error::DuplicateStep {
                name: step.name().to_string(),
            }));
        }

        let key = RoleKey::new(step.grouping(), step.role().clone());
        if let Some(existing) = self.roles.get(&key) {
            return Err(Box::new(Error::DuplicateRole {
                grouping: key.grouping,
                role: key.role,
                existing: existing.clone(),
            }));
        }

        let handle = step.handle();
        self.roles.insert(key, step.name().to_string());
        self.steps.insert(step.name().to_string(), step);
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<&Step> {
        self.steps.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Step> {
        self.steps.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Find the step playing `role` for `grouping`.
    pub fn by_role(&self, grouping: &str, role: &StepRole) -> Option<StepHandle> {
        self.roles
            .get(&RoleKey::new(grouping, role.clone()))
            .map(StepHandle::new)
    }

    /// All steps in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    /// Steps playing `role` in any grouping, in registration order.
    pub fn with_role<'a>(&'a self, role: &'a StepRole) -> impl Iterator<Item = &'a Step> {
        self.steps.values().filter(move |step| step.role() == role)
    }

    /// Get the number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_insert_and_lookup() {
        let mut registry = StepRegistry::new();
        let handle = registry
            .insert(Step::new("generateMainSource", "main", StepRole::Source))
            .unwrap();

        assert_eq!(handle.name(), "generateMainSource");
        assert!(registry.contains("generateMainSource"));
        assert_eq!(registry.by_role("main", &StepRole::Source), Some(handle));
        assert_eq!(registry.by_role("test", &StepRole::Source), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_rejects_duplicate_name() {
        let mut registry = StepRegistry::new();
        registry
            .insert(Step::new("generateMainSource", "main", StepRole::Source))
            .unwrap();

        let err = registry
            .insert(Step::new("generateMainSource", "test", StepRole::Source))
            .unwrap_err();

        assert!(matches!(*err, Error::DuplicateStep { ref name } if name == "generateMainSource"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.by_role("test", &StepRole::Source), None);
    }

    #[test]
    fn test_registry_rejects_duplicate_role() {
        let mut registry = StepRegistry::new();
        registry
            .insert(Step::new("a", "main", StepRole::PrimaryCompile))
            .unwrap();

        let err = registry
            .insert(Step::new("b", "main", StepRole::PrimaryCompile))
            .unwrap_err();

        assert!(matches!(*err, Error::DuplicateRole { ref existing, .. } if existing == "a"));
        assert!(!registry.contains("b"));
    }

    #[test]
    fn test_with_role_keeps_registration_order() {
        let mut registry = StepRegistry::new();
        for grouping in ["main", "test", "integration"] {
            registry
                .insert(Step::new(
                    format!("{grouping}Source"),
                    grouping,
                    StepRole::Source,
                ))
                .unwrap();
            registry
                .insert(Step::new(
                    format!("{grouping}Protocol"),
                    grouping,
                    StepRole::Protocol,
                ))
                .unwrap();
        }

        let names: Vec<_> = registry
            .with_role(&StepRole::Source)
            .map(|step| step.name())
            .collect();
        assert_eq!(names, vec!["mainSource", "testSource", "integrationSource"]);
    }
}
