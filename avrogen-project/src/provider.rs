//! Lazily resolved values.
//!
//! Configuration code never reads a value that later configuration could
//! still change. Instead it hands out a [`Provider`], a thunk evaluated
//! against the [`Project`] only when a consumer asks for it.
//!
//! # Example
//!
//! ```ignore
//! let out = Layout::dir("generated-main-avro-source");
//! project.layout_mut().set_build_dir("target");
//! // Resolves under `target/`, not the build dir at the time `out` was made.
//! let path = out.get(&project);
//! ```

use std::{fmt, rc::Rc};

use crate::Project;

/// A value computed on read from the project state.
pub struct Provider<T> {
    compute: Rc<dyn Fn(&Project) -> T>,
}

impl<T: 'static> Provider<T> {
    /// Create a provider from a computation.
    pub fn new(compute: impl Fn(&Project) -> T + 'static) -> Self {
        Self {
            compute: Rc::new(compute),
        }
    }

    /// Create a provider that always yields `value`.
    pub fn fixed(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move |_| value.clone())
    }

    /// Resolve the value.
    pub fn get(&self, project: &Project) -> T {
        (self.compute)(project)
    }

    /// Derive a provider that transforms this one's value on read.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Provider<U> {
        let inner = self.clone();
        Provider::new(move |project| f(inner.get(project)))
    }
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            compute: Rc::clone(&self.compute),
        }
    }
}

impl<T> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Provider(..)")
    }
}

/// A configurable value with an optional convention.
///
/// An explicitly set value always wins over the convention; both are
/// resolved lazily.
pub struct Property<T> {
    value: Option<Provider<T>>,
    convention: Option<Provider<T>>,
}

impl<T: 'static> Property<T> {
    /// Create an empty property.
    pub fn new() -> Self {
        Self {
            value: None,
            convention: None,
        }
    }

    /// Set the value from a provider.
    pub fn set(&mut self, provider: Provider<T>) {
        self.value = Some(provider);
    }

    /// Set a fixed value.
    pub fn set_value(&mut self, value: T)
    where
        T: Clone,
    {
        self.value = Some(Provider::fixed(value));
    }

    /// Set the convention used while no explicit value is present.
    pub fn convention(&mut self, provider: Provider<T>) {
        self.convention = Some(provider);
    }

    /// Whether an explicit value was set.
    pub fn is_explicit(&self) -> bool {
        self.value.is_some()
    }

    /// Whether the property would resolve to a value.
    pub fn is_present(&self) -> bool {
        self.value.is_some() || self.convention.is_some()
    }

    /// Resolve the property: explicit value, else convention, else `None`.
    pub fn get(&self, project: &Project) -> Option<T> {
        self.value
            .as_ref()
            .or(self.convention.as_ref())
            .map(|provider| provider.get(project))
    }

    /// A provider reading this property's current state on every resolve.
    pub fn provider(&self) -> Provider<Option<T>> {
        let value = self.value.clone();
        let convention = self.convention.clone();
        Provider::new(move |project| {
            value
                .as_ref()
                .or(convention.as_ref())
                .map(|provider| provider.get(project))
        })
    }
}

impl<T: 'static> Default for Property<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("explicit", &self.value.is_some())
            .field("convention", &self.convention.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, path::PathBuf};

    use super::*;
    use crate::Layout;

    fn project() -> Project {
        Project::new("demo", Layout::new("/work/demo"), "java")
    }

    #[test]
    fn test_provider_is_not_evaluated_until_read() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let provider = Provider::new(move |_| {
            counter.set(counter.get() + 1);
            42
        });
        let mapped = provider.map(|n| n * 2);

        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.get(&project()), 84);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_provider_sees_late_configuration() {
        let mut project = project();
        let dir = Layout::dir("generated-main-avro-source");

        project.layout_mut().set_build_dir("target");

        assert_eq!(
            dir.get(&project),
            PathBuf::from("/work/demo/target/generated-main-avro-source")
        );
    }

    #[test]
    fn test_property_explicit_value_wins() {
        let project = project();
        let mut property = Property::new();
        assert_eq!(property.get(&project), None);
        assert!(!property.is_present());

        property.convention(Provider::fixed("UTF-8".to_string()));
        assert_eq!(property.get(&project).as_deref(), Some("UTF-8"));
        assert!(!property.is_explicit());

        property.set_value("ISO-8859-1".to_string());
        assert_eq!(property.get(&project).as_deref(), Some("ISO-8859-1"));
        assert!(property.is_explicit());
    }

    #[test]
    fn test_property_provider_snapshot() {
        let project = project();
        let mut property = Property::new();
        property.convention(Provider::fixed(1));

        let provider = property.provider();
        assert_eq!(provider.get(&project), Some(1));
    }
}
