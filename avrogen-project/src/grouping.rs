use std::path::PathBuf;

use indexmap::IndexSet;

use crate::{Project, step::SourceInput};

/// A named set of source directories compiled by one primary compile step.
#[derive(Debug)]
pub struct SourceGrouping {
    name: String,
    compile_step: String,
    source_dirs: Vec<SourceInput>,
}

impl SourceGrouping {
    pub(crate) fn new(name: impl Into<String>, compile_step: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compile_step: compile_step.into(),
            source_dirs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the primary compile step.
    pub fn compile_step(&self) -> &str {
        &self.compile_step
    }

    /// Add a source directory; the primary compile step picks it up.
    pub fn add_source_dir(&mut self, input: impl Into<SourceInput>) {
        self.source_dirs.push(input.into());
    }

    pub fn source_dirs(&self) -> &[SourceInput] {
        &self.source_dirs
    }

    /// Resolve the source directories, de-duplicated in declaration order.
    pub fn resolve_source_dirs(&self, project: &Project) -> Vec<PathBuf> {
        let dirs: IndexSet<PathBuf> = self
            .source_dirs
            .iter()
            .filter_map(|input| input.resolve(project))
            .collect();
        dirs.into_iter().collect()
    }
}
