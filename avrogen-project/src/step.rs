//! Steps registered on a project.
//!
//! A step is a named unit of work the host build engine schedules. This
//! crate only declares steps, their inputs and outputs, and the edges
//! between them; it never schedules them.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::{Error, Project, Property, Provider, Result};

/// What a step does for its grouping.
///
/// Together with the grouping name a role identifies at most one step,
/// which lets configuration code find steps without matching on names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepRole {
    /// Compiles interface-definition files to protocol descriptors.
    Protocol,
    /// Compiles schemas and protocol descriptors to source code.
    Source,
    /// The grouping's primary compiler.
    PrimaryCompile,
    /// A compiler contributed by a secondary toolchain.
    SecondaryCompile(String),
}

impl fmt::Display for StepRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepRole::Protocol => write!(f, "protocol generation"),
            StepRole::Source => write!(f, "source generation"),
            StepRole::PrimaryCompile => write!(f, "primary compile"),
            StepRole::SecondaryCompile(toolchain) => write!(f, "{} compile", toolchain),
        }
    }
}

/// Cheap reference to a registered step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepHandle {
    name: String,
}

impl StepHandle {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name of the referenced step.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the referenced step.
    pub fn get<'a>(&self, project: &'a Project) -> Result<&'a Step> {
        project.step(&self.name)
    }

    /// Resolve the step's output directory.
    pub fn output_dir(&self, project: &Project) -> Option<PathBuf> {
        project
            .steps()
            .get(&self.name)
            .and_then(|step| step.output_dir.get(project))
    }
}

/// An input root of a step or grouping.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// A fixed directory.
    Dir(PathBuf),
    /// A directory resolved on read.
    Lazy(Provider<PathBuf>),
    /// The output directory of another step; also a dependency edge.
    Outputs(StepHandle),
}

impl SourceInput {
    /// Resolve to a directory, if the input currently has one.
    pub fn resolve(&self, project: &Project) -> Option<PathBuf> {
        match self {
            SourceInput::Dir(path) => Some(path.clone()),
            SourceInput::Lazy(provider) => Some(provider.get(project)),
            SourceInput::Outputs(handle) => handle.output_dir(project),
        }
    }

    /// The step producing this input, if any.
    pub fn producer(&self) -> Option<&StepHandle> {
        match self {
            SourceInput::Outputs(handle) => Some(handle),
            _ => None,
        }
    }
}

impl From<PathBuf> for SourceInput {
    fn from(path: PathBuf) -> Self {
        SourceInput::Dir(path)
    }
}

impl From<Provider<PathBuf>> for SourceInput {
    fn from(provider: Provider<PathBuf>) -> Self {
        SourceInput::Lazy(provider)
    }
}

impl From<StepHandle> for SourceInput {
    fn from(handle: StepHandle) -> Self {
        SourceInput::Outputs(handle)
    }
}

/// A named step.
#[derive(Debug)]
pub struct Step {
    name: String,
    grouping: String,
    role: StepRole,
    /// Human-readable description shown in step listings.
    pub description: Option<String>,
    /// Listing group (e.g., "source generation").
    pub group: Option<String>,
    sources: Vec<SourceInput>,
    includes: Vec<String>,
    /// Tool classpath handed to the schema compiler.
    pub classpath: Property<Vec<PathBuf>>,
    depends_on: IndexSet<String>,
    /// Directory the step writes to.
    pub output_dir: Property<PathBuf>,
    /// Character encoding of the step's text output or input.
    pub encoding: Property<String>,
}

impl Step {
    /// Create a step for `grouping` playing `role`.
    pub fn new(name: impl Into<String>, grouping: impl Into<String>, role: StepRole) -> Self {
        Self {
            name: name.into(),
            grouping: grouping.into(),
            role,
            description: None,
            group: None,
            sources: Vec::new(),
            includes: Vec::new(),
            classpath: Property::new(),
            depends_on: IndexSet::new(),
            output_dir: Property::new(),
            encoding: Property::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the listing group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grouping(&self) -> &str {
        &self.grouping
    }

    pub fn role(&self) -> &StepRole {
        &self.role
    }

    pub fn handle(&self) -> StepHandle {
        StepHandle::new(&self.name)
    }

    /// Add an input root.
    pub fn source(&mut self, input: impl Into<SourceInput>) -> &mut Self {
        self.sources.push(input.into());
        self
    }

    pub fn sources(&self) -> &[SourceInput] {
        &self.sources
    }

    /// Restrict input files to those matching any of `patterns`.
    pub fn include<I, S>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Declare an explicit dependency on another step.
    pub fn depends_on(&mut self, name: impl Into<String>) -> &mut Self {
        self.depends_on.insert(name.into());
        self
    }

    /// Every input of this step: its own sources, plus the grouping's
    /// source directories for a primary compile step.
    pub fn all_sources<'a>(&'a self, project: &'a Project) -> Vec<&'a SourceInput> {
        let mut inputs: Vec<&SourceInput> = self.sources.iter().collect();
        if self.role == StepRole::PrimaryCompile
            && let Ok(grouping) = project.grouping(&self.grouping)
        {
            inputs.extend(grouping.source_dirs());
        }
        inputs
    }

    /// Resolve the input roots, de-duplicated in declaration order.
    pub fn source_roots(&self, project: &Project) -> Vec<PathBuf> {
        let roots: IndexSet<PathBuf> = self
            .all_sources(project)
            .into_iter()
            .filter_map(|input| input.resolve(project))
            .collect();
        roots.into_iter().collect()
    }

    /// Steps that must run before this one: explicit edges, then the
    /// producers of step-output inputs.
    pub fn dependencies(&self, project: &Project) -> Vec<String> {
        let mut deps = self.depends_on.clone();
        for input in self.all_sources(project) {
            if let Some(producer) = input.producer()
                && producer.name() != self.name
            {
                deps.insert(producer.name().to_string());
            }
        }
        deps.into_iter().collect()
    }

    /// Compile the include patterns; `None` means every file is included.
    pub fn include_matcher(&self) -> Result<Option<GlobSet>> {
        if self.includes.is_empty() {
            return Ok(None);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.includes {
            let glob = Glob::new(pattern).map_err(|source| {
                Box::new(Error::Pattern {
                    step: self.name.clone(),
                    pattern: pattern.clone(),
                    source,
                })
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| {
            Box::new(Error::Pattern {
                step: self.name.clone(),
                pattern: self.includes.join(", "),
                source,
            })
        })?;
        Ok(Some(set))
    }

    /// Collect the files under the input roots that pass the include filter.
    ///
    /// Missing roots contribute nothing. The result is sorted and free of
    /// duplicates.
    pub fn input_files(&self, project: &Project) -> Result<Vec<PathBuf>> {
        let matcher = self.include_matcher()?;
        let mut files = BTreeSet::new();

        for root in self.source_roots(project) {
            if !root.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&root) {
                let entry = entry.map_err(|source| {
                    Box::new(Error::Inputs {
                        step: self.name.clone(),
                        source,
                    })
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                if matches_include(matcher.as_ref(), &root, entry.path()) {
                    files.insert(entry.into_path());
                }
            }
        }

        Ok(files.into_iter().collect())
    }
}

fn matches_include(matcher: Option<&GlobSet>, root: &Path, path: &Path) -> bool {
    let Some(matcher) = matcher else {
        return true;
    };
    let relative = path.strip_prefix(root).unwrap_or(path);
    matcher.is_match(relative)
}
