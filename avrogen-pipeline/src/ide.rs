//! IDE model reconciliation.
//!
//! IDEs refuse source roots nested below an excluded directory. The build
//! root is usually excluded wholesale, so reconciliation trades that single
//! exclude for excludes on each of its children that do not hold generated
//! output.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use avrogen_core::{DirResult, MAIN_GROUPING, TEST_GROUPING, child_dirs, ensure_dir};
use avrogen_project::{Error, IdeModule, Project, Result, StepRole};
use tracing::{debug, warn};

use crate::conventions::{self, is_generated_dir_name};

/// `(existing - removals) ∪ additions`
pub fn merge_dirs<A, R>(existing: &BTreeSet<PathBuf>, additions: A, removals: R) -> BTreeSet<PathBuf>
where
    A: IntoIterator<Item = PathBuf>,
    R: IntoIterator<Item = PathBuf>,
{
    let mut dirs = existing.clone();
    for dir in removals {
        dirs.remove(&dir);
    }
    dirs.extend(additions);
    dirs
}

/// Immediate child directories of the build root, split into those holding
/// generated output and the rest.
///
/// A build root that is not a directory yields two empty lists.
pub fn build_root_children(build_dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    if !build_dir.is_dir() {
        warn!(path = %build_dir.display(), "build root does not exist, no excludes added");
        return Ok((Vec::new(), Vec::new()));
    }

    let children = child_dirs(build_dir).map_err(|source| {
        Box::new(Error::Reconciliation {
            path: build_dir.to_path_buf(),
            source,
        })
    })?;
    Ok(children.into_iter().partition(|dir| {
        dir.file_name()
            .is_some_and(|name| is_generated_dir_name(&name.to_string_lossy()))
    }))
}

/// Definition directory and source step output of a grouping.
fn grouping_roots(project: &Project, grouping: &str) -> Vec<PathBuf> {
    let mut roots = vec![conventions::definition_dir(project.layout(), grouping)];
    if let Some(dir) = project
        .steps()
        .by_role(grouping, &StepRole::Source)
        .and_then(|handle| handle.output_dir(project))
    {
        roots.push(dir);
    }
    roots
}

/// Merge the generated directories into the module's source roots and
/// recompute its excludes.
///
/// Main roots go to the source dirs, test roots to the test source dirs.
/// The build root and its generated children are dropped from the excludes
/// and every other child of the build root is added.
pub fn reconcile(project: &Project, module: &mut IdeModule) -> Result<()> {
    module.source_dirs = merge_dirs(
        &module.source_dirs,
        grouping_roots(project, MAIN_GROUPING),
        std::iter::empty::<PathBuf>(),
    );
    module.test_source_dirs = merge_dirs(
        &module.test_source_dirs,
        grouping_roots(project, TEST_GROUPING),
        std::iter::empty::<PathBuf>(),
    );

    let build_dir = project.layout().build_dir();
    let (generated, others) = build_root_children(build_dir)?;
    let removals = std::iter::once(build_dir.to_path_buf()).chain(generated);
    module.exclude_dirs = merge_dirs(&module.exclude_dirs, others, removals);

    debug!(
        source_dirs = module.source_dirs.len(),
        test_source_dirs = module.test_source_dirs.len(),
        exclude_dirs = module.exclude_dirs.len(),
        "reconciled IDE module"
    );
    Ok(())
}

/// Create the output directory of every source generation step.
pub fn ensure_output_dirs(project: &Project) -> Result<()> {
    for step in project.steps().with_role(&StepRole::Source) {
        let Some(dir) = step.output_dir.get(project) else {
            continue;
        };
        let created = ensure_dir(&dir).map_err(|source| {
            Box::new(Error::Reconciliation {
                path: dir.clone(),
                source,
            })
        })?;
        if created == DirResult::Created {
            debug!(step = step.name(), path = %dir.display(), "created generated directory");
        }
    }
    Ok(())
}
