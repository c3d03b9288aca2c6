//! Idea operation - IDE model synchronization.

use std::{collections::BTreeSet, path::PathBuf};

use avrogen_project::{Project, Result};

use super::relative;
use crate::reports::IdeaReport;

/// Synchronize the IDE model, creating generated directories on the way.
pub fn idea(project: &Project) -> Result<IdeaReport> {
    let module = project.sync_ide()?;
    let dir = project.layout().project_dir();
    let relativize =
        |dirs: &BTreeSet<PathBuf>| -> Vec<PathBuf> { dirs.iter().map(|p| relative(dir, p)).collect() };

    Ok(IdeaReport {
        source_dirs: relativize(&module.source_dirs),
        test_source_dirs: relativize(&module.test_source_dirs),
        exclude_dirs: relativize(&module.exclude_dirs),
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use avrogen_manifest::Manifest;
    use avrogen_pipeline::Pipeline;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_idea_report() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("build/classes")).unwrap();
        let manifest = Manifest::from_str(
            r#"
            [project]
            name = "demo"

            [ide]
            exclude_dirs = ["build"]
            "#,
        )
        .unwrap();
        let project = Pipeline::new().run(&manifest, temp.path()).unwrap();

        let report = idea(&project).unwrap();

        assert_eq!(
            report.source_dirs,
            vec![
                PathBuf::from("build/generated-main-avro-source"),
                PathBuf::from("src/main/avro"),
            ]
        );
        assert_eq!(report.exclude_dirs, vec![PathBuf::from("build/classes")]);
        assert!(temp.path().join("build/generated-test-avro-source").is_dir());
    }
}
