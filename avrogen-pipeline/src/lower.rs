//! Lowering of a manifest into an unconfigured project.

use std::{collections::BTreeSet, path::PathBuf};

use avrogen_manifest::{IdeConfig, Manifest};
use avrogen_project::{IdeModule, Layout, Project, Result};

/// Build the project described by `manifest`: layout, classpath, groupings
/// and the encoding of their primary compile steps. No plugin is applied.
pub fn lower(manifest: &Manifest, project_dir: impl Into<PathBuf>) -> Result<Project> {
    let config = &manifest.project;

    let mut layout = Layout::new(project_dir);
    layout.set_build_dir(&config.build_dir);
    let classpath = config.classpath.iter().map(|p| layout.file(p)).collect();

    let mut project = Project::new(&config.name, layout, &config.language);
    project.set_classpath(classpath);

    for grouping in config.all_groupings() {
        project.add_grouping(grouping)?;
        if let Some(encoding) = &config.encoding {
            let compile = project.grouping(grouping)?.compile_step().to_string();
            project.step_mut(&compile)?.encoding.set_value(encoding.clone());
        }
    }

    Ok(project)
}

/// The IDE module the `[ide]` table describes, paths resolved against the
/// project directory.
pub fn ide_module(layout: &Layout, config: &IdeConfig) -> IdeModule {
    let resolve = |dirs: &[PathBuf]| -> BTreeSet<PathBuf> {
        dirs.iter().map(|d| layout.file(d)).collect()
    };
    IdeModule {
        source_dirs: resolve(&config.source_dirs),
        test_source_dirs: resolve(&config.test_source_dirs),
        exclude_dirs: resolve(&config.exclude_dirs),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_lower_manifest() {
        let manifest = Manifest::from_str(
            r#"
            [project]
            name = "demo"
            build_dir = "out"
            encoding = "UTF-16"
            classpath = ["lib/avro.jar", "/opt/shared.jar"]
            groupings = ["integration"]
            "#,
        )
        .unwrap();

        let project = lower(&manifest, "/work/demo").unwrap();

        assert_eq!(project.name(), "demo");
        assert_eq!(project.layout().build_dir(), PathBuf::from("/work/demo/out"));
        assert_eq!(
            project.classpath(),
            [
                PathBuf::from("/work/demo/lib/avro.jar"),
                PathBuf::from("/opt/shared.jar")
            ]
        );
        let groupings: Vec<_> = project.groupings().map(|g| g.name()).collect();
        assert_eq!(groupings, vec!["main", "test", "integration"]);

        let compile = project.step("compileIntegrationJava").unwrap();
        assert_eq!(compile.encoding.get(&project).as_deref(), Some("UTF-16"));
    }

    #[test]
    fn test_ide_module_resolves_paths() {
        let layout = Layout::new("/work/demo");
        let config = IdeConfig {
            source_dirs: vec![PathBuf::from("src/main/java")],
            test_source_dirs: Vec::new(),
            exclude_dirs: vec![PathBuf::from("build"), PathBuf::from("/tmp/cache")],
        };

        let module = ide_module(&layout, &config);

        assert!(module.source_dirs.contains(&PathBuf::from("/work/demo/src/main/java")));
        assert!(module.test_source_dirs.is_empty());
        assert!(module.exclude_dirs.contains(&PathBuf::from("/work/demo/build")));
        assert!(module.exclude_dirs.contains(&PathBuf::from("/tmp/cache")));
    }
}
