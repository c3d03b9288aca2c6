//! Configuration of generation steps across groupings and toolchains.

use std::{collections::BTreeMap, path::PathBuf, str::FromStr};

use avrogen_manifest::Manifest;
use avrogen_pipeline::{AvroPlugin, Pipeline, lower};
use avrogen_project::{
    CompilerPlugin, Error, Layout, Plugin, Project, Result, Step, StepRole,
};

fn manifest(content: &str) -> Manifest {
    Manifest::from_str(content).expect("Failed to parse test manifest")
}

fn basic_manifest() -> Manifest {
    manifest(
        r#"
        [project]
        name = "demo"
        "#,
    )
}

/// One line per step: its name and the steps it depends on.
fn graph(project: &Project) -> String {
    project
        .steps()
        .iter()
        .map(|step| {
            let deps = step.dependencies(project);
            if deps.is_empty() {
                step.name().to_string()
            } else {
                format!("{} -> {}", step.name(), deps.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inputs and dependencies of every step, keyed by step name.
fn wiring(project: &Project) -> BTreeMap<String, (Vec<PathBuf>, Vec<String>)> {
    project
        .steps()
        .iter()
        .map(|step| {
            (
                step.name().to_string(),
                (step.source_roots(project), step.dependencies(project)),
            )
        })
        .collect()
}

#[test]
fn test_main_and_test_groupings() {
    let project = Pipeline::new()
        .run(&basic_manifest(), "/work/demo")
        .unwrap();

    let names: Vec<_> = project.steps().iter().map(|s| s.name()).collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "compileMainJava",
        "compileTestJava",
        "generateMainProtocol",
        "generateMainSource",
        "generateTestProtocol",
        "generateTestSource",
    ]
    "#);

    let compile = project.step("compileMainJava").unwrap();
    assert!(
        compile
            .source_roots(&project)
            .contains(&PathBuf::from("/work/demo/build/generated-main-avro-source"))
    );
}

#[test]
fn test_dependency_graph_with_secondary_toolchain() {
    let project = Pipeline::new()
        .run(
            &manifest(
                r#"
                [project]
                name = "demo"
                toolchains = ["kotlin"]
                "#,
            ),
            "/work/demo",
        )
        .unwrap();

    insta::assert_snapshot!(graph(&project), @r"
    compileMainJava -> generateMainSource
    compileTestJava -> generateTestSource
    generateMainProtocol
    generateMainSource -> generateMainProtocol
    generateTestProtocol
    generateTestSource -> generateTestProtocol
    compileMainKotlin -> generateMainSource
    compileTestKotlin -> generateTestSource
    ");
}

#[test]
fn test_source_step_inputs() {
    let project = Pipeline::new()
        .run(&basic_manifest(), "/work/demo")
        .unwrap();

    let source = project.step("generateTestSource").unwrap();
    assert_eq!(
        source.source_roots(&project),
        vec![
            PathBuf::from("/work/demo/src/test/avro"),
            PathBuf::from("/work/demo/build/generated-test-avro-protocol"),
        ]
    );
    assert_eq!(source.includes(), ["**/*.avsc", "**/*.avpr"]);
    assert_eq!(source.group.as_deref(), Some("source generation"));
}

#[test]
fn test_without_secondary_toolchain() {
    let project = Pipeline::new()
        .run(&basic_manifest(), "/work/demo")
        .unwrap();

    assert!(
        project
            .steps()
            .with_role(&StepRole::SecondaryCompile("kotlin".into()))
            .next()
            .is_none()
    );
    assert_eq!(project.plugins().pending_for("kotlin"), 2);

    let compile = project.step("compileMainJava").unwrap();
    assert_eq!(
        compile.source_roots(&project),
        vec![PathBuf::from("/work/demo/build/generated-main-avro-source")]
    );
    assert_eq!(compile.dependencies(&project), vec!["generateMainSource"]);
}

#[test]
fn test_plugin_order_does_not_matter() {
    let manifest = basic_manifest();

    let mut avro_first = lower(&manifest, "/work/demo").unwrap();
    avro_first.apply(&AvroPlugin::new()).unwrap();
    avro_first.apply(&CompilerPlugin::new("kotlin")).unwrap();

    let mut kotlin_first = lower(&manifest, "/work/demo").unwrap();
    kotlin_first.apply(&CompilerPlugin::new("kotlin")).unwrap();
    kotlin_first.apply(&AvroPlugin::new()).unwrap();

    assert_eq!(wiring(&avro_first), wiring(&kotlin_first));
    let (roots, deps) = &wiring(&avro_first)["compileTestKotlin"];
    assert_eq!(
        roots,
        &vec![PathBuf::from("/work/demo/build/generated-test-avro-source")]
    );
    assert_eq!(deps, &vec!["generateTestSource".to_string()]);
}

#[test]
fn test_groupings_added_after_configuration() {
    for kotlin_first in [false, true] {
        let mut project = lower(&basic_manifest(), "/work/demo").unwrap();
        if kotlin_first {
            project.apply(&CompilerPlugin::new("kotlin")).unwrap();
            project.apply(&AvroPlugin::new()).unwrap();
        } else {
            project.apply(&AvroPlugin::new()).unwrap();
            project.apply(&CompilerPlugin::new("kotlin")).unwrap();
        }

        project.add_grouping("integration").unwrap();

        let kotlin = project.step("compileIntegrationKotlin").unwrap();
        assert_eq!(
            kotlin.dependencies(&project),
            vec!["generateIntegrationSource"],
            "kotlin_first = {kotlin_first}"
        );
        assert!(project.steps().contains("generateIntegrationProtocol"));
    }
}

/// A toolchain that never registers a compile step.
struct BareToolchain;

impl Plugin for BareToolchain {
    fn id(&self) -> &str {
        "kotlin"
    }

    fn apply(&self, _project: &mut Project) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_toolchain_without_compile_step() {
    let mut project = lower(&basic_manifest(), "/work/demo").unwrap();
    project.apply(&AvroPlugin::new()).unwrap();
    project.apply(&BareToolchain).unwrap();
    assert!(project.has_plugin("kotlin"));

    // The listener waits for the step and fires once it appears.
    let step = Step::new("compileMainKt", "main", StepRole::SecondaryCompile("kotlin".into()));
    project.register_step(step).unwrap();

    let compile = project.step("compileMainKt").unwrap();
    assert_eq!(compile.dependencies(&project), vec!["generateMainSource"]);
}

#[test]
fn test_custom_secondary_toolchain() {
    let project = Pipeline::new()
        .run(
            &manifest(
                r#"
                [project]
                name = "demo"
                toolchains = ["kotlin", "scala"]

                [avro]
                secondary_toolchain = "scala"
                "#,
            ),
            "/work/demo",
        )
        .unwrap();

    let scala = project.step("compileMainScala").unwrap();
    let kotlin = project.step("compileMainKotlin").unwrap();
    assert_eq!(scala.dependencies(&project), vec!["generateMainSource"]);
    assert!(kotlin.dependencies(&project).is_empty());
}

#[test]
fn test_values_are_resolved_late() {
    let mut project = Pipeline::new()
        .run(&basic_manifest(), "/work/demo")
        .unwrap();

    project.layout_mut().set_build_dir("target");
    project
        .step_mut("compileMainJava")
        .unwrap()
        .encoding
        .set_value("UTF-16".to_string());

    let source = project.step("generateMainSource").unwrap();
    assert_eq!(
        source.output_dir.get(&project),
        Some(PathBuf::from("/work/demo/target/generated-main-avro-source"))
    );
    assert_eq!(source.encoding.get(&project).as_deref(), Some("UTF-16"));
    assert_eq!(
        source.source_roots(&project)[1],
        PathBuf::from("/work/demo/target/generated-main-avro-protocol")
    );
}

#[test]
fn test_classpath_is_resolved_late() {
    let mut project = Pipeline::new()
        .run(
            &manifest(
                r#"
                [project]
                name = "demo"
                classpath = ["lib/a.jar"]
                "#,
            ),
            "/work/demo",
        )
        .unwrap();

    project.set_classpath(vec![PathBuf::from("/work/demo/lib/late.jar")]);

    let protocol = project.step("generateMainProtocol").unwrap();
    assert_eq!(
        protocol.classpath.get(&project),
        Some(vec![PathBuf::from("/work/demo/lib/late.jar")])
    );
    let request = project.generation_request("generateTestProtocol").unwrap();
    assert_eq!(request.classpath, vec![PathBuf::from("/work/demo/lib/late.jar")]);
}

#[test]
fn test_output_override_from_manifest() {
    let project = Pipeline::new()
        .run(
            &manifest(
                r#"
                [project]
                name = "demo"

                [avro.output.test]
                protocol = "gen/test-protocol"
                "#,
            ),
            "/work/demo",
        )
        .unwrap();

    let source = project.step("generateTestSource").unwrap();
    assert_eq!(
        source.source_roots(&project)[1],
        PathBuf::from("/work/demo/gen/test-protocol")
    );
}

#[test]
fn test_colliding_grouping_names() {
    let err = Pipeline::new()
        .run(
            &manifest(
                r#"
                [project]
                name = "demo"
                groupings = ["foo_bar", "foo-bar"]
                "#,
            ),
            "/work/demo",
        )
        .unwrap_err();

    assert!(matches!(*err, Error::DuplicateStep { ref name } if name == "compileFooBarJava"));
}

#[test]
fn test_applying_avro_twice_is_noop() {
    let mut project = Pipeline::new()
        .run(&basic_manifest(), "/work/demo")
        .unwrap();
    let before = project.steps().len();

    project.apply(&AvroPlugin::new()).unwrap();

    assert_eq!(project.steps().len(), before);
}

#[test]
fn test_avro_plugin_creates_default_groupings() {
    let mut project = Project::new("bare", Layout::new("/work/bare"), "java");
    project.apply(&AvroPlugin::new()).unwrap();

    let groupings: Vec<_> = project.groupings().map(|g| g.name()).collect();
    assert_eq!(groupings, vec!["main", "test"]);
    assert!(project.steps().contains("generateTestSource"));
}
