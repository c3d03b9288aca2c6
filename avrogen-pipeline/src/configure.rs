use avrogen_core::platform_default_encoding;
use avrogen_manifest::OutputOverride;
use avrogen_project::{Project, Provider, Result, Step, StepHandle};
use tracing::debug;

use crate::conventions::{self, SOURCE_GENERATION_GROUP, Stage};

/// Register the protocol and source generation steps of `grouping`.
///
/// The source step reads the definition directory and the protocol step's
/// output, and its output becomes a source directory of the grouping.
/// Returns the source step.
///
/// # Errors
///
/// Fails when the grouping does not exist or when either step name is
/// already taken, which includes configuring the same grouping twice.
pub fn configure(
    project: &mut Project,
    grouping: &str,
    overrides: Option<&OutputOverride>,
) -> Result<StepHandle> {
    let compile_step = project.grouping(grouping)?.compile_step().to_string();
    let definitions = conventions::definition_dir(project.layout(), grouping);

    let mut protocol = generation_step(grouping, Stage::Protocol).with_description(format!(
        "Generates {grouping} Avro protocol definition files from IDL files."
    ));
    protocol
        .source(definitions.clone())
        .include(Stage::Protocol.includes());
    protocol.classpath.convention(Project::classpath_provider());
    if let Some(path) = overrides.and_then(|o| o.protocol.as_ref()) {
        protocol.output_dir.set_value(project.layout().file(path));
    }
    let protocol = project.register_step(protocol)?;

    let mut source = generation_step(grouping, Stage::Source).with_description(format!(
        "Generates {grouping} Avro source files from schema/protocol definition files."
    ));
    source
        .source(definitions)
        .source(protocol.clone())
        .include(Stage::Source.includes());
    if let Some(path) = overrides.and_then(|o| o.source.as_ref()) {
        source.output_dir.set_value(project.layout().file(path));
    }
    source.encoding.convention(output_encoding(compile_step));
    let source = project.register_step(source)?;

    project
        .grouping_mut(grouping)?
        .add_source_dir(source.clone());
    debug!(
        grouping,
        protocol = protocol.name(),
        source = source.name(),
        "configured generation steps"
    );

    Ok(source)
}

fn generation_step(grouping: &str, stage: Stage) -> Step {
    let mut step = Step::new(conventions::step_name(grouping, stage), grouping, stage.role())
        .with_group(SOURCE_GENERATION_GROUP);
    step.output_dir
        .convention(conventions::output_dir(grouping, stage));
    step
}

/// Encoding of the primary compile step when read, else the platform default.
fn output_encoding(compile_step: String) -> Provider<String> {
    Provider::new(move |project| {
        project
            .steps()
            .get(&compile_step)
            .and_then(|step| step.encoding.get(project))
            .unwrap_or_else(platform_default_encoding)
    })
}
