use avrogen_project::{Project, Result, StepHandle, StepRole};
use tracing::debug;

/// Feed the output of `source` into the compile steps of `grouping`.
///
/// The primary compile step always consumes it. The secondary compile step
/// of `secondary_toolchain` consumes it once both the toolchain plugin is
/// applied and that step is registered, in whichever order those happen.
pub fn wire(
    project: &mut Project,
    grouping: &str,
    source: &StepHandle,
    secondary_toolchain: &str,
) -> Result<()> {
    let compile = project.grouping(grouping)?.compile_step().to_string();
    project.step_mut(&compile)?.source(source.clone());
    debug!(step = %compile, source = source.name(), "wired primary compile step");

    let grouping = grouping.to_string();
    let toolchain = secondary_toolchain.to_string();
    let source = source.clone();
    project.with_plugin(secondary_toolchain, move |project| {
        let role = StepRole::SecondaryCompile(toolchain);
        project.when_step(&grouping, role, move |project, compile| {
            debug!(
                step = compile.name(),
                source = source.name(),
                "wired secondary compile step"
            );
            project.step_mut(compile.name())?.source(source);
            Ok(())
        })
    })
}
