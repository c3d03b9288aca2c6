//! Tasks operation - step listing.

use avrogen_project::Project;

use super::relative;
use crate::reports::{StepInfo, TasksReport};

/// Collect every registered step with its lazy values resolved.
pub fn tasks(project: &Project) -> TasksReport {
    let dir = project.layout().project_dir();
    let steps = project
        .steps()
        .iter()
        .map(|step| StepInfo {
            name: step.name().to_string(),
            grouping: step.grouping().to_string(),
            role: step.role().to_string(),
            group: step.group.clone(),
            description: step.description.clone(),
            inputs: step
                .source_roots(project)
                .iter()
                .map(|p| relative(dir, p))
                .collect(),
            includes: step.includes().to_vec(),
            output: step.output_dir.get(project).map(|p| relative(dir, &p)),
            encoding: step.encoding.get(project),
            depends_on: step.dependencies(project),
        })
        .collect();

    TasksReport {
        project: project.name().to_string(),
        steps,
    }
}
