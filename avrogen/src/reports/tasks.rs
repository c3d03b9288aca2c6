//! Tasks command report data structures.

use std::{collections::BTreeMap, path::PathBuf};

use serde::Serialize;

use super::output::{Output, Report};

/// Registered steps of a project.
#[derive(Debug, Serialize)]
pub struct TasksReport {
    pub project: String,
    pub steps: Vec<StepInfo>,
}

/// One registered step with its resolved values.
#[derive(Debug, Serialize)]
pub struct StepInfo {
    pub name: String,
    pub grouping: String,
    pub role: String,
    pub group: Option<String>,
    pub description: Option<String>,
    /// Input roots, relative to the project directory where possible.
    pub inputs: Vec<PathBuf>,
    pub includes: Vec<String>,
    pub output: Option<PathBuf>,
    pub encoding: Option<String>,
    pub depends_on: Vec<String>,
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn heading(group: &str) -> String {
    let mut chars = group.chars();
    match chars.next() {
        Some(c) => format!("{}{} steps", c.to_uppercase(), chars.as_str()),
        None => "Other steps".to_string(),
    }
}

impl Report for TasksReport {
    fn render(&self, out: &mut dyn Output) {
        let mut groups: BTreeMap<&str, Vec<&StepInfo>> = BTreeMap::new();
        for step in &self.steps {
            groups
                .entry(step.group.as_deref().unwrap_or(""))
                .or_default()
                .push(step);
        }

        for (i, (group, steps)) in groups.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.title(&heading(group));

            for step in steps {
                match &step.description {
                    Some(desc) => out.preformatted(&format!("{} - {}", step.name, desc)),
                    None => out.preformatted(&step.name),
                }
                if !step.inputs.is_empty() {
                    out.key_value_indented("inputs", &join_paths(&step.inputs));
                }
                if !step.includes.is_empty() {
                    out.key_value_indented("includes", &step.includes.join(", "));
                }
                if let Some(output) = &step.output {
                    out.key_value_indented("output", &output.display().to_string());
                }
                if let Some(encoding) = &step.encoding {
                    out.key_value_indented("encoding", encoding);
                }
                if !step.depends_on.is_empty() {
                    out.key_value_indented("depends on", &step.depends_on.join(", "));
                }
            }
        }
    }
}
