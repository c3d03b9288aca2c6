//! Directory and naming conventions of the generation stages.
//!
//! Everything here is a pure function of the grouping name and the stage,
//! so two distinct (grouping, stage) pairs always map to distinct step
//! names and output directories.

use std::{fmt, path::PathBuf};

use avrogen_core::qualified_name;
use avrogen_project::{Layout, Provider, StepRole};

/// Extension of interface-definition files.
pub const IDL_EXTENSION: &str = "avdl";
/// Extension of protocol descriptors.
pub const PROTOCOL_EXTENSION: &str = "avpr";
/// Extension of schema files.
pub const SCHEMA_EXTENSION: &str = "avsc";

/// Prefix shared by every generated output directory.
pub const GENERATED_PREFIX: &str = "generated-";

/// Listing group of the generation steps.
pub const SOURCE_GENERATION_GROUP: &str = "source generation";

/// A generation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Interface definitions to protocol descriptors.
    Protocol,
    /// Schemas and protocol descriptors to source code.
    Source,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Protocol, Stage::Source];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Protocol => "protocol",
            Stage::Source => "source",
        }
    }

    /// Role of the stage's step in its grouping.
    pub fn role(self) -> StepRole {
        match self {
            Stage::Protocol => StepRole::Protocol,
            Stage::Source => StepRole::Source,
        }
    }

    /// Include patterns applied to the stage's inputs.
    pub fn includes(self) -> Vec<String> {
        match self {
            Stage::Protocol => vec![format!("**/*.{IDL_EXTENSION}")],
            Stage::Source => vec![
                format!("**/*.{SCHEMA_EXTENSION}"),
                format!("**/*.{PROTOCOL_EXTENSION}"),
            ],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `src/<grouping>/avro` under the project directory.
pub fn definition_dir(layout: &Layout, grouping: &str) -> PathBuf {
    layout.file(format!("src/{grouping}/avro"))
}

/// `generated-<grouping>-avro-<stage>`
pub fn output_dir_name(grouping: &str, stage: Stage) -> String {
    format!("{GENERATED_PREFIX}{grouping}-avro-{stage}")
}

/// The stage's conventional output directory below the build root,
/// resolved when read.
pub fn output_dir(grouping: &str, stage: Stage) -> Provider<PathBuf> {
    Layout::dir(output_dir_name(grouping, stage))
}

/// `generate<Grouping>Protocol` or `generate<Grouping>Source`
pub fn step_name(grouping: &str, stage: Stage) -> String {
    qualified_name("generate", grouping, stage.as_str())
}

/// Whether a build-root child with this name holds generated output.
pub fn is_generated_dir_name(name: &str) -> bool {
    name.starts_with(GENERATED_PREFIX)
}
