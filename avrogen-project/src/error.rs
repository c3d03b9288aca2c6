use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::{compiler::GenerationFailure, step::StepRole};

/// Result type for project operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("step '{name}' is already registered")]
    #[diagnostic(
        code(avrogen::duplicate_step),
        help("step names are derived from grouping names; rename one of the groupings")
    )]
    DuplicateStep { name: String },

    #[error("grouping '{grouping}' already has a {role} step ('{existing}')")]
    #[diagnostic(code(avrogen::duplicate_role))]
    DuplicateRole {
        grouping: String,
        role: StepRole,
        existing: String,
    },

    #[error("source grouping '{name}' is already defined")]
    #[diagnostic(code(avrogen::duplicate_grouping))]
    DuplicateGrouping { name: String },

    #[error("source grouping '{name}' does not exist")]
    #[diagnostic(code(avrogen::unknown_grouping))]
    UnknownGrouping { name: String },

    #[error("step '{name}' does not exist")]
    #[diagnostic(code(avrogen::unknown_step))]
    UnknownStep { name: String },

    #[error("step '{name}' has no output directory")]
    #[diagnostic(code(avrogen::missing_output))]
    MissingOutput { name: String },

    #[error("the IDE plugin has not been applied")]
    #[diagnostic(
        code(avrogen::ide_not_enabled),
        help("add an [ide] table to avrogen.toml")
    )]
    IdeNotEnabled,

    #[error("failed to reconcile IDE directory '{path}'")]
    #[diagnostic(
        code(avrogen::reconciliation),
        help("generated directories are declared as IDE source roots and must exist on disk")
    )]
    Reconciliation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory '{path}' of step '{step}'")]
    #[diagnostic(code(avrogen::output_dir))]
    OutputDir {
        step: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("step '{step}' failed")]
    #[diagnostic(code(avrogen::generation_failure))]
    Generation {
        step: String,
        #[source]
        failure: GenerationFailure,
    },

    #[error("failed to collect inputs of step '{step}'")]
    #[diagnostic(code(avrogen::inputs))]
    Inputs {
        step: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid include pattern '{pattern}' on step '{step}'")]
    #[diagnostic(code(avrogen::include_pattern))]
    Pattern {
        step: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
