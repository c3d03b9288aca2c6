//! Contract of the external schema compiler.
//!
//! Parsing interface definitions and schemas happens outside this crate.
//! A step hands the compiler a [`GenerationRequest`] with every lazy value
//! already resolved; the compiler writes into the output directory and
//! reports the files it produced, or a [`GenerationFailure`] pointing at
//! the offending input.

use std::{fmt, path::PathBuf};

use crate::step::StepRole;

/// Everything the schema compiler needs to run one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub step: String,
    pub role: StepRole,
    /// Input files after include filtering, sorted.
    pub inputs: Vec<PathBuf>,
    /// Classpath used to resolve imports across files.
    pub classpath: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Encoding of generated text, when the step declares one.
    pub encoding: Option<String>,
}

/// A parse or semantic error reported by the schema compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub file: PathBuf,
    pub line: Option<u32>,
    pub message: String,
}

impl GenerationFailure {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Attach the line the error was found on.
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for GenerationFailure {}

/// A compiler turning definition files into generated files.
pub trait SchemaCompiler {
    /// Run one generation step, returning the files written.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationFailure`] for the first input that fails to
    /// parse or validate. Failures are not retried.
    fn compile(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<Vec<PathBuf>, GenerationFailure>;
}
