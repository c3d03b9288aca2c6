//! Parsing and validation of `avrogen.toml`.
//!
//! The manifest describes the project being configured: its build
//! directory, source groupings, compiler toolchains, generated output
//! overrides and the base IDE model.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result};
pub use manifest::{
    AvroConfig, AvrogenToml, BUILD_DIR_ENV, IdeConfig, Manifest, OutputOverride, ParseContext,
    ProjectConfig,
};
