//! Core utilities and types for avrogen.
//!
//! This crate provides the string and filesystem helpers shared by
//! the manifest, project model and pipeline crates.

mod encoding;
mod file;
mod utils;

// Character encodings
pub use encoding::{DEFAULT_ENCODING, encoding_from_locale, platform_default_encoding};
// Directory operations
pub use file::{DirResult, child_dirs, ensure_dir};
// String utilities
pub use utils::{qualified_name, to_camel_case, to_pascal_case};

/// Grouping compiled into the main artifact.
pub const MAIN_GROUPING: &str = "main";

/// Grouping holding the test sources.
pub const TEST_GROUPING: &str = "test";
