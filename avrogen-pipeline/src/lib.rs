//! Avro code generation for build projects.
//!
//! Every source grouping of a project gets two generation steps:
//!
//! - `generate<Grouping>Protocol` compiles interface definitions
//!   (`src/<grouping>/avro/**/*.avdl`) to protocol descriptors
//! - `generate<Grouping>Source` compiles schemas and protocol descriptors,
//!   including the ones produced by the protocol step, to source code
//!
//! The generated sources feed the grouping's primary compile step and,
//! when that toolchain is present, its secondary compile step. With the
//! IDE plugin applied, the generated directories are also reconciled into
//! the IDE model.
//!
//! # Example
//!
//! ```ignore
//! use avrogen_manifest::AvrogenToml;
//! use avrogen_pipeline::Pipeline;
//!
//! let toml = AvrogenToml::open("avrogen.toml")?;
//! let project = Pipeline::new().run(toml.manifest(), toml.project_dir())?;
//! let module = project.sync_ide()?;
//! ```

pub mod conventions;
mod configure;
pub mod ide;
mod lower;
mod plugin;
mod runner;
mod wiring;

pub use configure::configure;
pub use conventions::Stage;
pub use lower::{ide_module, lower};
pub use plugin::{AVRO_PLUGIN_ID, AvroPlugin, DEFAULT_SECONDARY_TOOLCHAIN};
pub use runner::Pipeline;
pub use wiring::wire;
