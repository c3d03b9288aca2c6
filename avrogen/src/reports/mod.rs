//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target or
//! serialize them as JSON.

mod check;
mod idea;
mod output;
mod tasks;

pub use check::CheckReport;
pub use idea::IdeaReport;
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
pub use tasks::{StepInfo, TasksReport};
