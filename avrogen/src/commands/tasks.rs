use std::path::PathBuf;

use avrogen_manifest::AvrogenToml;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TasksCommand {
    /// Path to avrogen.toml (defaults to ./avrogen.toml)
    #[arg(short, long, default_value = "avrogen.toml")]
    pub config: PathBuf,

    /// Print the steps as JSON
    #[arg(long)]
    pub json: bool,
}

impl TasksCommand {
    pub fn run(&self) -> Result<()> {
        let avrogen_toml = AvrogenToml::open(&self.config).unwrap_or_exit();
        let project = ops::configure(&avrogen_toml).unwrap_or_exit();

        let report = ops::tasks(&project);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        Ok(())
    }
}
