mod check;
mod completions;
mod idea;
mod tasks;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use idea::IdeaCommand;
use tasks::TasksCommand;

/// Extension trait for exiting on diagnostic errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for avrogen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for avrogen_project::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "avrogen")]
#[command(version)]
#[command(about = "Configure Avro code generation steps for a build project")]
pub(crate) struct Cli {
    /// Log configuration details to stderr
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Tasks(cmd) => cmd.run(),
            Commands::Idea(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate avrogen.toml and the resulting configuration
    Check(CheckCommand),

    /// List the configured steps with their inputs and outputs
    Tasks(TasksCommand),

    /// Synchronize the IDE model and create generated directories
    Idea(IdeaCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tasks_json() {
        let cli = Cli::try_parse_from(["avrogen", "-vv", "tasks", "--json", "-c", "demo.toml"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Tasks(cmd) => {
                assert!(cmd.json);
                assert_eq!(cmd.config.to_str(), Some("demo.toml"));
            }
            _ => panic!("expected tasks command"),
        }
    }
}
