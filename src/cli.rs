use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// buildnest - nested build-output layout planner and cleaner
#[derive(Parser, Debug)]
#[command(name = "buildnest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root project directory
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        env = "BUILDNEST_PROJECT_DIR",
        value_name = "PATH"
    )]
    pub project_dir: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete the root build directory
    Clean,

    /// Show the planned build layout and evaluation order
    Plan(PlanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Validates the CLI definition is correct
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_clean_command() {
        let cli = Cli::parse_from(["buildnest", "clean"]);
        assert!(matches!(cli.command, Command::Clean));
        assert_eq!(cli.project_dir, PathBuf::from("."));
    }

    #[test]
    fn clean_takes_no_flags() {
        let result = Cli::try_parse_from(["buildnest", "clean", "--force"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_plan_with_project_dir() {
        let cli = Cli::parse_from(["buildnest", "-C", "/repo/android", "plan", "--json"]);
        match cli.command {
            Command::Plan(args) => assert!(args.json),
            _ => panic!("Expected Plan command"),
        }
        assert_eq!(cli.project_dir, PathBuf::from("/repo/android"));
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["buildnest", "-vvv", "clean"]);
        assert_eq!(cli.verbose, 3);
    }
}
