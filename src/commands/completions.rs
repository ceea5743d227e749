use crate::cli::{Cli, CompletionsArgs};
use clap::CommandFactory;
use std::io;

/// Write completions for the requested shell to stdout.
pub fn run(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "buildnest", &mut io::stdout());
}
