//! Clean command implementation.

use crate::config::Config;
use crate::layout::configure;
use crate::tasks::{TaskOutcome, CLEAN_TASK};
use anyhow::Result;
use std::path::Path;

/// Run the clean command.
pub fn run(config: &Config, project_dir: &Path, quiet: bool) -> Result<()> {
    let configured = configure(config, project_dir)?;

    match configured.tasks.invoke(CLEAN_TASK)? {
        TaskOutcome::Executed { summary } => {
            if !quiet {
                println!("{}", summary);
            }
        }
        TaskOutcome::UpToDate => {
            if !quiet {
                println!(
                    "Nothing to clean: {} does not exist",
                    configured.build_root().display()
                );
            }
        }
    }

    Ok(())
}
