//! The `clean` task: delete the whole root build directory.

use crate::error::{BuildError, Result};
use crate::tasks::{Task, TaskOutcome};
use humansize::{format_size, BINARY};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name the clean task is registered under.
pub const CLEAN_TASK: &str = "clean";

/// Recursively deletes a build output tree.
///
/// A missing target is not an error, so running it twice is safe. A failure
/// halfway leaves a smaller tree that the next run removes.
#[derive(Debug, Clone)]
pub struct CleanTask {
    target: PathBuf,
}

impl CleanTask {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Delete the target. Returns the number of bytes freed, `None` if it was absent.
    pub fn run(&self) -> Result<Option<u64>> {
        let meta = match fs::symlink_metadata(&self.target) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.target.display(), "Nothing to clean");
                return Ok(None);
            }
            Err(e) => return Err(BuildError::from_io(&self.target, e)),
        };

        let (size, removed) = if meta.is_dir() {
            (dir_size(&self.target), fs::remove_dir_all(&self.target))
        } else {
            (meta.len(), fs::remove_file(&self.target))
        };

        match removed {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(BuildError::from_io(&self.target, e)),
        }

        tracing::info!(path = %self.target.display(), freed = size, "Deleted build directory");
        Ok(Some(size))
    }
}

impl Task for CleanTask {
    fn name(&self) -> &str {
        CLEAN_TASK
    }

    fn description(&self) -> &str {
        "Deletes the root build directory"
    }

    fn execute(&self) -> Result<TaskOutcome> {
        Ok(match self.run()? {
            Some(freed) => TaskOutcome::Executed {
                summary: format!(
                    "Deleted {} ({})",
                    self.target.display(),
                    format_size(freed, BINARY)
                ),
            },
            None => TaskOutcome::UpToDate,
        })
    }
}

fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
