//! Projects and their build directories.

use crate::error::ConfigError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a project writes its generated output.
///
/// Starts at the project's default location and is reassigned once the
/// layout is planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildDirectory(PathBuf);

impl BuildDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Point this directory somewhere else.
    pub fn assign(&mut self, path: impl Into<PathBuf>) {
        self.0 = path.into();
    }

    /// True if `other` resolves at or below this directory.
    pub fn contains(&self, other: &Path) -> bool {
        other.starts_with(&self.0)
    }
}

/// Index of a project inside a [`Workspace`](super::Workspace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub(crate) usize);

impl ProjectId {
    pub const ROOT: ProjectId = ProjectId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A single configured unit of the workspace.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Project name (no leading `:`).
    pub name: String,
    /// Source directory of the project.
    pub dir: PathBuf,
    /// Effective output directory.
    pub build_dir: BuildDirectory,
    /// Paths (`:` or `:name`) of projects that must be evaluated before this one.
    pub evaluation_depends_on: Vec<String>,
    /// Active plugin ids.
    pub plugins: Vec<String>,
    /// Repositories inherited from the workspace.
    pub repositories: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, build_dir: BuildDirectory) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            build_dir,
            evaluation_depends_on: vec![],
            plugins: vec![],
            repositories: vec![],
        }
    }
}

/// Validate a project name, accepting the Gradle `:name` form.
///
/// The result is usable as a single path segment.
pub fn normalize_project_name(name: &str) -> Result<String, ConfigError> {
    let trimmed = name.trim();
    let bare = trimmed.strip_prefix(':').unwrap_or(trimmed);

    let invalid = bare.is_empty()
        || bare == "."
        || bare == ".."
        || bare.contains(['/', '\\', ':'])
        || bare.chars().any(char::is_control);

    if invalid {
        return Err(ConfigError::InvalidProjectName(name.to_string()));
    }
    Ok(bare.to_string())
}
