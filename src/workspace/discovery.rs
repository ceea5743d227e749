//! Subproject discovery for workspaces that don't list their subprojects.

use crate::error::{BuildError, Result};
use crate::workspace::normalize_project_name;
use std::path::Path;
use walkdir::WalkDir;

/// Files that mark a directory as a Gradle subproject.
pub const BUILD_FILES: &[&str] = &["build.gradle", "build.gradle.kts"];

/// Find subprojects among the immediate children of `project_dir`.
///
/// Hidden directories and `skip` names are ignored. Results are sorted by name.
pub fn discover_subprojects(project_dir: &Path, skip: &[&str]) -> Result<Vec<String>> {
    let mut names = Vec::new();

    let walker = WalkDir::new(project_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(project_dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => BuildError::from_io(path, io),
                None => BuildError::InvalidPath(path.display().to_string()),
            }
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 directory");
            continue;
        };

        if name.starts_with('.') || skip.contains(&name) {
            continue;
        }

        if !BUILD_FILES.iter().any(|f| entry.path().join(f).is_file()) {
            continue;
        }

        match normalize_project_name(name) {
            Ok(name) => names.push(name),
            Err(e) => tracing::warn!(error = %e, "Skipping subproject"),
        }
    }

    tracing::debug!(count = names.len(), "Discovered subprojects");
    Ok(names)
}
