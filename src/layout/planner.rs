//! Build directory planning.
//!
//! Everything here is lexical: paths are joined and normalized without
//! touching the filesystem, so planning works before any output exists.

use crate::error::{BuildError, ConfigError, Result};
use crate::workspace::Workspace;
use std::path::{Component, Path, PathBuf};

/// Resolve `relative_override` against `base` and normalize `.` and `..`.
///
/// An absolute override replaces the base. A relative base is taken from the
/// current directory. Climbing above the filesystem root is an error.
pub fn plan_root_directory(base: &Path, relative_override: &Path) -> Result<PathBuf> {
    let base = if base.is_absolute() {
        base.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| BuildError::from_io(base, e))?;
        cwd.join(base)
    };

    let joined = base.join(relative_override);
    let root = normalize(&joined).ok_or_else(|| ConfigError::PathEscapesRoot {
        base: base.clone(),
        override_path: relative_override.to_path_buf(),
    })?;

    tracing::debug!(base = %base.display(), root = %root.display(), "Planned root build directory");
    Ok(root)
}

/// `root/project_name`.
pub fn plan_subproject_directory(root: &Path, project_name: &str) -> PathBuf {
    root.join(project_name)
}

/// Point the root project at `root` and every subproject at `root/<name>`.
pub fn apply_layout(workspace: &mut Workspace, root: &Path) {
    workspace.root_mut().build_dir.assign(root);

    for project in workspace.subprojects_mut() {
        let dir = plan_subproject_directory(root, &project.name);
        tracing::debug!(project = %project.name, dir = %dir.display(), "Assigned build directory");
        project.build_dir.assign(dir);
    }
}

/// Reject roots whose deletion would take project sources with them.
///
/// The root may not be the filesystem root, may not contain any project
/// directory and may not sit inside a subproject's source tree.
pub fn check_build_root(root: &Path, workspace: &Workspace) -> std::result::Result<(), ConfigError> {
    if root.parent().is_none() {
        return Err(ConfigError::UnsafeBuildDir(root.to_path_buf()));
    }

    for (idx, project) in workspace.projects().iter().enumerate() {
        let dir = normalize(&project.dir).unwrap_or_else(|| project.dir.clone());
        let inside_subproject = idx != 0 && root.starts_with(&dir);

        if dir.starts_with(root) || inside_subproject {
            tracing::debug!(project = %project.name, root = %root.display(), "Build root overlaps sources");
            return Err(ConfigError::UnsafeBuildDir(root.to_path_buf()));
        }
    }
    Ok(())
}

/// Lexical normalization. `None` if a `..` would climb above the root.
pub(crate) fn normalize(path: &Path) -> Option<PathBuf> {
    let mut anchor = PathBuf::new();
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return None;
                }
            }
            Component::Normal(part) => parts.push(part),
        }
    }

    let mut normalized = anchor;
    normalized.extend(parts);
    Some(normalized)
}
