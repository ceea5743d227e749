//! The configuration phase: config in, fully planned workspace out.

use crate::config::Config;
use crate::error::{BuildError, ConfigError, Result};
use crate::layout::planner::{self, apply_layout, check_build_root, plan_root_directory};
use crate::layout::plugins::{PluginDeclaration, PluginSet};
use crate::layout::registrar::{evaluation_order, DependencyRegistrar};
use crate::tasks::{CleanTask, TaskRegistry};
use crate::workspace::{ProjectId, Workspace};
use std::path::{Path, PathBuf};

/// Result of the configuration phase. Holds everything later phases need.
#[derive(Debug)]
pub struct ConfiguredWorkspace {
    pub workspace: Workspace,
    pub plugins: PluginSet,
    pub tasks: TaskRegistry,
    pub evaluation_order: Vec<ProjectId>,
}

impl ConfiguredWorkspace {
    /// The redirected root build directory.
    pub fn build_root(&self) -> &Path {
        self.workspace.root().build_dir.path()
    }
}

/// Run the configuration phase for `project_dir`.
///
/// Evaluation dependencies are registered first so a missing anchor aborts
/// before any directory is planned. No task runs here.
pub fn configure(config: &Config, project_dir: &Path) -> Result<ConfiguredWorkspace> {
    config.validate()?;
    let project_dir = absolute(project_dir)?;
    let ws_config = &config.workspace;

    let mut workspace = Workspace::from_config(config, &project_dir)?;

    DependencyRegistrar::new(&mut workspace).register_all_against(&ws_config.evaluation_anchor)?;
    let evaluation_order = evaluation_order(&workspace)?;

    let base = workspace.root().build_dir.path().to_path_buf();
    let root = plan_root_directory(&base, &ws_config.build_dir)?;
    check_build_root(&root, &workspace)?;
    apply_layout(&mut workspace, &root);

    let plugins = stage_plugins(config, &mut workspace)?;

    let mut tasks = TaskRegistry::new();
    tasks.register(Box::new(CleanTask::new(&root)))?;

    tracing::info!(
        root = %root.display(),
        subprojects = workspace.subprojects().len(),
        "Configured workspace"
    );

    Ok(ConfiguredWorkspace {
        workspace,
        plugins,
        tasks,
        evaluation_order,
    })
}

fn stage_plugins(config: &Config, workspace: &mut Workspace) -> std::result::Result<PluginSet, ConfigError> {
    let mut plugins = PluginSet::new();
    for plugin in &config.plugins {
        plugins.declare(PluginDeclaration::from(plugin))?;
    }

    let applied: Vec<String> = plugins.applied().map(|d| d.id.clone()).collect();
    for id in &applied {
        plugins.activate(workspace.root_mut(), id)?;
    }

    for sub in &config.workspace.subprojects {
        let id = workspace
            .find(&sub.name)
            .ok_or_else(|| ConfigError::UnknownProject(sub.name.clone()))?;
        for plugin in &sub.plugins {
            plugins.activate(workspace.project_mut(id), plugin)?;
        }
    }

    Ok(plugins)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| BuildError::from_io(path, e))?
            .join(path)
    };
    planner::normalize(&joined).ok_or_else(|| BuildError::InvalidPath(path.display().to_string()))
}
