use crate::error::ConfigError;
use crate::workspace::normalize_project_name;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the project directory when no `--config` is given.
pub const PROJECT_CONFIG_FILE: &str = "buildnest.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub plugins: Vec<PluginConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root project name (None = project directory name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Build directory the override is resolved against, relative to the project dir
    pub default_build_dir: PathBuf,
    /// Redirected root build directory, relative to `default_build_dir`
    pub build_dir: PathBuf,
    /// Project every subproject is evaluated after
    pub evaluation_anchor: String,
    /// Repositories inherited by every project
    pub repositories: Vec<String>,
    /// Subprojects (empty = discover from the project directory)
    pub subprojects: Vec<SubprojectConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubprojectConfig {
    pub name: String,
    /// Staged plugins this subproject activates
    #[serde(default)]
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Activate on the root project right away
    #[serde(default = "default_apply")]
    pub apply: bool,
}

fn default_apply() -> bool {
    true
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            name: None,
            default_build_dir: PathBuf::from("build"),
            build_dir: PathBuf::from("../../build"),
            evaluation_anchor: "app".to_string(),
            repositories: vec!["google".to_string(), "mavenCentral".to_string()],
            subprojects: vec![],
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `buildnest.toml` in the project
    /// directory is tried, then the user config directory, then defaults.
    pub fn load(path: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let candidates = [
            Some(project_dir.join(PROJECT_CONFIG_FILE)),
            Self::user_config_path(),
        ];

        for candidate in candidates.into_iter().flatten() {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Using config file");
                return Self::from_file(&candidate);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read, parse and validate a single config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// `~/.config/buildnest/config.toml` on Linux.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("buildnest").join("config.toml"))
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ws = &self.workspace;

        if ws.build_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("build_dir must not be empty".into()));
        }
        if ws.default_build_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "default_build_dir must not be empty".into(),
            ));
        }

        // `:` anchors on the root project.
        if ws.evaluation_anchor.trim() != ":" {
            normalize_project_name(&ws.evaluation_anchor)?;
        }
        if let Some(name) = &ws.name {
            normalize_project_name(name)?;
        }
        for sub in &ws.subprojects {
            normalize_project_name(&sub.name)?;
        }

        if ws.repositories.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "repository names must not be empty".into(),
            ));
        }
        if self.plugins.iter().any(|p| p.id.trim().is_empty()) {
            return Err(ConfigError::Invalid("plugin ids must not be empty".into()));
        }

        Ok(())
    }
}
