//! Workspace model: the root project and its subprojects.

mod discovery;
mod project;

pub use discovery::{discover_subprojects, BUILD_FILES};
pub use project::{normalize_project_name, BuildDirectory, Project, ProjectId};

use crate::config::Config;
use crate::error::{BuildError, ConfigError, Result};
use std::path::{Component, Path};

/// A multi-project workspace. The root project always sits at [`ProjectId::ROOT`].
#[derive(Debug, Clone)]
pub struct Workspace {
    projects: Vec<Project>,
}

impl Workspace {
    pub fn new(root: Project) -> Self {
        Self {
            projects: vec![root],
        }
    }

    /// Build the workspace described by `config` for `project_dir`.
    ///
    /// Directories start at their default locations; the layout planner
    /// reassigns them.
    pub fn from_config(config: &Config, project_dir: &Path) -> Result<Self> {
        let ws = &config.workspace;

        let root_name = match &ws.name {
            Some(name) => normalize_project_name(name)?,
            None => project_dir
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| BuildError::InvalidPath(project_dir.display().to_string()))?,
        };

        let mut workspace = Self::new(Project::new(
            root_name,
            project_dir,
            BuildDirectory::new(project_dir.join(&ws.default_build_dir)),
        ));

        let names: Vec<String> = if ws.subprojects.is_empty() {
            let skip = build_dir_names(config);
            let skip: Vec<&str> = skip.iter().map(String::as_str).collect();
            discover_subprojects(project_dir, &skip)?
        } else {
            ws.subprojects
                .iter()
                .map(|s| normalize_project_name(&s.name))
                .collect::<std::result::Result<_, _>>()?
        };

        for name in names {
            let dir = project_dir.join(&name);
            let build_dir = BuildDirectory::new(dir.join(&ws.default_build_dir));
            workspace.add_subproject(Project::new(name, dir, build_dir))?;
        }

        let mut repositories: Vec<String> = Vec::new();
        for repo in &ws.repositories {
            let repo = repo.trim().to_string();
            if !repositories.contains(&repo) {
                repositories.push(repo);
            }
        }
        for project in &mut workspace.projects {
            project.repositories = repositories.clone();
        }

        Ok(workspace)
    }

    /// Add a subproject. Names must be unique among subprojects.
    pub fn add_subproject(&mut self, project: Project) -> std::result::Result<ProjectId, ConfigError> {
        if self.subprojects().iter().any(|p| p.name == project.name) {
            return Err(ConfigError::DuplicateProject(project.name));
        }
        self.projects.push(project);
        Ok(ProjectId(self.projects.len() - 1))
    }

    pub fn root(&self) -> &Project {
        &self.projects[0]
    }

    pub fn root_mut(&mut self) -> &mut Project {
        &mut self.projects[0]
    }

    pub fn subprojects(&self) -> &[Project] {
        &self.projects[1..]
    }

    pub fn subprojects_mut(&mut self) -> &mut [Project] {
        &mut self.projects[1..]
    }

    /// Ids of all subprojects, in declaration order.
    pub fn subproject_ids(&self) -> impl Iterator<Item = ProjectId> {
        (1..self.projects.len()).map(ProjectId)
    }

    /// All projects, root first.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> &Project {
        &self.projects[id.0]
    }

    pub fn project_mut(&mut self, id: ProjectId) -> &mut Project {
        &mut self.projects[id.0]
    }

    /// Resolve a project reference: `:` is the root, anything else names a subproject.
    pub fn find(&self, reference: &str) -> Option<ProjectId> {
        if reference.trim() == ":" {
            return Some(ProjectId::ROOT);
        }
        let name = normalize_project_name(reference).ok()?;
        self.subproject_ids().find(|id| self.project(*id).name == name)
    }

    /// Gradle-style path: `:` for the root, `:name` for subprojects.
    pub fn path_of(&self, id: ProjectId) -> String {
        if id == ProjectId::ROOT {
            ":".to_string()
        } else {
            format!(":{}", self.project(id).name)
        }
    }

    /// Source directory of the root project.
    pub fn dir(&self) -> &Path {
        &self.root().dir
    }
}

/// Name of the top-level directory the default build dir lives in.
///
/// A planned root elsewhere under the project dir is not skipped: output
/// directories carry no build file, and one that does is a subproject the
/// root guard must see.
fn build_dir_names(config: &Config) -> Vec<String> {
    config
        .workspace
        .default_build_dir
        .components()
        .find_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .map(str::to_string)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubprojectConfig;
    use std::fs;
    use tempfile::TempDir;

    fn listed(names: &[&str]) -> Config {
        let mut config = Config::default();
        config.workspace.subprojects = names
            .iter()
            .map(|n| SubprojectConfig {
                name: n.to_string(),
                plugins: vec![],
            })
            .collect();
        config
    }

    #[test]
    fn test_from_config_with_listed_subprojects() {
        let ws = Workspace::from_config(&listed(&[":app", "core"]), Path::new("/repo/android"))
            .unwrap();

        assert_eq!(ws.root().name, "android");
        assert_eq!(ws.root().build_dir.path(), Path::new("/repo/android/build"));
        let names: Vec<_> = ws.subprojects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["app", "core"]);
        assert_eq!(
            ws.subprojects()[0].build_dir.path(),
            Path::new("/repo/android/app/build")
        );
    }

    #[test]
    fn test_from_config_rejects_duplicates() {
        let result = Workspace::from_config(&listed(&["app", ":app"]), Path::new("/repo/android"));
        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::DuplicateProject(_)))
        ));
    }

    #[test]
    fn test_from_config_discovers_when_unlisted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("app")).unwrap();
        fs::write(tmp.path().join("app/build.gradle.kts"), "").unwrap();

        let ws = Workspace::from_config(&Config::default(), tmp.path()).unwrap();
        assert_eq!(ws.subprojects().len(), 1);
        assert_eq!(ws.subprojects()[0].name, "app");
    }

    #[test]
    fn test_discovery_skips_dotted_default_build_dir() {
        let tmp = TempDir::new().unwrap();
        for dir in ["app", "build"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join("build.gradle"), "").unwrap();
        }
        let mut config = Config::default();
        config.workspace.default_build_dir = "./build".into();

        let ws = Workspace::from_config(&config, tmp.path()).unwrap();
        let names: Vec<_> = ws.subprojects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["app"]);
    }

    #[test]
    fn test_subproject_at_planned_root_is_still_discovered() {
        let tmp = TempDir::new().unwrap();
        for dir in ["app", "core"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join("build.gradle.kts"), "").unwrap();
        }
        let mut config = Config::default();
        config.workspace.build_dir = "../app".into();

        let ws = Workspace::from_config(&config, tmp.path()).unwrap();
        let names: Vec<_> = ws.subprojects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["app", "core"]);
    }

    #[test]
    fn test_repositories_are_inherited_once() {
        let mut config = listed(&["app"]);
        config.workspace.repositories = vec!["google".into(), "google".into(), "mavenCentral".into()];

        let ws = Workspace::from_config(&config, Path::new("/repo/android")).unwrap();
        for project in ws.projects() {
            assert_eq!(project.repositories, vec!["google", "mavenCentral"]);
        }
    }

    #[test]
    fn test_find() {
        let ws = Workspace::from_config(&listed(&["app"]), Path::new("/repo/android")).unwrap();

        assert_eq!(ws.find(":"), Some(ProjectId::ROOT));
        assert_eq!(ws.find(":app").map(|id| ws.project(id).name.clone()), Some("app".into()));
        assert_eq!(ws.find("app"), ws.find(":app"));
        assert_eq!(ws.find("missing"), None);
        assert_eq!(ws.path_of(ProjectId::ROOT), ":");
        assert_eq!(ws.find("app").map(|id| ws.path_of(id)), Some(":app".into()));
    }
}
