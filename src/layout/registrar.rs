//! Evaluation-order constraints between projects.

use crate::error::ConfigError;
use crate::workspace::{ProjectId, Workspace};
use std::collections::BTreeSet;

/// Records "evaluate X after Y" constraints on a workspace.
///
/// Constraints are declarative. The host scheduler honors them; this type
/// only validates and stores them.
pub struct DependencyRegistrar<'a> {
    workspace: &'a mut Workspace,
}

impl<'a> DependencyRegistrar<'a> {
    pub fn new(workspace: &'a mut Workspace) -> Self {
        Self { workspace }
    }

    /// Record that `dependent` is evaluated after `dependency`.
    ///
    /// Both references must resolve, otherwise the call fails immediately.
    pub fn register_evaluation_dependency(
        &mut self,
        dependent: &str,
        dependency: &str,
    ) -> Result<(), ConfigError> {
        let dependent_id = self.resolve(dependent)?;
        let dependency_id = self.resolve(dependency)?;
        self.link(dependent_id, dependency_id);
        Ok(())
    }

    /// Make every subproject depend on `anchor`. Returns the number of new constraints.
    pub fn register_all_against(&mut self, anchor: &str) -> Result<usize, ConfigError> {
        let anchor_id = self.resolve(anchor)?;

        let ids: Vec<ProjectId> = self.workspace.subproject_ids().collect();
        let mut added = 0;
        for id in ids {
            if self.link(id, anchor_id) {
                added += 1;
            }
        }

        tracing::debug!(anchor = %anchor, added, "Registered evaluation dependencies");
        Ok(added)
    }

    fn resolve(&self, reference: &str) -> Result<ProjectId, ConfigError> {
        self.workspace.find(reference).ok_or_else(|| {
            let name = reference.trim().trim_start_matches(':');
            ConfigError::UnknownProject(name.to_string())
        })
    }

    fn link(&mut self, dependent: ProjectId, dependency: ProjectId) -> bool {
        if dependent == dependency {
            return false;
        }

        let dependency_path = self.workspace.path_of(dependency);
        let deps = &mut self.workspace.project_mut(dependent).evaluation_depends_on;
        if deps.contains(&dependency_path) {
            return false;
        }
        deps.push(dependency_path);
        true
    }
}

/// Order in which projects can be evaluated.
///
/// The root comes first when nothing forces otherwise; ties keep declaration order.
pub fn evaluation_order(workspace: &Workspace) -> Result<Vec<ProjectId>, ConfigError> {
    let projects = workspace.projects();
    let count = projects.len();

    let mut in_degree = vec![0usize; count];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];

    for (idx, project) in projects.iter().enumerate() {
        for dep in &project.evaluation_depends_on {
            let dep_id = workspace
                .find(dep)
                .ok_or_else(|| ConfigError::UnknownProject(dep.trim_start_matches(':').to_string()))?;
            in_degree[idx] += 1;
            dependents[dep_id.index()].push(idx);
        }
    }

    let mut ready: BTreeSet<usize> = (0..count).filter(|i| in_degree[*i] == 0).collect();
    let mut order = Vec::with_capacity(count);

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &dependent in &dependents[next] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() != count {
        let stuck = (0..count)
            .filter(|i| in_degree[*i] > 0)
            .map(|i| projects[i].name.clone())
            .collect();
        return Err(ConfigError::DependencyCycle(stuck));
    }

    Ok(order.into_iter().map(ProjectId).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::{BuildDirectory, Project};

    fn workspace(subprojects: &[&str]) -> Workspace {
        let mut ws = Workspace::new(Project::new(
            "android",
            "/repo/android",
            BuildDirectory::new("/repo/android/build"),
        ));
        for name in subprojects {
            ws.add_subproject(Project::new(
                *name,
                format!("/repo/android/{name}"),
                BuildDirectory::new(format!("/repo/android/{name}/build")),
            ))
            .unwrap();
        }
        ws
    }

    fn names(ws: &Workspace, order: &[ProjectId]) -> Vec<String> {
        order.iter().map(|id| ws.project(*id).name.clone()).collect()
    }

    #[test]
    fn test_register_all_against_anchor() {
        let mut ws = workspace(&["core", "app", "feature"]);
        let added = DependencyRegistrar::new(&mut ws)
            .register_all_against(":app")
            .unwrap();

        assert_eq!(added, 2);
        for project in ws.subprojects() {
            if project.name == "app" {
                assert!(project.evaluation_depends_on.is_empty());
            } else {
                assert_eq!(project.evaluation_depends_on, vec![":app"]);
            }
        }
    }

    #[test]
    fn test_missing_anchor_fails_fast() {
        let mut ws = workspace(&["core"]);
        let err = DependencyRegistrar::new(&mut ws)
            .register_all_against(":app")
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownProject(ref n) if n == "app"));
        assert!(ws.subprojects()[0].evaluation_depends_on.is_empty());
    }

    #[test]
    fn test_registration_is_deduplicated() {
        let mut ws = workspace(&["app", "core"]);
        let mut registrar = DependencyRegistrar::new(&mut ws);
        registrar.register_evaluation_dependency("core", "app").unwrap();
        registrar.register_evaluation_dependency(":core", ":app").unwrap();
        assert_eq!(registrar.register_all_against("app").unwrap(), 0);

        assert_eq!(ws.subprojects()[1].evaluation_depends_on, vec![":app"]);
    }

    #[test]
    fn test_unknown_dependent_fails() {
        let mut ws = workspace(&["app"]);
        let err = DependencyRegistrar::new(&mut ws)
            .register_evaluation_dependency("ghost", "app")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProject(ref n) if n == "ghost"));
    }

    #[test]
    fn test_order_puts_anchor_first() {
        let mut ws = workspace(&["core", "feature", "app"]);
        DependencyRegistrar::new(&mut ws)
            .register_all_against("app")
            .unwrap();

        let order = evaluation_order(&ws).unwrap();
        assert_eq!(names(&ws, &order), vec!["android", "app", "core", "feature"]);
    }

    #[test]
    fn test_order_without_constraints_keeps_declaration_order() {
        let ws = workspace(&["b", "a"]);
        let order = evaluation_order(&ws).unwrap();
        assert_eq!(names(&ws, &order), vec!["android", "b", "a"]);
    }

    #[test]
    fn test_root_can_be_a_dependency() {
        let mut ws = workspace(&["app"]);
        DependencyRegistrar::new(&mut ws)
            .register_evaluation_dependency("app", ":")
            .unwrap();

        assert_eq!(ws.subprojects()[0].evaluation_depends_on, vec![":"]);
        let order = evaluation_order(&ws).unwrap();
        assert_eq!(names(&ws, &order), vec!["android", "app"]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut ws = workspace(&["a", "b"]);
        let mut registrar = DependencyRegistrar::new(&mut ws);
        registrar.register_evaluation_dependency("a", "b").unwrap();
        registrar.register_evaluation_dependency("b", "a").unwrap();

        match evaluation_order(&ws) {
            Err(ConfigError::DependencyCycle(stuck)) => assert_eq!(stuck, vec!["a", "b"]),
            other => panic!("Expected cycle, got {other:?}"),
        }
    }
}
