//! Two-phase plugin staging: declare capabilities first, activate them per project later.

use crate::config::PluginConfig;
use crate::error::ConfigError;
use crate::workspace::Project;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDeclaration {
    pub id: String,
    pub version: Option<String>,
    /// Activate on the root project as soon as it is declared.
    pub apply: bool,
}

impl From<&PluginConfig> for PluginDeclaration {
    fn from(config: &PluginConfig) -> Self {
        Self {
            id: config.id.trim().to_string(),
            version: config.version.clone(),
            apply: config.apply,
        }
    }
}

/// Declared plugins of a workspace. Declaring never activates anything.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PluginSet {
    declared: Vec<PluginDeclaration>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. Redeclaring an id is fine as long as the version agrees.
    pub fn declare(&mut self, decl: PluginDeclaration) -> Result<(), ConfigError> {
        if let Some(existing) = self.declared.iter_mut().find(|d| d.id == decl.id) {
            if existing.version != decl.version {
                return Err(ConfigError::Invalid(format!(
                    "plugin '{}' declared with conflicting versions {:?} and {:?}",
                    decl.id, existing.version, decl.version
                )));
            }
            existing.apply |= decl.apply;
            return Ok(());
        }

        tracing::debug!(id = %decl.id, version = ?decl.version, apply = decl.apply, "Declared plugin");
        self.declared.push(decl);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PluginDeclaration> {
        self.declared.iter().find(|d| d.id == id)
    }

    pub fn declared(&self) -> &[PluginDeclaration] {
        &self.declared
    }

    /// Declarations flagged for immediate activation.
    pub fn applied(&self) -> impl Iterator<Item = &PluginDeclaration> {
        self.declared.iter().filter(|d| d.apply)
    }

    /// Activate a declared plugin on `project`. Activating twice is a no-op.
    pub fn activate(&self, project: &mut Project, id: &str) -> Result<(), ConfigError> {
        let id = id.trim();
        if self.get(id).is_none() {
            return Err(ConfigError::UnknownPlugin(id.to_string()));
        }
        if !project.plugins.iter().any(|p| p == id) {
            tracing::debug!(project = %project.name, plugin = %id, "Activated plugin");
            project.plugins.push(id.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::BuildDirectory;

    fn decl(id: &str, version: Option<&str>, apply: bool) -> PluginDeclaration {
        PluginDeclaration {
            id: id.to_string(),
            version: version.map(str::to_string),
            apply,
        }
    }

    fn project() -> Project {
        Project::new("app", "/repo/android/app", BuildDirectory::new("/repo/build/app"))
    }

    #[test]
    fn test_declare_does_not_activate() {
        let mut plugins = PluginSet::new();
        plugins
            .declare(decl("com.android.application", Some("8.7.3"), false))
            .unwrap();

        assert_eq!(plugins.declared().len(), 1);
        assert_eq!(plugins.applied().count(), 0);
    }

    #[test]
    fn test_activate_declared_plugin() {
        let mut plugins = PluginSet::new();
        plugins.declare(decl("org.jetbrains.kotlin.android", Some("2.1.0"), false)).unwrap();

        let mut app = project();
        plugins.activate(&mut app, "org.jetbrains.kotlin.android").unwrap();
        plugins.activate(&mut app, "org.jetbrains.kotlin.android").unwrap();

        assert_eq!(app.plugins, vec!["org.jetbrains.kotlin.android"]);
    }

    #[test]
    fn test_activate_undeclared_plugin_fails() {
        let plugins = PluginSet::new();
        let mut app = project();

        let err = plugins.activate(&mut app, "com.google.gms.google-services").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPlugin(_)));
        assert!(app.plugins.is_empty());
    }

    #[test]
    fn test_conflicting_versions_are_rejected() {
        let mut plugins = PluginSet::new();
        plugins.declare(decl("java", Some("1"), false)).unwrap();
        plugins.declare(decl("java", Some("1"), true)).unwrap();
        assert!(plugins.get("java").unwrap().apply);

        let err = plugins.declare(decl("java", Some("2"), false)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
