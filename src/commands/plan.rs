//! Plan command implementation

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::layout::{configure, ConfiguredWorkspace, PluginDeclaration};
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Serializable view of a configured workspace.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub root_project: String,
    pub build_root: PathBuf,
    pub projects: Vec<ProjectReport>,
    pub evaluation_order: Vec<String>,
    pub plugins: Vec<PluginDeclaration>,
    pub tasks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub path: String,
    pub name: String,
    pub build_dir: PathBuf,
    pub evaluation_depends_on: Vec<String>,
    pub plugins: Vec<String>,
    pub repositories: Vec<String>,
}

impl PlanReport {
    pub fn new(configured: &ConfiguredWorkspace) -> Self {
        let ws = &configured.workspace;
        let ids: Vec<_> = std::iter::once(crate::workspace::ProjectId::ROOT)
            .chain(ws.subproject_ids())
            .collect();

        let projects = ids
            .iter()
            .map(|id| {
                let project = ws.project(*id);
                ProjectReport {
                    path: ws.path_of(*id),
                    name: project.name.clone(),
                    build_dir: project.build_dir.path().to_path_buf(),
                    evaluation_depends_on: project.evaluation_depends_on.clone(),
                    plugins: project.plugins.clone(),
                    repositories: project.repositories.clone(),
                }
            })
            .collect();

        Self {
            root_project: ws.root().name.clone(),
            build_root: configured.build_root().to_path_buf(),
            projects,
            evaluation_order: configured
                .evaluation_order
                .iter()
                .map(|id| ws.path_of(*id))
                .collect(),
            plugins: configured.plugins.declared().to_vec(),
            tasks: configured
                .tasks
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Format a report as aligned text.
pub fn format_text(report: &PlanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Root project: {}", report.root_project);
    let _ = writeln!(out, "Build root:   {}", report.build_root.display());

    let _ = writeln!(out, "\n  {:<20} {:<40} {}", "PROJECT", "BUILD DIR", "EVALUATED AFTER");
    let _ = writeln!(out, "  {}", "-".repeat(76));
    for project in &report.projects {
        let after = if project.evaluation_depends_on.is_empty() {
            "-".to_string()
        } else {
            project.evaluation_depends_on.join(", ")
        };
        let _ = writeln!(
            out,
            "  {:<20} {:<40} {}",
            project.path,
            project.build_dir.display(),
            after
        );
    }

    let _ = writeln!(out, "\nEvaluation order: {}", report.evaluation_order.join(" -> "));

    if !report.plugins.is_empty() {
        let _ = writeln!(out, "\nPlugins:");
        for plugin in &report.plugins {
            let version = plugin.version.as_deref().unwrap_or("-");
            let state = if plugin.apply { "applied" } else { "staged" };
            let _ = writeln!(out, "  {:<40} {:<10} {}", plugin.id, version, state);
        }
    }

    if let Some(root) = report.projects.first() {
        if !root.repositories.is_empty() {
            let _ = writeln!(out, "\nRepositories: {}", root.repositories.join(", "));
        }
    }

    let _ = writeln!(out, "\nTasks: {}", report.tasks.join(", "));
    out
}

/// Run the plan command
pub fn run(args: &PlanArgs, config: &Config, project_dir: &Path) -> Result<()> {
    let configured = configure(config, project_dir)?;
    let report = PlanReport::new(&configured);

    let output = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        format_text(&report)
    };

    println!("{}", output);
    Ok(())
}
