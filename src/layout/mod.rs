//! Build layout planning.
//!
//! This module provides:
//! - Redirection of the root build directory and nesting of subproject outputs
//! - Evaluation-order constraints against an anchor project
//! - Two-phase plugin staging
//! - The configuration phase tying them together

mod configure;
pub mod planner;
pub mod plugins;
pub mod registrar;

pub use configure::{configure, ConfiguredWorkspace};
pub use planner::{apply_layout, plan_root_directory, plan_subproject_directory};
pub use plugins::{PluginDeclaration, PluginSet};
pub use registrar::{evaluation_order, DependencyRegistrar};
