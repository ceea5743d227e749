//! buildnest - build-output layout planning for multi-project workspaces
//!
//! This crate provides functionality for:
//! - Redirecting a workspace's build output into a shared nested layout
//! - Registering evaluation-order constraints against an anchor project
//! - Cleaning the redirected build tree on demand

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod layout;
pub mod tasks;
pub mod workspace;

// Re-export commonly used types
pub use config::Config;
pub use error::{BuildError, ConfigError, Result};
pub use layout::{configure, ConfiguredWorkspace};
