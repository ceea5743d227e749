use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl BuildError {
    /// Wrap an I/O error, keeping permission failures distinguishable.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            BuildError::PermissionDenied(path)
        } else {
            BuildError::Io { path, source }
        }
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Config(_) | BuildError::InvalidPath(_) => 2,
            BuildError::Io { .. } | BuildError::PermissionDenied(_) => 1,
        }
    }
}

/// Configuration-phase errors. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid project name '{0}'")]
    InvalidProjectName(String),

    #[error("Project '{0}' is declared more than once")]
    DuplicateProject(String),

    #[error("Project ':{0}' not found in workspace")]
    UnknownProject(String),

    #[error("Evaluation dependency cycle between projects: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    #[error("Build directory override '{override_path}' climbs above the filesystem root from '{base}'")]
    PathEscapesRoot {
        base: PathBuf,
        override_path: PathBuf,
    },

    #[error("Refusing to use '{0}' as build directory: it contains the project sources")]
    UnsafeBuildDir(PathBuf),

    #[error("Plugin '{0}' was never declared")]
    UnknownPlugin(String),

    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("Task '{0}' not found")]
    UnknownTask(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BuildError>;
