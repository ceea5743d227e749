//! Task registry.

use crate::error::{ConfigError, Result};
use crate::tasks::{Task, TaskOutcome};

/// Registry of named tasks.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Vec<Box<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. Names are unique.
    pub fn register(&mut self, task: Box<dyn Task>) -> std::result::Result<(), ConfigError> {
        if self.get(task.name()).is_some() {
            return Err(ConfigError::DuplicateTask(task.name().to_string()));
        }
        tracing::debug!(task = %task.name(), "Registered task");
        self.tasks.push(task);
        Ok(())
    }

    /// Get a task by name.
    pub fn get(&self, name: &str) -> Option<&dyn Task> {
        self.tasks
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Run the named task.
    pub fn invoke(&self, name: &str) -> Result<TaskOutcome> {
        let task = self
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTask(name.to_string()))?;

        tracing::info!(task = %name, "Running task");
        task.execute()
    }

    /// List all task names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("tasks", &self.names())
            .finish()
    }
}
