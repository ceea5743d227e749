//! Named tasks registered during configuration and invoked on demand.

mod clean;
mod registry;

pub use clean::{CleanTask, CLEAN_TASK};
pub use registry::TaskRegistry;

use crate::error::Result;

/// What a task invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The action ran and changed something.
    Executed { summary: String },
    /// Nothing to do.
    UpToDate,
}

/// A registered operation with a side-effecting action.
///
/// Registration never runs the action; only an explicit invocation does.
pub trait Task: Send + Sync {
    /// Unique name used for dispatch (e.g. "clean").
    fn name(&self) -> &str;

    /// One-line description for listings.
    fn description(&self) -> &str;

    /// Run the action.
    fn execute(&self) -> Result<TaskOutcome>;
}
