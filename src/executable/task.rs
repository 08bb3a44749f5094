//! Leaf executable.

use tracing::info;

use crate::error::ConstructionError;
use crate::resource::ResourcePool;

use super::context::{utilize_slots, ExecContext};
use super::error::ExecutionError;
use super::Executable;

/// A leaf in the execution tree.
///
/// Running a task exercises each of its assigned resources in order and
/// records the task's description and duration. It has no state beyond
/// the shared [`ExecContext`].
#[derive(Debug, Clone)]
pub struct Task {
    context: ExecContext,
}

impl Task {
    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Fails with [`ConstructionError`] on an empty name or a zero
    /// duration.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        required: impl IntoIterator<Item = impl Into<String>>,
        duration_units: u32,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            context: ExecContext::new(name, description, required, duration_units)?,
        })
    }
}

impl Executable for Task {
    fn context(&self) -> &ExecContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ExecContext {
        &mut self.context
    }

    fn execute(&mut self, pool: &mut ResourcePool) -> Result<(), ExecutionError> {
        if !self.context.is_fully_assigned() {
            return Err(ExecutionError::ResourcesNotAssigned(
                self.context.name().to_string(),
            ));
        }
        info!(
            task = %self.context.name(),
            description = %self.context.description(),
            duration_units = self.context.duration_units(),
            "executing task"
        );
        utilize_slots(pool, self.context.assigned_slots());
        Ok(())
    }
}
