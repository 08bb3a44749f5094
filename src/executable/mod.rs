//! Executable abstraction: entities that acquire resources and run.
//!
//! An executable declares an ordered list of required resource names
//! and a descriptive duration. The shared acquisition and release logic
//! lives on the embedded [`ExecContext`] rather than in the trait, so
//! leaf tasks and composite processes call it instead of inheriting it.

mod context;
mod error;
mod task;

pub use context::ExecContext;
pub use error::ExecutionError;
pub use task::Task;

pub(crate) use context::utilize_slots;

use std::fmt::Debug;

use crate::resource::{ReleaseAnomaly, ResourcePool};

/// An entity that acquires named resources from a pool and runs.
///
/// Implementors store their common state in an [`ExecContext`] and
/// expose it via `context`/`context_mut`; every provided method
/// delegates there. The only subtype-specific behavior is [`execute`],
/// which may assume a full resource assignment and must fail with
/// [`ExecutionError::ResourcesNotAssigned`] otherwise.
///
/// The acquire protocol, driven by the caller:
///
/// 1. `can_execute(pool)` — pure pre-check, reserves nothing
/// 2. `assign_resources(pool)` — first-fit acquisition with rollback
/// 3. `execute(pool)` — the run itself
/// 4. `release_resources(pool)` — always, success or failure
///
/// [`execute`]: Executable::execute
pub trait Executable: Debug {
    /// Returns the shared executable state.
    fn context(&self) -> &ExecContext;

    /// Returns the shared executable state, mutably.
    fn context_mut(&mut self) -> &mut ExecContext;

    /// Runs this executable against the pool its resources were
    /// assigned from.
    ///
    /// # Errors
    ///
    /// `ResourcesNotAssigned` when invoked without a one-to-one
    /// assignment of the required names; subtype-specific errors
    /// otherwise.
    fn execute(&mut self, pool: &mut ResourcePool) -> Result<(), ExecutionError>;

    fn name(&self) -> &str {
        self.context().name()
    }

    fn description(&self) -> &str {
        self.context().description()
    }

    fn duration_units(&self) -> u32 {
        self.context().duration_units()
    }

    fn required_resource_names(&self) -> &[String] {
        self.context().required_resource_names()
    }

    /// Pure query: can every required name currently be matched by an
    /// available resource in the pool?
    fn can_execute(&self, pool: &ResourcePool) -> bool {
        self.context().can_execute(pool)
    }

    /// First-fit acquisition pass over the pool. See
    /// [`ExecContext::assign_resources`].
    fn assign_resources(&mut self, pool: &mut ResourcePool) -> Result<(), ExecutionError> {
        self.context_mut().assign_resources(pool)
    }

    /// Releases everything currently held. See
    /// [`ExecContext::release_resources`].
    fn release_resources(&mut self, pool: &mut ResourcePool) -> Vec<(String, ReleaseAnomaly)> {
        self.context_mut().release_resources(pool)
    }
}
