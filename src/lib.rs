//! taskpool - resource-constrained sequential execution pipelines
//!
//! A simulation library in which a [`Process`] owns a pool of finite
//! resources and drives an ordered sequence of executables. Each
//! executable declares the resource names it needs, acquires matching
//! resources from the pool before running, and releases them afterward.
//! Two resource kinds implement allocation differently: a
//! [`ConsumableResource`] depletes permanently per allocation, while a
//! [`ReusableResource`] is a mutual-exclusion lock that frees on release.

pub mod error;
pub mod event;
pub mod executable;
pub mod process;
pub mod resource;

pub use error::ConstructionError;
pub use event::{ConsoleReporter, NoOpReporter, RunEvent, RunReporter};
pub use executable::{ExecContext, Executable, ExecutionError, Task};
pub use process::{ChildOutcome, ChildRecord, Process, RunSummary};
pub use resource::{
    AllocationError, ConsumableResource, ReleaseAnomaly, Resource, ResourceKind, ResourcePool,
    ReusableResource, Slot, UsageDetail, UsageSnapshot,
};

/// Identifier type used for resources and executables.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
