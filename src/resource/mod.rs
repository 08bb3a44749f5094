//! Resource abstraction and the two allocation disciplines.
//!
//! A resource is a named capability that executables must hold while
//! they run. Two disciplines exist: a [`ConsumableResource`] has finite
//! unit capacity that depletes permanently per allocation, and a
//! [`ReusableResource`] is a binary occupied/free lock with at most one
//! holder at a time. Resources live in a [`ResourcePool`] and are
//! addressed through opaque [`Slot`] handles.

mod consumable;
mod error;
mod pool;
mod reusable;
mod traits;

pub use consumable::ConsumableResource;
pub use error::AllocationError;
pub use pool::{ResourcePool, Slot};
pub use reusable::ReusableResource;
pub use traits::{ReleaseAnomaly, Resource, ResourceKind, UsageDetail, UsageSnapshot};
