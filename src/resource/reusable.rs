//! Reusable resource: a mutual-exclusion lock with at most one holder.

use tracing::{debug, warn};

use crate::error::ConstructionError;
use crate::Id;

use super::error::AllocationError;
use super::traits::{ReleaseAnomaly, Resource, ResourceKind, UsageDetail, UsageSnapshot};

/// A resource with a binary occupied/free state.
///
/// Models mutual exclusion (e.g. a CPU core): at most one holder at a
/// time, available again as soon as the holder releases it. The
/// `capacity` field is descriptive only (e.g. clock rate) and is never
/// consumed.
#[derive(Debug, Clone)]
pub struct ReusableResource {
    id: Id,
    name: String,
    capacity: u32,
    in_use: bool,
}

impl ReusableResource {
    /// Creates a reusable resource with the given name and descriptive capacity.
    ///
    /// # Errors
    ///
    /// - `EmptyName` if `name` is empty
    /// - `NonPositiveCapacity` if `capacity` is zero
    pub fn new(name: impl Into<String>, capacity: u32) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        if capacity == 0 {
            return Err(ConstructionError::NonPositiveCapacity { name });
        }
        Ok(Self {
            id: crate::generate_id(),
            name,
            capacity,
            in_use: false,
        })
    }

    /// Returns the unique auto-generated identifier for this resource.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the descriptive capacity (never consumed).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl Resource for ReusableResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Reusable
    }

    fn is_available_for_use(&self) -> bool {
        !self.in_use
    }

    fn allocate(&mut self) -> Result<(), AllocationError> {
        if self.in_use {
            return Err(AllocationError::Occupied(self.name.clone()));
        }
        self.in_use = true;
        Ok(())
    }

    fn release(&mut self) -> Option<ReleaseAnomaly> {
        let anomaly = if self.in_use {
            None
        } else {
            warn!(resource = %self.name, "attempted to release an already free reusable resource");
            Some(ReleaseAnomaly::AlreadyFree)
        };
        self.in_use = false;
        anomaly
    }

    fn utilize(&self) -> UsageSnapshot {
        debug!(
            resource = %self.name,
            capacity = self.capacity,
            "using reusable resource"
        );
        UsageSnapshot {
            name: self.name.clone(),
            kind: ResourceKind::Reusable,
            detail: UsageDetail::Reusable {
                capacity: self.capacity,
            },
        }
    }
}
