//! Consumable resource: finite capacity, depleted irreversibly.

use tracing::{debug, warn};

use crate::error::ConstructionError;
use crate::Id;

use super::error::AllocationError;
use super::traits::{ReleaseAnomaly, Resource, ResourceKind, UsageDetail, UsageSnapshot};

/// A resource with finite unit capacity that depletes per allocation.
///
/// Models a consumable budget (e.g. memory charged per task): each
/// allocation burns one unit permanently, and a release does not give
/// the unit back. Once `remaining_capacity` reaches zero the resource
/// reports unavailable forever; there is no reset or refill operation,
/// and an exhausted value stays exhausted for its whole lifetime.
/// Each instance carries an auto-generated unique ID alongside its
/// human-readable `name`.
///
/// # Invariants
///
/// - `remaining_capacity` only ever decreases
/// - `remaining_capacity <= total_capacity`
/// - `is_available_for_use() == (remaining_capacity > 0)`
#[derive(Debug, Clone)]
pub struct ConsumableResource {
    id: Id,
    name: String,
    total_capacity: u32,
    remaining_capacity: u32,
}

impl ConsumableResource {
    /// Creates a consumable resource with the given name and unit capacity.
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
            total_capacity: capacity,
            remaining_capacity: capacity,
        })
    }

    /// Returns the unique auto-generated identifier for this resource.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the immutable total capacity.
    pub fn total_capacity(&self) -> u32 {
        self.total_capacity
    }

    /// Returns the capacity still unconsumed.
    pub fn remaining_capacity(&self) -> u32 {
        self.remaining_capacity
    }
}

impl Resource for ConsumableResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Consumable
    }

    fn is_available_for_use(&self) -> bool {
        self.remaining_capacity > 0
    }

    fn allocate(&mut self) -> Result<(), AllocationError> {
        if self.remaining_capacity == 0 {
            return Err(AllocationError::Exhausted(self.name.clone()));
        }
        self.remaining_capacity -= 1;
        Ok(())
    }

    fn release(&mut self) -> Option<ReleaseAnomaly> {
        // Capacity is never restored; only availability is recomputed.
        if self.remaining_capacity == 0 {
            warn!(
                resource = %self.name,
                "consumable resource is depleted and cannot be reused without replenishment"
            );
            return Some(ReleaseAnomaly::Depleted);
        }
        None
    }

    fn utilize(&self) -> UsageSnapshot {
        debug!(
            resource = %self.name,
            remaining = self.remaining_capacity,
            total = self.total_capacity,
            "using consumable resource"
        );
        UsageSnapshot {
            name: self.name.clone(),
            kind: ResourceKind::Consumable,
            detail: UsageDetail::Consumable {
                remaining: self.remaining_capacity,
                total: self.total_capacity,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            ConsumableResource::new("", 4).unwrap_err(),
            ConstructionError::EmptyName
        );
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            ConsumableResource::new("Memory", 0).unwrap_err(),
            ConstructionError::NonPositiveCapacity {
                name: "Memory".to_string()
            }
        );
    }

    #[test]
    fn allocate_decrements_by_one() {
        let mut r = ConsumableResource::new("Memory", 3).unwrap();
        r.allocate().unwrap();
        assert_eq!(r.remaining_capacity(), 2);
        assert_eq!(r.total_capacity(), 3);
        assert!(r.is_available_for_use());
    }

    #[test]
    fn depletes_after_capacity_allocations() {
        let mut r = ConsumableResource::new("Memory", 2).unwrap();
        r.allocate().unwrap();
        r.allocate().unwrap();
        assert!(!r.is_available_for_use());
        assert_eq!(
            r.allocate().unwrap_err(),
            AllocationError::Exhausted("Memory".to_string())
        );
    }

    #[test]
    fn release_does_not_restore_capacity() {
        let mut r = ConsumableResource::new("Memory", 1).unwrap();
        r.allocate().unwrap();
        assert_eq!(r.release(), Some(ReleaseAnomaly::Depleted));
        assert_eq!(r.remaining_capacity(), 0);
        assert!(!r.is_available_for_use());
    }

    #[test]
    fn release_with_capacity_left_is_silent() {
        let mut r = ConsumableResource::new("Memory", 2).unwrap();
        r.allocate().unwrap();
        assert_eq!(r.release(), None);
        assert_eq!(r.remaining_capacity(), 1);
    }

    #[test]
    fn utilize_reports_remaining_over_total() {
        let mut r = ConsumableResource::new("Memory", 4).unwrap();
        r.allocate().unwrap();
        let snapshot = r.utilize();
        assert_eq!(snapshot.kind, ResourceKind::Consumable);
        assert_eq!(
            snapshot.detail,
            UsageDetail::Consumable {
                remaining: 3,
                total: 4
            }
        );
        // Observability only: availability unchanged.
        assert!(r.is_available_for_use());
    }

    #[test]
    fn ids_are_unique() {
        let a = ConsumableResource::new("Memory", 1).unwrap();
        let b = ConsumableResource::new("Memory", 1).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
