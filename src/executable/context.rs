//! Shared executable state: identity, requirements, and the
//! acquisition/release machinery.

use tracing::warn;

use crate::error::ConstructionError;
use crate::resource::{ReleaseAnomaly, ResourcePool, Slot};
use crate::Id;

use super::error::ExecutionError;

/// Common state embedded in every executable.
///
/// Holds identity (auto-generated ID plus human-readable name), the
/// ordered list of required resource names, the descriptive duration,
/// and the transient resource assignment. The assignment is empty at
/// construction, populated by [`assign_resources`](Self::assign_resources)
/// immediately before a run attempt, and cleared by
/// [`release_resources`](Self::release_resources) immediately after,
/// success or failure.
#[derive(Debug, Clone)]
pub struct ExecContext {
    id: Id,
    name: String,
    description: String,
    required: Vec<String>,
    duration_units: u32,
    assigned: Vec<Slot>,
}

impl ExecContext {
    /// Creates the shared state for an executable.
    ///
    /// # Errors
    ///
    /// - `EmptyName` if `name` is empty
    /// - `NonPositiveDuration` if `duration_units` is zero
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        required: impl IntoIterator<Item = impl Into<String>>,
        duration_units: u32,
    ) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        if duration_units == 0 {
            return Err(ConstructionError::NonPositiveDuration { name });
        }
        Ok(Self {
            id: crate::generate_id(),
            name,
            description: description.into(),
            required: required.into_iter().map(Into::into).collect(),
            duration_units,
            assigned: Vec::new(),
        })
    }

    /// Returns the unique auto-generated identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the required resource names in declared order.
    pub fn required_resource_names(&self) -> &[String] {
        &self.required
    }

    /// Returns the descriptive execution duration. Never consumed by a
    /// clock.
    pub fn duration_units(&self) -> u32 {
        self.duration_units
    }

    /// Returns the slots currently assigned, in required-name order.
    pub fn assigned_slots(&self) -> &[Slot] {
        &self.assigned
    }

    /// True when the assignment satisfies the required names
    /// one-to-one. Trivially true for an executable requiring nothing.
    pub fn is_fully_assigned(&self) -> bool {
        self.assigned.len() == self.required.len()
    }

    /// Pure query: does the pool currently hold an available match for
    /// every required name?
    ///
    /// Reserves nothing, so the answer can go stale between this check
    /// and the acquisition pass; callers re-validate by acquiring.
    pub fn can_execute(&self, pool: &ResourcePool) -> bool {
        self.required.iter().all(|name| pool.has_available(name))
    }

    /// First-fit acquisition pass over the pool.
    ///
    /// Clears any prior assignment, then matches each required name, in
    /// declared order, to the first available resource with that name
    /// and allocates it. A resource allocated earlier in the pass
    /// reports unavailable, so duplicate required names claim distinct
    /// instances.
    ///
    /// # Errors
    ///
    /// `ResourceUnavailable` naming the first unmatched requirement.
    /// Everything acquired earlier in the pass is released before the
    /// error returns, so a failed pass leaves the pool as it found it
    /// (minus consumable units already burned by other runs).
    pub fn assign_resources(&mut self, pool: &mut ResourcePool) -> Result<(), ExecutionError> {
        self.assigned.clear();
        let mut acquired: Vec<Slot> = Vec::with_capacity(self.required.len());

        for name in &self.required {
            let slot = match pool.find_available(name) {
                Some(slot) => slot,
                None => {
                    release_slots(pool, &acquired, &self.name);
                    return Err(ExecutionError::ResourceUnavailable {
                        resource: name.clone(),
                        executable: self.name.clone(),
                    });
                }
            };
            // A refusal here means the availability check went stale;
            // treat it the same as no match at all.
            let allocated = pool
                .get_mut(slot)
                .map(|resource| resource.allocate().is_ok())
                .unwrap_or(false);
            if !allocated {
                release_slots(pool, &acquired, &self.name);
                return Err(ExecutionError::ResourceUnavailable {
                    resource: name.clone(),
                    executable: self.name.clone(),
                });
            }
            acquired.push(slot);
        }

        self.assigned = acquired;
        Ok(())
    }

    /// Releases every currently assigned resource and clears the
    /// assignment.
    ///
    /// Never fails; anomalous releases are logged and returned for the
    /// caller to surface or ignore. Calling with nothing assigned is a
    /// no-op.
    pub fn release_resources(&mut self, pool: &mut ResourcePool) -> Vec<(String, ReleaseAnomaly)> {
        let slots = std::mem::take(&mut self.assigned);
        release_slots(pool, &slots, &self.name)
    }
}

/// Releases the given slots, collecting anomalies.
fn release_slots(
    pool: &mut ResourcePool,
    slots: &[Slot],
    owner: &str,
) -> Vec<(String, ReleaseAnomaly)> {
    let mut anomalies = Vec::new();
    for &slot in slots {
        if let Some(resource) = pool.get_mut(slot) {
            let name = resource.name().to_string();
            if let Some(anomaly) = resource.release() {
                warn!(owner = %owner, resource = %name, %anomaly, "release had no effect");
                anomalies.push((name, anomaly));
            }
        }
    }
    anomalies
}

/// Invokes the work hook on each assigned resource in order.
pub(crate) fn utilize_slots(pool: &ResourcePool, slots: &[Slot]) {
    for &slot in slots {
        if let Some(resource) = pool.get(slot) {
            resource.utilize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ConsumableResource, Resource, ReusableResource};

    fn cpu_memory_pool() -> ResourcePool {
        let mut pool = ResourcePool::new();
        pool.add(ReusableResource::new("CentralProcessingUnit", 3).unwrap());
        pool.add(ConsumableResource::new("Memory", 4).unwrap());
        pool
    }

    fn context(required: &[&str]) -> ExecContext {
        ExecContext::new("Stage", "a pipeline stage", required.to_vec(), 2).unwrap()
    }

    #[test]
    fn rejects_empty_name() {
        let err = ExecContext::new("", "d", Vec::<String>::new(), 1).unwrap_err();
        assert_eq!(err, ConstructionError::EmptyName);
    }

    #[test]
    fn rejects_zero_duration() {
        let err = ExecContext::new("Stage", "d", Vec::<String>::new(), 0).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::NonPositiveDuration {
                name: "Stage".to_string()
            }
        );
    }

    #[test]
    fn assigns_one_resource_per_required_name() {
        let mut pool = cpu_memory_pool();
        let mut ctx = context(&["CentralProcessingUnit", "Memory"]);

        ctx.assign_resources(&mut pool).unwrap();
        assert!(ctx.is_fully_assigned());
        assert_eq!(ctx.assigned_slots().len(), 2);
        // Reusable is held, consumable burned one unit.
        assert!(!pool.has_available("CentralProcessingUnit"));
        assert!(pool.has_available("Memory"));
    }

    #[test]
    fn failed_pass_rolls_back_partial_acquisitions() {
        let mut pool = ResourcePool::new();
        pool.add(ReusableResource::new("CentralProcessingUnit", 3).unwrap());
        let mut ctx = context(&["CentralProcessingUnit", "Memory"]);

        let err = ctx.assign_resources(&mut pool).unwrap_err();
        assert_eq!(
            err,
            ExecutionError::ResourceUnavailable {
                resource: "Memory".to_string(),
                executable: "Stage".to_string(),
            }
        );
        assert!(ctx.assigned_slots().is_empty());
        // The CPU acquired before the failure is available again.
        assert!(pool.has_available("CentralProcessingUnit"));
    }

    #[test]
    fn duplicate_required_names_claim_distinct_instances() {
        let mut pool = ResourcePool::new();
        pool.add(ReusableResource::new("CentralProcessingUnit", 3).unwrap());
        pool.add(ReusableResource::new("CentralProcessingUnit", 3).unwrap());
        let mut ctx = context(&["CentralProcessingUnit", "CentralProcessingUnit"]);

        ctx.assign_resources(&mut pool).unwrap();
        let slots = ctx.assigned_slots();
        assert_ne!(slots[0], slots[1]);
    }

    #[test]
    fn duplicate_required_names_fail_on_single_instance() {
        let mut pool = ResourcePool::new();
        pool.add(ReusableResource::new("CentralProcessingUnit", 3).unwrap());
        let mut ctx = context(&["CentralProcessingUnit", "CentralProcessingUnit"]);

        // The one instance is claimed by the first name and reports
        // unavailable for the second.
        assert!(ctx.assign_resources(&mut pool).is_err());
        assert!(pool.has_available("CentralProcessingUnit"));
    }

    #[test]
    fn can_execute_is_pure() {
        let pool = cpu_memory_pool();
        let ctx = context(&["CentralProcessingUnit", "Memory"]);
        assert!(ctx.can_execute(&pool));
        assert!(ctx.can_execute(&pool));
        assert!(pool.has_available("CentralProcessingUnit"));
    }

    #[test]
    fn can_execute_with_no_requirements_is_true_on_empty_pool() {
        let pool = ResourcePool::new();
        let ctx = context(&[]);
        assert!(ctx.can_execute(&pool));
    }

    #[test]
    fn can_execute_false_when_a_name_is_missing() {
        let pool = cpu_memory_pool();
        let ctx = context(&["CentralProcessingUnit", "Disk"]);
        assert!(!ctx.can_execute(&pool));
    }

    #[test]
    fn release_returns_reusables_and_clears_assignment() {
        let mut pool = cpu_memory_pool();
        let mut ctx = context(&["CentralProcessingUnit", "Memory"]);
        ctx.assign_resources(&mut pool).unwrap();

        let anomalies = ctx.release_resources(&mut pool);
        assert!(anomalies.is_empty());
        assert!(ctx.assigned_slots().is_empty());
        assert!(pool.has_available("CentralProcessingUnit"));
    }

    #[test]
    fn release_twice_with_nothing_assigned_is_a_no_op() {
        let mut pool = cpu_memory_pool();
        let mut ctx = context(&["CentralProcessingUnit"]);
        assert!(ctx.release_resources(&mut pool).is_empty());
        assert!(ctx.release_resources(&mut pool).is_empty());
    }

    #[test]
    fn release_after_depletion_reports_anomaly() {
        let mut pool = ResourcePool::new();
        pool.add(ConsumableResource::new("Memory", 1).unwrap());
        let mut ctx = context(&["Memory"]);
        ctx.assign_resources(&mut pool).unwrap();

        let anomalies = ctx.release_resources(&mut pool);
        assert_eq!(
            anomalies,
            vec![("Memory".to_string(), ReleaseAnomaly::Depleted)]
        );
        assert!(!pool.has_available("Memory"));
    }

    #[test]
    fn reassignment_restarts_the_acquisition() {
        let mut pool = cpu_memory_pool();
        let mut ctx = context(&["Memory"]);
        ctx.assign_resources(&mut pool).unwrap();
        ctx.release_resources(&mut pool);

        ctx.assign_resources(&mut pool).unwrap();
        assert_eq!(ctx.assigned_slots().len(), 1);
        let memory = pool.get(ctx.assigned_slots()[0]).unwrap();
        assert_eq!(memory.name(), "Memory");
    }
}
