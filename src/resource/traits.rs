//! Resource capability trait definition.

use std::fmt::{self, Debug};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::AllocationError;

/// Allocation discipline of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    /// Finite unit capacity, consumed irreversibly per allocation.
    Consumable,
    /// Mutual exclusion: occupied while held, free again after release.
    Reusable,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Consumable => write!(f, "consumable"),
            ResourceKind::Reusable => write!(f, "reusable"),
        }
    }
}

/// Warning condition observed on a release that gains nothing.
///
/// Anomalies are reported, never raised: a release always succeeds, and
/// an anomalous one never aborts anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReleaseAnomaly {
    /// A reusable resource was released while already free.
    AlreadyFree,
    /// A consumable resource was released after exhausting its capacity;
    /// release cannot bring it back.
    Depleted,
}

impl fmt::Display for ReleaseAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseAnomaly::AlreadyFree => write!(f, "released while already free"),
            ReleaseAnomaly::Depleted => write!(f, "released while depleted"),
        }
    }
}

/// Structured record produced by [`Resource::utilize`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UsageSnapshot {
    pub name: String,
    pub kind: ResourceKind,
    pub detail: UsageDetail,
}

/// Kind-specific payload of a [`UsageSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UsageDetail {
    /// Remaining and total unit capacity of a consumable resource.
    Consumable { remaining: u32, total: u32 },
    /// Descriptive capacity (e.g. clock rate) of a reusable resource.
    Reusable { capacity: u32 },
}

/// A named capability that executables hold while they run.
///
/// The contract is a strict allocate/release protocol layered over a
/// pure availability query:
///
/// 1. `is_available_for_use` reports whether an allocation would
///    currently succeed, without reserving anything.
/// 2. `allocate` claims the resource; it must never succeed when
///    `is_available_for_use()` is false at call time.
/// 3. `release` gives the claim back. It never fails; a release that
///    gains nothing (depleted consumable, already-free reusable) is
///    reported as a [`ReleaseAnomaly`] instead.
/// 4. `utilize` is the "perform the work" hook. It has no effect on
///    availability and exists for observability only.
///
/// Names identify resources within a pool by convention; uniqueness is
/// not enforced, and the first-fit acquisition pass takes the first
/// available match.
pub trait Resource: Debug {
    /// Returns the human-readable name of this resource.
    fn name(&self) -> &str;

    /// Returns the allocation discipline of this resource.
    fn kind(&self) -> ResourceKind;

    /// Reports whether an allocation would currently succeed.
    ///
    /// Pure query: no side effects, nothing reserved.
    fn is_available_for_use(&self) -> bool;

    /// Claims the resource.
    ///
    /// # Errors
    ///
    /// Fails with [`AllocationError`] when the resource is unavailable;
    /// on success the internal state reflects the consumption so a
    /// subsequent availability check sees it.
    fn allocate(&mut self) -> Result<(), AllocationError>;

    /// Gives a claim back.
    ///
    /// Never fails. Returns `Some` when the call had no useful effect.
    fn release(&mut self) -> Option<ReleaseAnomaly>;

    /// Performs the resource's unit of observable work.
    ///
    /// Availability is untouched; the returned snapshot is the only
    /// product.
    fn utilize(&self) -> UsageSnapshot;
}
