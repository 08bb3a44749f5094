use thiserror::Error;

/// Errors raised by a resource refusing an allocation.
///
/// Raised by [`Resource::allocate`](super::Resource::allocate) and
/// caught by the acquisition pass, which converts it into an
/// acquisition failure for the requesting executable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("consumable resource '{0}' has no remaining capacity")]
    Exhausted(String),

    #[error("reusable resource '{0}' is already allocated")]
    Occupied(String),
}
