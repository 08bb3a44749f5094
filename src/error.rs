use thiserror::Error;

/// Errors raised while constructing resources or executables.
///
/// Construction validation is the only error class that propagates
/// unhandled: a value that fails these checks never exists, so there is
/// nothing for the run machinery to contain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("duration for '{name}' must be positive")]
    NonPositiveDuration { name: String },

    #[error("capacity for resource '{name}' must be positive")]
    NonPositiveCapacity { name: String },
}
