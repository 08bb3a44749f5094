use thiserror::Error;

/// Errors raised while starting or running an executable.
///
/// Neither variant escapes a process run: the composite catches them
/// per child and continues the sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The acquisition pass found no available match for a required
    /// name. Partial acquisitions have already been rolled back.
    #[error("resource '{resource}' not available for '{executable}'")]
    ResourceUnavailable {
        resource: String,
        executable: String,
    },

    /// A run was invoked without a one-to-one resource assignment.
    /// Caller protocol violation (acquire before run); fatal to that
    /// attempt only.
    #[error("resources not properly assigned for '{0}'")]
    ResourcesNotAssigned(String),
}
