//! Structured progress events emitted by a process run.
//!
//! Progress, skips, and release anomalies are reported as data rather
//! than printed text, so callers choose what to surface. The
//! [`ConsoleReporter`] renders the human-readable stream; the
//! [`NoOpReporter`] discards everything.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::resource::ReleaseAnomaly;

/// Events reported while a process drives its children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RunEvent {
    /// A standalone run began.
    ProcessStarted { name: String },
    /// The pool cannot satisfy the process's own requirements; nothing ran.
    ProcessUnableToStart { name: String },
    /// A child acquired its resources and began executing.
    TaskStarted {
        name: String,
        description: String,
        duration_units: u32,
    },
    /// A child executed and released successfully.
    TaskCompleted { name: String },
    /// A child was passed over because the pool cannot currently
    /// satisfy it. Not an error.
    TaskSkipped { name: String },
    /// A child failed to acquire or to run; the sequence continues.
    TaskFailed { name: String, error: String },
    /// A release gained nothing (depleted consumable or already-free
    /// reusable).
    ReleaseAnomaly {
        resource: String,
        anomaly: ReleaseAnomaly,
    },
    /// A standalone run finished driving its sequence.
    ProcessCompleted {
        name: String,
        executed: usize,
        skipped: usize,
        failed: usize,
    },
}

/// Receiver for [`RunEvent`]s during a process run.
pub trait RunReporter {
    fn report(&mut self, event: RunEvent);
}

/// Discards all events.
#[derive(Debug, Default)]
pub struct NoOpReporter;

impl RunReporter for NoOpReporter {
    fn report(&mut self, _event: RunEvent) {}
}

/// Renders events as human-readable lines on stdout.
///
/// The output is progress text for a person, not a format for callers
/// to parse.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl RunReporter for ConsoleReporter {
    fn report(&mut self, event: RunEvent) {
        match event {
            RunEvent::ProcessStarted { name } => {
                println!("Starting process '{name}'...");
            }
            RunEvent::ProcessUnableToStart { name } => {
                println!("Error in process '{name}': insufficient resources in pool to start");
            }
            RunEvent::TaskStarted {
                name,
                description,
                duration_units,
            } => {
                println!("  Executing '{name}': {description} (duration: {duration_units} units)");
            }
            RunEvent::TaskCompleted { name } => {
                println!("  '{name}' completed");
            }
            RunEvent::TaskSkipped { name } => {
                println!("  '{name}' skipped: insufficient resources");
            }
            RunEvent::TaskFailed { name, error } => {
                println!("  Error in '{name}': {error}");
            }
            RunEvent::ReleaseAnomaly { resource, anomaly } => {
                println!("  Warning: resource '{resource}' {anomaly}");
            }
            RunEvent::ProcessCompleted {
                name,
                executed,
                skipped,
                failed,
            } => {
                println!(
                    "Process '{name}' completed ({executed} executed, {skipped} skipped, {failed} failed)"
                );
            }
        }
    }
}
