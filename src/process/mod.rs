//! Composite process: a resource pool plus an ordered child sequence.


use std::fmt;

use tracing::{error, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::event::{NoOpReporter, RunEvent, RunReporter};
use crate::executable::{utilize_slots, ExecContext, Executable, ExecutionError};
use crate::resource::{Resource, ResourcePool};

/// Terminal state of one child within a run.
///
/// Each child moves through `pending -> availability check ->
/// { skipped | acquire -> execute -> release }`; what lands here is the
/// terminal state of that walk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChildOutcome {
    /// Acquired, executed, and released.
    Completed,
    /// Passed over pre-emptively: the pool could not satisfy the
    /// child's requirements. Not an error.
    Skipped,
    /// Acquisition or execution errored; resources were released and
    /// the sequence continued.
    Failed(String),
}

/// Per-child record in a [`RunSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChildRecord {
    pub name: String,
    pub outcome: ChildOutcome,
}

/// Structured result of a standalone process run.
///
/// A run that could not start (`started == false`) has no child
/// records. Skips and child failures do not make a run a failure; the
/// process reports completion as long as it started.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    pub name: String,
    pub started: bool,
    pub children: Vec<ChildRecord>,
}

impl RunSummary {
    pub fn executed(&self) -> usize {
        self.children
            .iter()
            .filter(|c| c.outcome == ChildOutcome::Completed)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.children
            .iter()
            .filter(|c| c.outcome == ChildOutcome::Skipped)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.children
            .iter()
            .filter(|c| matches!(c.outcome, ChildOutcome::Failed(_)))
            .count()
    }
}

/// An executable that owns a resource pool and an ordered sequence of
/// sub-executables.
///
/// The pool is shared by the process and every child during a run:
/// children borrow resources for the duration of their own run and
/// release them before the next child starts. Children run strictly
/// sequentially, in insertion order, with continue-on-error semantics:
/// one child being skipped or failing never aborts the remaining
/// sequence.
///
/// A process may itself declare required resource names. Used
/// standalone via [`run`](Self::run), it acquires those from its own
/// pool before driving the children and releases them afterward. Nested
/// as a child of another process, it is driven through the
/// [`Executable`] protocol like any other child, acquiring from the
/// parent's pool while its own children keep using its own.
pub struct Process {
    context: ExecContext,
    pool: ResourcePool,
    children: Vec<Box<dyn Executable>>,
}

impl Process {
    /// Creates a process.
    ///
    /// # Errors
    ///
    /// Fails with [`ConstructionError`] on an empty name or a zero
    /// duration.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        required: impl IntoIterator<Item = impl Into<String>>,
        duration_units: u32,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            context: ExecContext::new(name, description, required, duration_units)?,
            pool: ResourcePool::new(),
            children: Vec::new(),
        })
    }

    /// Appends a resource to the owned pool. No duplicate-name
    /// validation; insertion order is first-fit scan order.
    pub fn add_resource(&mut self, resource: impl Resource + 'static) {
        self.pool.add(resource);
    }

    /// Appends an executable to the child sequence. Insertion order is
    /// execution order.
    pub fn add_child(&mut self, child: impl Executable + 'static) {
        self.children.push(Box::new(child));
    }

    /// Returns the owned pool, for inspection after a run.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn children(&self) -> &[Box<dyn Executable>] {
        &self.children
    }

    /// Runs the process standalone, discarding progress events.
    ///
    /// Equivalent to [`run_with_reporter`](Self::run_with_reporter)
    /// with a [`NoOpReporter`]; tracing output is emitted either way.
    pub fn run(&mut self) -> RunSummary {
        self.run_with_reporter(&mut NoOpReporter)
    }

    /// Runs the process standalone as the top-level entry point.
    ///
    /// If the process declares no required resources, or its own pool
    /// can currently satisfy them, it self-acquires, drives every child
    /// through its acquire/execute/release cycle, self-releases, and
    /// reports completion. Otherwise it reports itself unable to start.
    /// Every error below construction is contained here: the returned
    /// summary is the only outcome.
    pub fn run_with_reporter(&mut self, reporter: &mut dyn RunReporter) -> RunSummary {
        let name = self.context.name().to_string();
        reporter.report(RunEvent::ProcessStarted { name: name.clone() });
        info!(process = %name, "starting process");

        let ready = self.context.required_resource_names().is_empty()
            || self.context.can_execute(&self.pool);
        if !ready {
            error!(process = %name, "insufficient resources in pool to start");
            reporter.report(RunEvent::ProcessUnableToStart { name: name.clone() });
            return RunSummary {
                name,
                started: false,
                children: Vec::new(),
            };
        }

        if !self.context.required_resource_names().is_empty() {
            if let Err(e) = self.context.assign_resources(&mut self.pool) {
                // The pre-check passed, so only an availability change
                // between scan and allocation lands here.
                error!(process = %name, error = %e, "failed to acquire process resources");
                reporter.report(RunEvent::ProcessUnableToStart { name: name.clone() });
                return RunSummary {
                    name,
                    started: false,
                    children: Vec::new(),
                };
            }
        }

        info!(
            process = %name,
            description = %self.context.description(),
            duration_units = self.context.duration_units(),
            "executing process"
        );
        utilize_slots(&self.pool, self.context.assigned_slots());

        let children = self.run_children(reporter);

        for (resource, anomaly) in self.context.release_resources(&mut self.pool) {
            reporter.report(RunEvent::ReleaseAnomaly { resource, anomaly });
        }

        let summary = RunSummary {
            name,
            started: true,
            children,
        };
        reporter.report(RunEvent::ProcessCompleted {
            name: summary.name.clone(),
            executed: summary.executed(),
            skipped: summary.skipped(),
            failed: summary.failed(),
        });
        info!(
            process = %summary.name,
            executed = summary.executed(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "process completed"
        );
        summary
    }

    /// Drives each child through availability check, acquisition,
    /// execution, and release, continuing past individual failures.
    fn run_children(&mut self, reporter: &mut dyn RunReporter) -> Vec<ChildRecord> {
        let mut records = Vec::with_capacity(self.children.len());

        for child in &mut self.children {
            let name = child.name().to_string();

            if !child.can_execute(&self.pool) {
                warn!(child = %name, "skipped: insufficient resources");
                reporter.report(RunEvent::TaskSkipped { name: name.clone() });
                records.push(ChildRecord {
                    name,
                    outcome: ChildOutcome::Skipped,
                });
                continue;
            }

            let outcome = match child.assign_resources(&mut self.pool) {
                Err(e) => {
                    error!(child = %name, error = %e, "failed to acquire resources");
                    ChildOutcome::Failed(e.to_string())
                }
                Ok(()) => {
                    reporter.report(RunEvent::TaskStarted {
                        name: name.clone(),
                        description: child.description().to_string(),
                        duration_units: child.duration_units(),
                    });
                    match child.execute(&mut self.pool) {
                        Ok(()) => ChildOutcome::Completed,
                        Err(e) => {
                            error!(child = %name, error = %e, "child execution failed");
                            ChildOutcome::Failed(e.to_string())
                        }
                    }
                }
            };

            // Release runs after success and failure alike; after a
            // failed acquisition it is a no-op.
            for (resource, anomaly) in child.release_resources(&mut self.pool) {
                reporter.report(RunEvent::ReleaseAnomaly { resource, anomaly });
            }

            match &outcome {
                ChildOutcome::Completed => {
                    reporter.report(RunEvent::TaskCompleted { name: name.clone() })
                }
                ChildOutcome::Failed(e) => reporter.report(RunEvent::TaskFailed {
                    name: name.clone(),
                    error: e.clone(),
                }),
                ChildOutcome::Skipped => {}
            }
            records.push(ChildRecord { name, outcome });
        }

        records
    }
}

impl Executable for Process {
    fn context(&self) -> &ExecContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ExecContext {
        &mut self.context
    }

    /// Runs the process as a nested executable.
    ///
    /// The process's own resources were assigned from the caller's
    /// pool; the children keep acquiring from the process's own pool.
    /// Child-level skips and failures stay contained, exactly as in a
    /// standalone run.
    fn execute(&mut self, pool: &mut ResourcePool) -> Result<(), ExecutionError> {
        if !self.context.is_fully_assigned() {
            return Err(ExecutionError::ResourcesNotAssigned(
                self.context.name().to_string(),
            ));
        }
        info!(
            process = %self.context.name(),
            description = %self.context.description(),
            duration_units = self.context.duration_units(),
            "executing nested process"
        );
        utilize_slots(pool, self.context.assigned_slots());
        self.run_children(&mut NoOpReporter);
        Ok(())
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("context", &self.context)
            .field("pool", &self.pool)
            .field("children", &self.children.len())
            .finish()
    }
}
