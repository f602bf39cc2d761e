//! Access to the external task datastore.
//!
//! Results compilers never talk to the database directly: they receive a
//! [`UnitStore`] and ask it for the work units of a task. Every store keeps
//! its own error type, and callers see that error unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod local;
mod memory;

pub use local::LocalUnitDatabase;
pub use memory::InMemoryUnitStore;

/// Source of work units, queried by task name.
pub trait UnitStore {
    /// Error produced by this store; surfaced to callers as-is.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return the units registered for `task_name`, in datastore order.
    fn units_for_task(&self, task_name: &str) -> Result<Vec<WorkUnit>, Self::Error>;
}

/// Errors raised by the bundled datastores.
#[derive(Error, Debug)]
pub enum DatastoreError {
    /// No task with the requested name exists
    #[error("No task found with name '{task_name}'")]
    TaskNotFound {
        /// Task name that was looked up
        task_name: String,
    },

    /// Failure reported by SQLite
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Lifecycle state of a work unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    /// Created but not yet launched
    Created,
    /// Visible to workers
    Launched,
    /// Claimed by a worker
    Assigned,
    /// Submitted by the worker
    Completed,
    /// Reviewed and accepted
    Accepted,
    /// Timed out without a submission
    Expired,
    /// Rejected without penalising the worker
    SoftRejected,
    /// Reviewed and rejected
    Rejected,
}

impl UnitStatus {
    /// Statuses of units that carry a finished submission.
    pub const FINISHED: [UnitStatus; 4] = [
        UnitStatus::Completed,
        UnitStatus::Accepted,
        UnitStatus::Rejected,
        UnitStatus::SoftRejected,
    ];

    /// Whether the unit holds a submission worth compiling.
    pub fn is_finished(self) -> bool {
        Self::FINISHED.contains(&self)
    }

    /// Database representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitStatus::Created => "created",
            UnitStatus::Launched => "launched",
            UnitStatus::Assigned => "assigned",
            UnitStatus::Completed => "completed",
            UnitStatus::Accepted => "accepted",
            UnitStatus::Expired => "expired",
            UnitStatus::SoftRejected => "soft_rejected",
            UnitStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(UnitStatus::Created),
            "launched" => Ok(UnitStatus::Launched),
            "assigned" => Ok(UnitStatus::Assigned),
            "completed" => Ok(UnitStatus::Completed),
            "accepted" => Ok(UnitStatus::Accepted),
            "expired" => Ok(UnitStatus::Expired),
            "soft_rejected" => Ok(UnitStatus::SoftRejected),
            "rejected" => Ok(UnitStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// One crowdsourced submission slot as recorded by the task datastore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkUnit {
    /// Unit identifier
    pub unit_id: String,
    /// Assignment this unit belongs to
    pub assignment_id: String,
    /// Task run the assignment was launched in
    pub task_run_id: String,
    /// Position of the unit within its assignment
    pub unit_index: u32,
    /// Worker who took the unit, if any
    pub worker_id: Option<String>,
    /// Current lifecycle state
    pub status: UnitStatus,
    /// Crowd provider the unit was posted to
    pub provider_type: String,
    /// Payment attached to the unit
    pub pay_amount: f64,
}
