//! In-memory unit store for tests and dry runs.

use indexmap::IndexMap;

use super::{DatastoreError, UnitStore, WorkUnit};

/// Unit store backed by a map of task name to units.
///
/// Unknown tasks produce [`DatastoreError::TaskNotFound`], the same as the
/// SQLite reader.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitStore {
    tasks: IndexMap<String, Vec<WorkUnit>>,
}

impl InMemoryUnitStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `units` under `task_name`, replacing any previous entry.
    pub fn with_task(mut self, task_name: impl Into<String>, units: Vec<WorkUnit>) -> Self {
        self.tasks.insert(task_name.into(), units);
        self
    }
}

impl UnitStore for InMemoryUnitStore {
    type Error = DatastoreError;

    fn units_for_task(&self, task_name: &str) -> Result<Vec<WorkUnit>, DatastoreError> {
        self.tasks
            .get(task_name)
            .cloned()
            .ok_or_else(|| DatastoreError::TaskNotFound {
                task_name: task_name.to_string(),
            })
    }
}
