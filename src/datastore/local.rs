//! SQLite-backed reader for the local task database.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::{debug, warn};

use super::{DatastoreError, UnitStatus, UnitStore, WorkUnit};

/// Environment variable overriding the database location.
pub const DATABASE_PATH_ENV: &str = "CROWDSIFT_DB";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tasks (
        task_id         INTEGER PRIMARY KEY,
        task_name       TEXT NOT NULL,
        task_type       TEXT NOT NULL DEFAULT 'mock',
        creation_date   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS task_runs (
        task_run_id     INTEGER PRIMARY KEY,
        task_id         INTEGER NOT NULL REFERENCES tasks(task_id),
        provider_type   TEXT NOT NULL DEFAULT 'mock',
        creation_date   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS assignments (
        assignment_id   INTEGER PRIMARY KEY,
        task_run_id     INTEGER NOT NULL REFERENCES task_runs(task_run_id),
        creation_date   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS units (
        unit_id         INTEGER PRIMARY KEY,
        assignment_id   INTEGER NOT NULL REFERENCES assignments(assignment_id),
        unit_index      INTEGER NOT NULL DEFAULT 0,
        worker_id       TEXT,
        status          TEXT NOT NULL,
        provider_type   TEXT NOT NULL DEFAULT 'mock',
        pay_amount      REAL NOT NULL DEFAULT 0.0,
        creation_date   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE INDEX IF NOT EXISTS idx_tasks_name ON tasks(task_name);
    CREATE INDEX IF NOT EXISTS idx_units_assignment ON units(assignment_id, unit_index);
";

const UNITS_FOR_TASK: &str = "
    SELECT u.unit_id, u.assignment_id, a.task_run_id, u.unit_index,
           u.worker_id, u.status, u.provider_type, u.pay_amount
    FROM units u
    JOIN assignments a ON a.assignment_id = u.assignment_id
    JOIN task_runs r ON r.task_run_id = a.task_run_id
    WHERE r.task_id = ?1
    ORDER BY r.task_run_id, a.assignment_id, u.unit_index
";

/// Reader for the task database kept on local disk.
///
/// No connection is held between calls; each query opens the database
/// read-only and closes it when done.
#[derive(Debug, Clone)]
pub struct LocalUnitDatabase {
    path: PathBuf,
}

impl LocalUnitDatabase {
    /// Point at the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Point at the database at [`default_path`](Self::default_path).
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// `$CROWDSIFT_DB` when set, otherwise `database.db` under the user's
    /// data directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(DATABASE_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crowdsift")
            .join("database.db")
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the database file and its tables if missing.
    pub fn initialize_schema(&self) -> Result<(), DatastoreError> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection, DatastoreError> {
        debug!("Opening task database at {}", self.path.display());
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }
}

impl UnitStore for LocalUnitDatabase {
    type Error = DatastoreError;

    /// Units of the first task named `task_name` that hold a finished
    /// submission, ordered by task run, assignment and unit index.
    fn units_for_task(&self, task_name: &str) -> Result<Vec<WorkUnit>, DatastoreError> {
        let conn = self.connect()?;

        let task_id: i64 = conn
            .query_row(
                "SELECT task_id FROM tasks WHERE task_name = ?1 ORDER BY task_id LIMIT 1",
                [task_name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| DatastoreError::TaskNotFound {
                task_name: task_name.to_string(),
            })?;

        let mut stmt = conn.prepare(UNITS_FOR_TASK)?;
        let rows = stmt.query_map([task_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, f64>(7)?,
            ))
        })?;

        let mut units = Vec::new();
        for row in rows {
            let (unit_id, assignment_id, task_run_id, unit_index, worker_id, status, provider, pay) =
                row?;
            let Ok(status) = status.parse::<UnitStatus>() else {
                warn!("Skipping unit {}: unrecognised status '{}'", unit_id, status);
                continue;
            };
            if !status.is_finished() {
                continue;
            }
            units.push(WorkUnit {
                unit_id: unit_id.to_string(),
                assignment_id: assignment_id.to_string(),
                task_run_id: task_run_id.to_string(),
                unit_index,
                worker_id,
                status,
                provider_type: provider,
                pay_amount: pay,
            });
        }

        debug!("Found {} finished unit(s) for task '{}'", units.len(), task_name);
        Ok(units)
    }
}
