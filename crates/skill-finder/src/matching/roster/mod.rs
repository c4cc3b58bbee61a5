//! Read-only access to the employee directory and its skill records.

mod csv_store;
mod memory;
mod sqlite_store;

pub use csv_store::CsvRosterStore;
pub use memory::InMemoryRosterStore;
pub use sqlite_store::SqliteRosterStore;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{EmployeeRecord, EmployeeSkillRecord};
use super::keys::SkillMap;

/// Raw skill row as stored, before proficiency labels are validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    pub employee_id: i64,
    pub skill_name: String,
    pub proficiency_level: Option<String>,
    pub verified: bool,
}

/// Storage abstraction so the engine can be exercised against any directory backend.
pub trait RosterStore: Send + Sync {
    /// Employees that are not terminated.
    fn active_employees(&self) -> Result<Vec<EmployeeRecord>, RosterError>;
    fn skill_rows(&self) -> Result<Vec<SkillRow>, RosterError>;

    /// Employees and skill rows for one snapshot. Stores that can change underneath a
    /// reader override this to take both from a single consistent read.
    fn read_roster(&self) -> Result<(Vec<EmployeeRecord>, Vec<SkillRow>), RosterError> {
        Ok((self.active_employees()?, self.skill_rows()?))
    }
}

/// Error enumeration for roster access failures. Always fatal for the run that hit it.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("roster unavailable: {0}")]
    Unavailable(String),
}

/// Opens the store matching a roster path: a directory of CSV exports or a SQLite file.
pub fn open_store(path: &Path) -> Result<Arc<dyn RosterStore>, RosterError> {
    if path.is_dir() {
        Ok(Arc::new(CsvRosterStore::new(path)))
    } else if path.is_file() {
        Ok(Arc::new(SqliteRosterStore::new(path)))
    } else {
        Err(RosterError::Unavailable(format!(
            "no roster found at {}",
            path.display()
        )))
    }
}

/// In-memory matrix of active employees and their usable skill evidence.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    employees: Vec<EmployeeRecord>,
    skills: BTreeMap<i64, SkillMap<EmployeeSkillRecord>>,
    no_skills: SkillMap<EmployeeSkillRecord>,
    loaded_at: DateTime<Utc>,
}

impl RosterSnapshot {
    pub fn new(employees: Vec<EmployeeRecord>, rows: Vec<SkillRow>) -> Self {
        let active: HashSet<i64> = employees
            .iter()
            .map(|employee| employee.employee_id)
            .collect();

        let mut skills: BTreeMap<i64, SkillMap<EmployeeSkillRecord>> = BTreeMap::new();
        for row in rows {
            if !active.contains(&row.employee_id) {
                continue;
            }
            let name = row.skill_name.trim();
            if name.is_empty() {
                continue;
            }
            let record = EmployeeSkillRecord::from_label(
                name,
                row.proficiency_level.as_deref(),
                row.verified,
            );
            skills
                .entry(row.employee_id)
                .or_default()
                .insert(name, record);
        }

        Self {
            employees,
            skills,
            no_skills: SkillMap::new(),
            loaded_at: Utc::now(),
        }
    }

    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn skills_for(&self, employee_id: i64) -> &SkillMap<EmployeeSkillRecord> {
        self.skills.get(&employee_id).unwrap_or(&self.no_skills)
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Builds a fresh snapshot from the injected store on every call.
pub struct RosterLoader<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for RosterLoader<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> RosterLoader<S>
where
    S: RosterStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<RosterSnapshot, RosterError> {
        let (employees, rows) = self.store.read_roster()?;
        let row_count = rows.len();
        let snapshot = RosterSnapshot::new(employees, rows);

        debug!(
            employees = snapshot.len(),
            skill_rows = row_count,
            "roster snapshot loaded"
        );

        Ok(snapshot)
    }
}
