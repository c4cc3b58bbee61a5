use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use super::super::domain::EmployeeRecord;
use super::{RosterError, RosterStore, SkillRow};

const ACTIVE_EMPLOYEES_SQL: &str = r"
SELECT id, formal_name, email_address, position_title, team, function, business_unit, location
FROM employees
WHERE is_active = 1
ORDER BY id
";

const SKILL_ROWS_SQL: &str = r"
SELECT es.employee_id, s.name AS skill_name, es.proficiency_level, es.is_verified
FROM employee_skills es
JOIN skills s ON s.id = es.skill_id
";

/// Employee directory database (`employees`, `skills`, `employee_skills` tables), opened read-only.
#[derive(Debug, Clone)]
pub struct SqliteRosterStore {
    path: PathBuf,
}

impl SqliteRosterStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> Result<Connection, RosterError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Ok(Connection::open_with_flags(&self.path, flags)?)
    }
}

impl RosterStore for SqliteRosterStore {
    fn active_employees(&self) -> Result<Vec<EmployeeRecord>, RosterError> {
        query_employees(&self.connect()?)
    }

    fn skill_rows(&self) -> Result<Vec<SkillRow>, RosterError> {
        query_skill_rows(&self.connect()?)
    }

    /// Both queries run inside one read transaction so a concurrent writer cannot land
    /// between them.
    fn read_roster(&self) -> Result<(Vec<EmployeeRecord>, Vec<SkillRow>), RosterError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let employees = query_employees(&tx)?;
        let skill_rows = query_skill_rows(&tx)?;
        tx.commit()?;
        Ok((employees, skill_rows))
    }
}

fn query_employees(conn: &Connection) -> Result<Vec<EmployeeRecord>, RosterError> {
    let mut stmt = conn.prepare(ACTIVE_EMPLOYEES_SQL)?;
    let rows = stmt.query_map([], |row| {
        Ok(EmployeeRecord {
            employee_id: row.get(0)?,
            formal_name: row.get(1)?,
            email_address: row.get(2)?,
            position_title: row.get(3)?,
            team: row.get(4)?,
            function: row.get(5)?,
            business_unit: row.get(6)?,
            location: row.get(7)?,
        })
    })?;

    let mut employees = Vec::new();
    for row in rows {
        employees.push(row?);
    }
    Ok(employees)
}

fn query_skill_rows(conn: &Connection) -> Result<Vec<SkillRow>, RosterError> {
    let mut stmt = conn.prepare(SKILL_ROWS_SQL)?;
    let rows = stmt.query_map([], |row| {
        Ok(SkillRow {
            employee_id: row.get(0)?,
            skill_name: row.get(1)?,
            proficiency_level: row.get::<_, Option<String>>(2)?,
            verified: row.get::<_, Option<bool>>(3)?.unwrap_or(false),
        })
    })?;

    let mut skill_rows = Vec::new();
    for row in rows {
        skill_rows.push(row?);
    }
    Ok(skill_rows)
}
