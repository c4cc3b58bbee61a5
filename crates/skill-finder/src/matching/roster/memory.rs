use super::super::domain::EmployeeRecord;
use super::{RosterError, RosterStore, SkillRow};

/// Roster held in memory, used for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterStore {
    employees: Vec<(EmployeeRecord, bool)>,
    skills: Vec<SkillRow>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employee(mut self, employee: EmployeeRecord) -> Self {
        self.employees.push((employee, true));
        self
    }

    pub fn with_inactive_employee(mut self, employee: EmployeeRecord) -> Self {
        self.employees.push((employee, false));
        self
    }

    /// Adds a skill row with a raw proficiency label, exactly as a store would hold it.
    pub fn with_skill(
        mut self,
        employee_id: i64,
        skill_name: &str,
        proficiency_level: Option<&str>,
        verified: bool,
    ) -> Self {
        self.skills.push(SkillRow {
            employee_id,
            skill_name: skill_name.to_string(),
            proficiency_level: proficiency_level.map(str::to_string),
            verified,
        });
        self
    }
}

impl RosterStore for InMemoryRosterStore {
    fn active_employees(&self) -> Result<Vec<EmployeeRecord>, RosterError> {
        Ok(self
            .employees
            .iter()
            .filter(|(_, active)| *active)
            .map(|(employee, _)| employee.clone())
            .collect())
    }

    fn skill_rows(&self) -> Result<Vec<SkillRow>, RosterError> {
        Ok(self.skills.clone())
    }
}
