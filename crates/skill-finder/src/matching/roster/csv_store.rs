use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::super::domain::EmployeeRecord;
use super::{RosterError, RosterStore, SkillRow};

pub(crate) const EMPLOYEES_FILE: &str = "employees.csv";
pub(crate) const SKILLS_FILE: &str = "employee_skills.csv";

/// Directory of CSV exports: `employees.csv` and `employee_skills.csv`.
#[derive(Debug, Clone)]
pub struct CsvRosterStore {
    root: PathBuf,
}

impl CsvRosterStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn open(&self, file_name: &str) -> Result<std::fs::File, RosterError> {
        Ok(std::fs::File::open(self.root.join(file_name))?)
    }
}

impl RosterStore for CsvRosterStore {
    fn active_employees(&self) -> Result<Vec<EmployeeRecord>, RosterError> {
        parse_employees(self.open(EMPLOYEES_FILE)?)
    }

    fn skill_rows(&self) -> Result<Vec<SkillRow>, RosterError> {
        parse_skill_rows(self.open(SKILLS_FILE)?)
    }
}

pub(crate) fn parse_employees<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut employees = Vec::new();

    for record in csv_reader.deserialize::<EmployeeRow>() {
        let row = record?;
        if !row.is_active {
            continue;
        }
        employees.push(EmployeeRecord {
            employee_id: row.employee_id,
            formal_name: row.formal_name,
            email_address: row.email_address,
            position_title: row.position_title,
            team: row.team,
            function: row.function,
            business_unit: row.business_unit,
            location: row.location,
        });
    }

    Ok(employees)
}

pub(crate) fn parse_skill_rows<R: Read>(reader: R) -> Result<Vec<SkillRow>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<EmployeeSkillRow>() {
        let row = record?;
        rows.push(SkillRow {
            employee_id: row.employee_id,
            skill_name: row.skill_name,
            proficiency_level: row.proficiency_level,
            verified: row.is_verified,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    employee_id: i64,
    formal_name: String,
    email_address: String,
    position_title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    team: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    function: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    business_unit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default = "active_by_default", deserialize_with = "flag")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct EmployeeSkillRow {
    employee_id: i64,
    skill_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    proficiency_level: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    is_verified: bool,
}

fn active_by_default() -> bool {
    true
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "" | "0" | "false" | "no" | "n" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}
