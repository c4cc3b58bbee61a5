use std::sync::Arc;

use crate::matching::domain::{
    ComplexityLabel, ComplexityProfile, EmployeeMatch, EmployeeRecord, MatchDetail,
    PreferredSkill, ProficiencyLevel, RequiredSkill, SkillKind, SkillRequirements, SkillTarget,
};
use crate::matching::roster::{InMemoryRosterStore, RosterSnapshot, RosterStore};
use crate::matching::{EngineConfig, MatchService};

pub(super) fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn employee(id: i64, name: &str) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: id,
        formal_name: name.to_string(),
        email_address: format!("{}@example.com", name.to_ascii_lowercase().replace(' ', ".")),
        position_title: "Engineer".to_string(),
        team: Some("Platform".to_string()),
        function: None,
        business_unit: None,
        location: None,
    }
}

pub(super) fn required(skill: &str) -> RequiredSkill {
    RequiredSkill {
        skill: skill.to_string(),
        weight: 1.0,
        confidence: 1.0,
        rationale: String::new(),
        importance: 1.0,
    }
}

pub(super) fn preferred(skill: &str) -> PreferredSkill {
    PreferredSkill {
        skill: skill.to_string(),
        weight: 1.0,
        confidence: 1.0,
        rationale: String::new(),
        importance: 1.0,
    }
}

pub(super) fn requirements(
    required: Vec<RequiredSkill>,
    preferred: Vec<PreferredSkill>,
) -> SkillRequirements {
    SkillRequirements {
        outcome_reasoning: "Ship the feature".to_string(),
        overall_confidence: 0.8,
        required,
        preferred,
    }
}

/// Target with full importance and confidence so contributions are easy to read.
pub(super) fn target(skill: &str, level: ProficiencyLevel) -> SkillTarget {
    SkillTarget {
        skill: skill.to_string(),
        target_level: level,
        target_confidence: 1.0,
        importance: 1.0,
        reasoning: "Target level for this query.".to_string(),
    }
}

pub(super) fn profile(
    complexity_score: f64,
    targets_required: Vec<SkillTarget>,
    targets_preferred: Vec<SkillTarget>,
) -> ComplexityProfile {
    ComplexityProfile {
        complexity_score,
        complexity_label: ComplexityLabel::Medium,
        targets_required,
        targets_preferred,
        reasoning: "Moderate scope.".to_string(),
    }
}

pub(super) fn snapshot(store: &InMemoryRosterStore) -> RosterSnapshot {
    RosterSnapshot::new(
        store.active_employees().expect("employees"),
        store.skill_rows().expect("skill rows"),
    )
}

pub(super) fn service(store: InMemoryRosterStore) -> MatchService<InMemoryRosterStore> {
    MatchService::new(Arc::new(store), EngineConfig::default())
}

/// Candidate whose required coverage is exactly `covers`, for assembler tests.
pub(super) fn candidate(id: i64, total_score: f64, covers: &[&str]) -> EmployeeMatch {
    let matched_skills = covers
        .iter()
        .map(|skill| MatchDetail {
            skill: skill.to_string(),
            kind: SkillKind::Required,
            employee_level: Some(ProficiencyLevel::Expert),
            target_level: ProficiencyLevel::Skilled,
            default_target: true,
            verified: false,
            match_ratio: 1.0,
            skill_importance: 1.0,
            target_importance: 0.7,
            effective_weight: 0.7,
            contribution: Some(0.7),
            note: None,
        })
        .collect();

    EmployeeMatch {
        employee_id: id,
        formal_name: format!("Candidate {id}"),
        email_address: format!("candidate{id}@example.com"),
        position_title: "Engineer".to_string(),
        team: None,
        total_score,
        coverage_required: 0.0,
        coverage_preferred: 0.0,
        reasoning: String::new(),
        matched_skills,
    }
}
