use std::fmt;

use serde::{Deserialize, Serialize};

use super::keys::{SkillKey, SkillMap};

/// Ordered proficiency scale shared by employee records and skill targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Awareness,
    Skilled,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    /// Parses a catalogue label. Anything outside the four known labels carries no evidence.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "awareness" => Some(Self::Awareness),
            "skilled" => Some(Self::Skilled),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        match self {
            ProficiencyLevel::Awareness => 1,
            ProficiencyLevel::Skilled => 2,
            ProficiencyLevel::Advanced => 3,
            ProficiencyLevel::Expert => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProficiencyLevel::Awareness => "awareness",
            ProficiencyLevel::Skilled => "skilled",
            ProficiencyLevel::Advanced => "advanced",
            ProficiencyLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Skill the request cannot be delivered without.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill: String,
    pub weight: f64,
    pub confidence: f64,
    pub rationale: String,
    pub importance: f64,
}

/// Skill that helps but whose absence is neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferredSkill {
    pub skill: String,
    pub weight: f64,
    pub confidence: f64,
    pub rationale: String,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirements {
    pub outcome_reasoning: String,
    pub overall_confidence: f64,
    pub required: Vec<RequiredSkill>,
    pub preferred: Vec<PreferredSkill>,
}

impl SkillRequirements {
    /// Lower-cased names of the required skills, in declaration order without duplicates.
    pub fn required_keys(&self) -> Vec<SkillKey> {
        let mut keys: Vec<SkillKey> = Vec::with_capacity(self.required.len());
        for skill in &self.required {
            let key = SkillKey::new(&skill.skill);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

/// Minimum proficiency deemed sufficient for one skill at the inferred task depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTarget {
    pub skill: String,
    pub target_level: ProficiencyLevel,
    pub target_confidence: f64,
    pub importance: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLabel {
    Low,
    Medium,
    High,
}

impl ComplexityLabel {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ComplexityLabel::Low => "low",
            ComplexityLabel::Medium => "medium",
            ComplexityLabel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityProfile {
    pub complexity_score: f64,
    pub complexity_label: ComplexityLabel,
    pub targets_required: Vec<SkillTarget>,
    pub targets_preferred: Vec<SkillTarget>,
    pub reasoning: String,
}

impl ComplexityProfile {
    pub(crate) fn required_targets(&self) -> SkillMap<&SkillTarget> {
        index_targets(&self.targets_required)
    }

    pub(crate) fn preferred_targets(&self) -> SkillMap<&SkillTarget> {
        index_targets(&self.targets_preferred)
    }
}

// First target per skill wins.
fn index_targets(targets: &[SkillTarget]) -> SkillMap<&SkillTarget> {
    let mut map = SkillMap::new();
    for target in targets {
        map.insert_if_absent(&target.skill, target);
    }
    map
}

/// Directory row for an active person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: i64,
    pub formal_name: String,
    pub email_address: String,
    pub position_title: String,
    pub team: Option<String>,
    pub function: Option<String>,
    pub business_unit: Option<String>,
    pub location: Option<String>,
}

/// Self-declared or verified skill evidence for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSkillRecord {
    pub skill_name: String,
    pub level: Option<ProficiencyLevel>,
    pub verified: bool,
}

impl EmployeeSkillRecord {
    /// Builds a record from a raw store label; unrecognized labels become `None`.
    pub fn from_label(skill_name: impl Into<String>, label: Option<&str>, verified: bool) -> Self {
        Self {
            skill_name: skill_name.into(),
            level: label.and_then(ProficiencyLevel::parse),
            verified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    Required,
    Preferred,
}

impl SkillKind {
    pub const fn label(self) -> &'static str {
        match self {
            SkillKind::Required => "required",
            SkillKind::Preferred => "preferred",
        }
    }
}

/// Per-skill audit line explaining how a score was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub skill: String,
    #[serde(rename = "type")]
    pub kind: SkillKind,
    pub employee_level: Option<ProficiencyLevel>,
    pub target_level: ProficiencyLevel,
    /// Set when no profile target existed and the rubric default was scored against.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default_target: bool,
    pub verified: bool,
    #[serde(rename = "match")]
    pub match_ratio: f64,
    pub skill_importance: f64,
    pub target_importance: f64,
    pub effective_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MatchDetail {
    pub fn meets_target(&self) -> bool {
        self.match_ratio >= 1.0
    }
}

/// Scored candidate returned by the ranker. Order within result lists is the rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeMatch {
    pub employee_id: i64,
    pub formal_name: String,
    pub email_address: String,
    pub position_title: String,
    pub team: Option<String>,
    pub total_score: f64,
    pub coverage_required: f64,
    pub coverage_preferred: f64,
    pub reasoning: String,
    pub matched_skills: Vec<MatchDetail>,
}

impl EmployeeMatch {
    /// Required skills this candidate meets at or above target.
    pub fn required_coverage_set(&self) -> Vec<SkillKey> {
        let mut covered: Vec<SkillKey> = Vec::new();
        for detail in &self.matched_skills {
            if detail.kind == SkillKind::Required && detail.meets_target() {
                let key = SkillKey::new(&detail.skill);
                if !covered.contains(&key) {
                    covered.push(key);
                }
            }
        }
        covered
    }

    /// Required lines met at target. Unlike `coverage_required` this is exact.
    pub fn required_hits(&self) -> usize {
        self.matched_skills
            .iter()
            .filter(|detail| detail.kind == SkillKind::Required && detail.meets_target())
            .count()
    }

    /// Fraction of `required_total` skills with any usable evidence, met or not.
    pub fn required_signal(&self, required_total: usize) -> f64 {
        let with_evidence = self
            .matched_skills
            .iter()
            .filter(|detail| detail.kind == SkillKind::Required && detail.employee_level.is_some())
            .count();
        with_evidence as f64 / required_total.max(1) as f64
    }
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
