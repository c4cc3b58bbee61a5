//! JSON boundary for requirements and complexity profiles produced upstream.
//!
//! Documents are permissive on the way in and strict on the way out: numbers are clamped,
//! blank skills dropped, and unrecognized proficiency labels never reach the scorer. A field
//! of the wrong JSON type is coerced rather than failing the document: text fields read
//! non-strings as text (or empty), numeric fields parse numeric strings and read anything else
//! as `0.0`, and list entries that are not objects are skipped.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::domain::{
    clamp01, ComplexityLabel, ComplexityProfile, PreferredSkill, ProficiencyLevel, RequiredSkill,
    SkillRequirements, SkillTarget,
};
use super::keys::SkillMap;

const DEFAULT_SKILL_SIGNAL: f64 = 0.6;
const DEFAULT_OVERALL_CONFIDENCE: f64 = 0.6;
const DEFAULT_TARGET_CONFIDENCE: f64 = 0.6;
const DEFAULT_TARGET_IMPORTANCE: f64 = 0.7;
const DEFAULT_COMPLEXITY_SCORE: f64 = 0.5;
const MAX_TARGET_REASONING: usize = 240;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read input document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillLineDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub skill: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub importance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rationale: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub outcome_reasoning: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub overall_confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub required: Vec<SkillLineDocument>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub preferred: Vec<SkillLineDocument>,
}

impl RequirementsDocument {
    pub fn into_requirements(self) -> SkillRequirements {
        let mut seen: SkillMap<()> = SkillMap::new();

        let required = dedupe_lines(self.required, &mut seen)
            .map(|line| RequiredSkill {
                skill: line.skill,
                weight: line.weight,
                confidence: line.confidence,
                rationale: line.rationale,
                importance: line.importance,
            })
            .collect();

        // Preferred lines naming a required skill are dropped; required is authoritative.
        let preferred = dedupe_lines(self.preferred, &mut seen)
            .map(|line| PreferredSkill {
                skill: line.skill,
                weight: line.weight,
                confidence: line.confidence,
                rationale: line.rationale,
                importance: line.importance,
            })
            .collect();

        SkillRequirements {
            outcome_reasoning: self.outcome_reasoning.trim().to_string(),
            overall_confidence: clamp01(
                self.overall_confidence
                    .unwrap_or(DEFAULT_OVERALL_CONFIDENCE),
            ),
            required,
            preferred,
        }
    }
}

struct CleanLine {
    skill: String,
    weight: f64,
    confidence: f64,
    importance: f64,
    rationale: String,
}

fn dedupe_lines<'a>(
    lines: Vec<SkillLineDocument>,
    seen: &'a mut SkillMap<()>,
) -> impl Iterator<Item = CleanLine> + 'a {
    lines.into_iter().filter_map(move |line| {
        let skill = line.skill.trim().to_string();
        if skill.is_empty() || seen.contains(&skill) {
            return None;
        }
        seen.insert(&skill, ());
        Some(CleanLine {
            skill,
            weight: clamp01(line.weight.unwrap_or(DEFAULT_SKILL_SIGNAL)),
            confidence: clamp01(line.confidence.unwrap_or(DEFAULT_SKILL_SIGNAL)),
            importance: clamp01(line.importance.unwrap_or(DEFAULT_SKILL_SIGNAL)),
            rationale: line.rationale.trim().to_string(),
        })
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub skill: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub target_level: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub target_confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub importance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(default, deserialize_with = "lenient_number")]
    pub complexity_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub complexity_label: String,
    #[serde(default, deserialize_with = "lenient_items")]
    pub targets_required: Vec<TargetDocument>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub targets_preferred: Vec<TargetDocument>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reasoning: String,
}

impl ProfileDocument {
    pub fn into_profile(self) -> ComplexityProfile {
        let reasoning = match self.reasoning.trim() {
            "" => "Complexity inferred from the query.".to_string(),
            text => text.to_string(),
        };

        ComplexityProfile {
            complexity_score: clamp01(self.complexity_score.unwrap_or(DEFAULT_COMPLEXITY_SCORE)),
            complexity_label: ComplexityLabel::parse(&self.complexity_label)
                .unwrap_or(ComplexityLabel::Medium),
            targets_required: clean_targets(self.targets_required),
            targets_preferred: clean_targets(self.targets_preferred),
            reasoning,
        }
    }
}

fn clean_targets(targets: Vec<TargetDocument>) -> Vec<SkillTarget> {
    targets
        .into_iter()
        .filter_map(|target| {
            let skill = target.skill.trim().to_string();
            if skill.is_empty() {
                return None;
            }
            let Some(target_level) = ProficiencyLevel::parse(&target.target_level) else {
                debug!(
                    skill = %skill,
                    label = %target.target_level,
                    "skipping target with unrecognized proficiency label"
                );
                return None;
            };

            let reasoning = match target.reasoning.trim() {
                "" => "Target level for this query.".to_string(),
                text => text.chars().take(MAX_TARGET_REASONING).collect(),
            };

            Some(SkillTarget {
                skill,
                target_level,
                target_confidence: clamp01(
                    target
                        .target_confidence
                        .unwrap_or(DEFAULT_TARGET_CONFIDENCE),
                ),
                importance: clamp01(target.importance.unwrap_or(DEFAULT_TARGET_IMPORTANCE)),
                reasoning,
            })
        })
        .collect()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

/// `null` counts as absent so the field default applies.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0),
        Value::Bool(flag) => {
            if flag {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };
    Ok(Some(value))
}

fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

pub fn requirements_from_reader<R: Read>(reader: R) -> Result<SkillRequirements, InputError> {
    let document: RequirementsDocument = serde_json::from_reader(reader)?;
    Ok(document.into_requirements())
}

pub fn profile_from_reader<R: Read>(reader: R) -> Result<ComplexityProfile, InputError> {
    let document: ProfileDocument = serde_json::from_reader(reader)?;
    Ok(document.into_profile())
}

pub fn requirements_from_path<P: AsRef<Path>>(path: P) -> Result<SkillRequirements, InputError> {
    let file = std::fs::File::open(path)?;
    requirements_from_reader(file)
}

pub fn profile_from_path<P: AsRef<Path>>(path: P) -> Result<ComplexityProfile, InputError> {
    let file = std::fs::File::open(path)?;
    profile_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_clamp_and_default_numbers() {
        let json = r#"{
            "outcome_reasoning": "  Build a model  ",
            "required": [
                {"skill": "Python", "weight": 1.4, "confidence": -0.2},
                {"skill": "   "}
            ]
        }"#;

        let requirements = requirements_from_reader(json.as_bytes()).expect("parse");

        assert_eq!(requirements.outcome_reasoning, "Build a model");
        assert_eq!(requirements.overall_confidence, 0.6);
        assert_eq!(requirements.required.len(), 1);
        let python = &requirements.required[0];
        assert_eq!(python.weight, 1.0);
        assert_eq!(python.confidence, 0.0);
        assert_eq!(python.importance, 0.6);
    }

    #[test]
    fn required_wins_over_preferred_duplicates() {
        let json = r#"{
            "required": [{"skill": "SQL"}, {"skill": "sql"}],
            "preferred": [{"skill": "Sql"}, {"skill": "Tableau"}]
        }"#;

        let requirements = requirements_from_reader(json.as_bytes()).expect("parse");

        assert_eq!(requirements.required.len(), 1);
        assert_eq!(requirements.preferred.len(), 1);
        assert_eq!(requirements.preferred[0].skill, "Tableau");
    }

    #[test]
    fn unknown_target_labels_are_skipped_not_promoted() {
        let json = r#"{
            "complexity_score": 0.8,
            "complexity_label": "extreme",
            "targets_required": [
                {"skill": "Python", "target_level": "guru"},
                {"skill": "SQL", "target_level": "Advanced", "importance": 2.0}
            ]
        }"#;

        let profile = profile_from_reader(json.as_bytes()).expect("parse");

        assert_eq!(profile.complexity_label, ComplexityLabel::Medium);
        assert_eq!(profile.targets_required.len(), 1);
        let sql = &profile.targets_required[0];
        assert_eq!(sql.target_level, ProficiencyLevel::Advanced);
        assert_eq!(sql.importance, 1.0);
        assert_eq!(sql.target_confidence, 0.6);
        assert_eq!(sql.reasoning, "Target level for this query.");
    }

    #[test]
    fn empty_profile_document_takes_defaults() {
        let profile = profile_from_reader("{}".as_bytes()).expect("parse");

        assert_eq!(profile.complexity_score, 0.5);
        assert_eq!(profile.complexity_label, ComplexityLabel::Medium);
        assert!(profile.targets_required.is_empty());
        assert_eq!(profile.reasoning, "Complexity inferred from the query.");
    }

    #[test]
    fn mistyped_target_fields_skip_only_that_target() {
        let json = r#"{
            "complexity_score": "0.75",
            "complexity_label": null,
            "targets_required": [
                {"skill": "Python", "target_level": null},
                {"skill": "Spark", "target_level": 3},
                "expert",
                {"skill": "SQL", "target_level": "advanced", "importance": "high"}
            ],
            "targets_preferred": {"skill": "Tableau"}
        }"#;

        let profile = profile_from_reader(json.as_bytes()).expect("parse");

        assert_eq!(profile.complexity_score, 0.75);
        assert_eq!(profile.complexity_label, ComplexityLabel::Medium);
        assert_eq!(profile.targets_required.len(), 1);
        let sql = &profile.targets_required[0];
        assert_eq!(sql.skill, "SQL");
        assert_eq!(sql.target_level, ProficiencyLevel::Advanced);
        assert_eq!(sql.importance, 0.0);
        assert!(profile.targets_preferred.is_empty());
    }

    #[test]
    fn mistyped_skill_line_numbers_are_coerced() {
        let json = r#"{
            "overall_confidence": null,
            "required": [
                {"skill": "Python", "weight": "0.9", "confidence": "sure", "importance": null},
                {"skill": null, "weight": 1.0},
                {"skill": 42}
            ]
        }"#;

        let requirements = requirements_from_reader(json.as_bytes()).expect("parse");

        assert_eq!(requirements.overall_confidence, 0.6);
        assert_eq!(requirements.required.len(), 2);
        let python = &requirements.required[0];
        assert_eq!(python.weight, 0.9);
        assert_eq!(python.confidence, 0.0);
        assert_eq!(python.importance, 0.6);
        assert_eq!(requirements.required[1].skill, "42");
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = requirements_from_reader("{not json".as_bytes()).expect_err("rejected");
        assert!(matches!(error, InputError::Json(_)));
    }
}
