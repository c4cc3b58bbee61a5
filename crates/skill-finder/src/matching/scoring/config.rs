use serde::{Deserialize, Serialize};

use super::super::domain::ProficiencyLevel;

/// Tunable constants of the scoring rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub required_default_target: ProficiencyLevel,
    pub required_default_importance: f64,
    pub required_verified_bonus: f64,
    pub preferred_default_target: ProficiencyLevel,
    pub preferred_default_importance: f64,
    pub preferred_verified_bonus: f64,
    /// Scales every preferred contribution relative to required ones.
    pub preferred_multiplier: f64,
    /// Target confidence assumed when the profile carries no target for a skill.
    pub default_target_confidence: f64,
    pub missing_penalty_base: f64,
    pub missing_penalty_complexity_factor: f64,
    /// Share of the total kept at zero required coverage.
    pub coverage_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            required_default_target: ProficiencyLevel::Skilled,
            required_default_importance: 0.7,
            required_verified_bonus: 0.08,
            preferred_default_target: ProficiencyLevel::Awareness,
            preferred_default_importance: 0.5,
            preferred_verified_bonus: 0.05,
            preferred_multiplier: 0.33,
            default_target_confidence: 0.6,
            missing_penalty_base: 0.8,
            missing_penalty_complexity_factor: 1.0,
            coverage_floor: 0.7,
        }
    }
}

impl ScoringConfig {
    pub(crate) fn required_rules(&self) -> SideRules {
        SideRules {
            default_target: self.required_default_target,
            default_importance: self.required_default_importance,
            verified_bonus: self.required_verified_bonus,
            multiplier: 1.0,
        }
    }

    pub(crate) fn preferred_rules(&self) -> SideRules {
        SideRules {
            default_target: self.preferred_default_target,
            default_importance: self.preferred_default_importance,
            verified_bonus: self.preferred_verified_bonus,
            multiplier: self.preferred_multiplier,
        }
    }

    pub(crate) fn missing_penalty_rate(&self, complexity_score: f64) -> f64 {
        self.missing_penalty_base + self.missing_penalty_complexity_factor * complexity_score
    }

    pub(crate) fn coverage_factor(&self, coverage_required: f64) -> f64 {
        self.coverage_floor + (1.0 - self.coverage_floor) * coverage_required
    }
}

/// Per-side view of the rubric (required or preferred).
#[derive(Debug, Clone, Copy)]
pub(crate) struct SideRules {
    pub default_target: ProficiencyLevel,
    pub default_importance: f64,
    pub verified_bonus: f64,
    pub multiplier: f64,
}
