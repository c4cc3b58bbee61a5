use super::super::domain::{
    clamp01, round_to, EmployeeSkillRecord, MatchDetail, ProficiencyLevel, SkillKind, SkillTarget,
};
use super::super::keys::SkillMap;
use super::config::SideRules;

/// One requirement line with its target resolved against the complexity profile.
#[derive(Debug, Clone)]
pub(crate) struct SkillSpec<'a> {
    pub name: &'a str,
    pub kind: SkillKind,
    pub weight: f64,
    pub confidence: f64,
    pub skill_importance: f64,
    pub target_level: ProficiencyLevel,
    pub target_importance: f64,
    pub target_confidence: f64,
    pub default_target: bool,
}

impl<'a> SkillSpec<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn resolve(
        name: &'a str,
        kind: SkillKind,
        weight: f64,
        confidence: f64,
        importance: f64,
        targets: &SkillMap<&SkillTarget>,
        rules: &SideRules,
        default_target_confidence: f64,
    ) -> Self {
        let target = targets.get(name);
        Self {
            name,
            kind,
            weight: clamp01(weight),
            confidence: clamp01(confidence),
            skill_importance: clamp01(importance),
            target_level: target
                .map(|target| target.target_level)
                .unwrap_or(rules.default_target),
            target_importance: clamp01(
                target
                    .map(|target| target.importance)
                    .unwrap_or(rules.default_importance),
            ),
            target_confidence: clamp01(
                target
                    .map(|target| target.target_confidence)
                    .unwrap_or(default_target_confidence),
            ),
            default_target: target.is_none(),
        }
    }

    pub(crate) fn effective_weight(&self) -> f64 {
        self.weight * self.skill_importance * self.target_importance
    }

    fn blended_confidence(&self) -> f64 {
        clamp01(0.5 * self.confidence + 0.5 * self.target_confidence)
    }
}

/// Result of evaluating one skill line for one employee.
#[derive(Debug)]
pub(crate) enum SkillOutcome {
    /// Required skill without usable evidence.
    Missing { detail: MatchDetail, penalty_weight: f64 },
    Scored {
        detail: MatchDetail,
        contribution: f64,
        hit: bool,
    },
    /// Preferred skill without evidence: neutral.
    Skipped,
}

/// `1.0` at or above target, proportional below it. Never above `1.0`.
pub(crate) fn match_ratio(employee: ProficiencyLevel, target: ProficiencyLevel) -> f64 {
    if employee >= target {
        1.0
    } else {
        f64::from(employee.rank()) / f64::from(target.rank())
    }
}

pub(crate) fn evaluate(
    spec: &SkillSpec<'_>,
    evidence: Option<&EmployeeSkillRecord>,
    rules: &SideRules,
) -> SkillOutcome {
    let effective_weight = spec.effective_weight();
    let level = evidence.and_then(|record| record.level);

    let Some(level) = level else {
        if spec.kind == SkillKind::Preferred {
            return SkillOutcome::Skipped;
        }
        return SkillOutcome::Missing {
            detail: MatchDetail {
                skill: spec.name.to_string(),
                kind: spec.kind,
                employee_level: None,
                target_level: spec.target_level,
                default_target: spec.default_target,
                verified: evidence.map(|record| record.verified).unwrap_or(false),
                match_ratio: 0.0,
                skill_importance: round_to(spec.skill_importance, 3),
                target_importance: round_to(spec.target_importance, 3),
                effective_weight: round_to(effective_weight, 3),
                contribution: None,
                note: Some("missing".to_string()),
            },
            penalty_weight: effective_weight,
        };
    };

    let verified = evidence.map(|record| record.verified).unwrap_or(false);
    let skill_name = evidence
        .map(|record| record.skill_name.as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(spec.name);

    let ratio = match_ratio(level, spec.target_level);
    let bonus = if verified { rules.verified_bonus } else { 0.0 };
    let contribution =
        rules.multiplier * effective_weight * spec.blended_confidence() * (ratio + bonus);

    SkillOutcome::Scored {
        detail: MatchDetail {
            skill: skill_name.to_string(),
            kind: spec.kind,
            employee_level: Some(level),
            target_level: spec.target_level,
            default_target: spec.default_target,
            verified,
            match_ratio: round_to(ratio, 3),
            skill_importance: round_to(spec.skill_importance, 3),
            target_importance: round_to(spec.target_importance, 3),
            effective_weight: round_to(effective_weight, 3),
            contribution: Some(round_to(contribution, 6)),
            note: None,
        },
        contribution,
        hit: ratio >= 1.0,
    }
}
