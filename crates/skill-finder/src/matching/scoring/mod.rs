mod config;
mod rules;

pub use config::ScoringConfig;

use super::domain::{
    clamp01, round_to, ComplexityProfile, EmployeeMatch, EmployeeRecord, EmployeeSkillRecord,
    SkillKind, SkillRequirements,
};
use super::keys::SkillMap;
use rules::{evaluate, SkillOutcome, SkillSpec};

/// Stateless scorer that applies the rubric configuration to one employee at a time.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: ScoringConfig,
}

impl MatchScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Resolves targets and defaults once so the plan can be reused for every candidate.
    pub fn plan<'a>(
        &'a self,
        requirements: &'a SkillRequirements,
        profile: &'a ComplexityProfile,
    ) -> ScoringPlan<'a> {
        let required_rules = self.config.required_rules();
        let preferred_rules = self.config.preferred_rules();
        let required_targets = profile.required_targets();
        let preferred_targets = profile.preferred_targets();

        let required: Vec<SkillSpec<'a>> = requirements
            .required
            .iter()
            .map(|skill| {
                SkillSpec::resolve(
                    skill.skill.trim(),
                    SkillKind::Required,
                    skill.weight,
                    skill.confidence,
                    skill.importance,
                    &required_targets,
                    &required_rules,
                    self.config.default_target_confidence,
                )
            })
            .collect();

        let required_names: SkillMap<()> = required
            .iter()
            .map(|spec| (spec.name.to_string(), ()))
            .collect();

        // A skill listed on both sides is scored once, as required.
        let preferred: Vec<SkillSpec<'a>> = requirements
            .preferred
            .iter()
            .filter(|skill| !required_names.contains(&skill.skill))
            .map(|skill| {
                SkillSpec::resolve(
                    skill.skill.trim(),
                    SkillKind::Preferred,
                    skill.weight,
                    skill.confidence,
                    skill.importance,
                    &preferred_targets,
                    &preferred_rules,
                    self.config.default_target_confidence,
                )
            })
            .collect();

        ScoringPlan {
            config: &self.config,
            profile,
            required,
            preferred,
        }
    }

    pub fn score(
        &self,
        employee: &EmployeeRecord,
        skills: &SkillMap<EmployeeSkillRecord>,
        requirements: &SkillRequirements,
        profile: &ComplexityProfile,
    ) -> EmployeeMatch {
        self.plan(requirements, profile).score(employee, skills)
    }
}

/// Requirement lines resolved against one complexity profile.
#[derive(Debug)]
pub struct ScoringPlan<'a> {
    config: &'a ScoringConfig,
    profile: &'a ComplexityProfile,
    required: Vec<SkillSpec<'a>>,
    preferred: Vec<SkillSpec<'a>>,
}

impl ScoringPlan<'_> {
    pub fn required_count(&self) -> usize {
        self.required.len()
    }

    pub fn score(
        &self,
        employee: &EmployeeRecord,
        skills: &SkillMap<EmployeeSkillRecord>,
    ) -> EmployeeMatch {
        let required_rules = self.config.required_rules();
        let preferred_rules = self.config.preferred_rules();

        let mut total = 0.0;
        let mut missing_weight = 0.0;
        let mut required_hits = 0usize;
        let mut preferred_hits = 0usize;
        let mut details = Vec::with_capacity(self.required.len() + self.preferred.len());

        for spec in &self.required {
            match evaluate(spec, skills.get(spec.name), &required_rules) {
                SkillOutcome::Missing {
                    detail,
                    penalty_weight,
                } => {
                    missing_weight += penalty_weight;
                    details.push(detail);
                }
                SkillOutcome::Scored {
                    detail,
                    contribution,
                    hit,
                } => {
                    total += contribution;
                    if hit {
                        required_hits += 1;
                    }
                    details.push(detail);
                }
                SkillOutcome::Skipped => {}
            }
        }

        for spec in &self.preferred {
            if let SkillOutcome::Scored {
                detail,
                contribution,
                hit,
            } = evaluate(spec, skills.get(spec.name), &preferred_rules)
            {
                total += contribution;
                if hit {
                    preferred_hits += 1;
                }
                details.push(detail);
            }
        }

        let complexity_score = clamp01(self.profile.complexity_score);
        total -= missing_weight * self.config.missing_penalty_rate(complexity_score);

        let coverage_required = required_hits as f64 / self.required.len().max(1) as f64;
        let coverage_preferred = preferred_hits as f64 / self.preferred.len().max(1) as f64;
        total *= self.config.coverage_factor(coverage_required);

        EmployeeMatch {
            employee_id: employee.employee_id,
            formal_name: employee.formal_name.clone(),
            email_address: employee.email_address.clone(),
            position_title: employee.position_title.clone(),
            team: employee.team.clone(),
            total_score: round_to(total, 6),
            coverage_required: round_to(coverage_required, 3),
            coverage_preferred: round_to(coverage_preferred, 3),
            reasoning: format!(
                "required={:.2}, preferred={:.2}, complexity={} ({:.2}).",
                coverage_required,
                coverage_preferred,
                self.profile.complexity_label.label(),
                complexity_score
            ),
            matched_skills: details,
        }
    }
}
