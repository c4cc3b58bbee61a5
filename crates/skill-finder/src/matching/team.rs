//! Greedy set-cover team assembly over a ranked candidate pool.
//!
//! Each candidate covers the required skills it meets at or above target. The assembler keeps
//! picking whoever adds the most still-uncovered skills until everything is covered, the team is
//! full, or nobody adds anything new. This is the standard `ln(n)` approximation of set cover.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{round_to, EmployeeMatch, SkillRequirements};
use super::keys::SkillKey;

/// Members chosen to jointly cover the required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecommendation {
    pub members: Vec<EmployeeMatch>,
    pub coverage_ratio: f64,
    /// Required skills nobody in the team meets at target, sorted.
    pub missing_skills: Vec<SkillKey>,
}

impl TeamRecommendation {
    pub fn score(&self) -> f64 {
        team_score(&self.members)
    }

    pub fn is_fully_covered(&self) -> bool {
        self.missing_skills.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamAssembler;

impl TeamAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        candidates: &[EmployeeMatch],
        requirements: &SkillRequirements,
        max_team_size: usize,
    ) -> TeamRecommendation {
        let required: BTreeSet<SkillKey> = requirements.required_keys().into_iter().collect();

        let mut pool: Vec<(&EmployeeMatch, BTreeSet<SkillKey>)> = candidates
            .iter()
            .map(|candidate| {
                let coverage = candidate
                    .required_coverage_set()
                    .into_iter()
                    .filter(|key| required.contains(key))
                    .collect();
                (candidate, coverage)
            })
            .collect();

        let mut covered: BTreeSet<SkillKey> = BTreeSet::new();
        let mut members: Vec<EmployeeMatch> = Vec::new();

        while members.len() < max_team_size && covered != required && !pool.is_empty() {
            let Some((index, gain)) = best_candidate(&pool, &covered) else {
                break;
            };
            if gain == 0 {
                break;
            }

            let (candidate, coverage) = pool.remove(index);
            covered.extend(coverage);
            members.push(candidate.clone());
        }

        let coverage_ratio = covered.len() as f64 / required.len().max(1) as f64;
        let missing_skills: Vec<SkillKey> = required.difference(&covered).cloned().collect();

        debug!(
            members = members.len(),
            covered = covered.len(),
            required = required.len(),
            "team assembled"
        );

        TeamRecommendation {
            members,
            coverage_ratio,
            missing_skills,
        }
    }
}

// Largest marginal gain wins; ties go to the higher score, then to the earlier pool position.
fn best_candidate(
    pool: &[(&EmployeeMatch, BTreeSet<SkillKey>)],
    covered: &BTreeSet<SkillKey>,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (index, (candidate, coverage)) in pool.iter().enumerate() {
        let gain = coverage.difference(covered).count();
        let better = match best {
            None => true,
            Some((_, best_gain, best_score)) => {
                gain > best_gain || (gain == best_gain && candidate.total_score > best_score)
            }
        };
        if better {
            best = Some((index, gain, candidate.total_score));
        }
    }
    best.map(|(index, gain, _)| (index, gain))
}

/// Sum of member scores, rounded to six places. Not normalized by team size.
pub fn team_score(members: &[EmployeeMatch]) -> f64 {
    round_to(members.iter().map(|member| member.total_score).sum(), 6)
}
