use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ComplexityProfile, EmployeeMatch, SkillRequirements};
use super::roster::RosterSnapshot;
use super::scoring::MatchScorer;

/// Gate thresholds applied after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Minimum share of required skills with any evidence before a candidate may rank.
    pub min_required_signal: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_required_signal: 0.34,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    pub top_n: usize,
    /// Keep only candidates meeting every required target.
    pub strict_required: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            strict_required: false,
        }
    }
}

/// Why a scored candidate was kept out of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    InsufficientSignal,
    IncompleteCoverage,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateRanker {
    scorer: MatchScorer,
    config: RankingConfig,
}

impl CandidateRanker {
    pub fn new(scorer: MatchScorer, config: RankingConfig) -> Self {
        Self { scorer, config }
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Scores every employee in the snapshot and returns the best `top_n`, best first.
    pub fn rank(
        &self,
        snapshot: &RosterSnapshot,
        requirements: &SkillRequirements,
        profile: &ComplexityProfile,
        options: RankOptions,
    ) -> Vec<EmployeeMatch> {
        if options.strict_required && requirements.required.is_empty() {
            debug!("strict ranking requested without required skills");
            return Vec::new();
        }

        let plan = self.scorer.plan(requirements, profile);
        let required_total = plan.required_count();

        let mut excluded = 0usize;
        let mut ranked: Vec<EmployeeMatch> = Vec::with_capacity(snapshot.len());
        for employee in snapshot.employees() {
            let scored = plan.score(employee, snapshot.skills_for(employee.employee_id));
            match self.exclusion(&scored, required_total, options) {
                Some(_) => excluded += 1,
                None => ranked.push(scored),
            }
        }

        ranked.sort_by(compare_matches);
        ranked.truncate(options.top_n);

        debug!(
            candidates = snapshot.len(),
            excluded,
            returned = ranked.len(),
            "candidates ranked"
        );

        ranked
    }

    pub fn exclusion(
        &self,
        candidate: &EmployeeMatch,
        required_total: usize,
        options: RankOptions,
    ) -> Option<Exclusion> {
        if required_total > 0
            && candidate.required_signal(required_total) < self.config.min_required_signal
        {
            return Some(Exclusion::InsufficientSignal);
        }
        if options.strict_required && candidate.required_hits() < required_total {
            return Some(Exclusion::IncompleteCoverage);
        }
        None
    }
}

/// Higher score first; equal scores fall back to ascending employee id.
pub(crate) fn compare_matches(left: &EmployeeMatch, right: &EmployeeMatch) -> Ordering {
    right
        .total_score
        .total_cmp(&left.total_score)
        .then_with(|| left.employee_id.cmp(&right.employee_id))
}
