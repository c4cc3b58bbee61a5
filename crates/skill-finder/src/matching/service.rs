use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{
    ComplexityLabel, ComplexityProfile, EmployeeMatch, ProficiencyLevel, SkillRequirements,
    SkillTarget,
};
use super::keys::{SkillKey, SkillMap};
use super::ranking::{CandidateRanker, RankOptions, RankingConfig};
use super::roster::{RosterError, RosterLoader, RosterStore};
use super::scoring::{MatchScorer, ScoringConfig};
use super::team::{team_score, TeamAssembler};

const POOL_PREVIEW_LIMIT: usize = 10;
const NO_REQUIRED_REASONING: &str = "No required skills inferred.";

/// Tunables for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub top_n: usize,
    pub pool_size: usize,
    pub max_team_size: usize,
    pub concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            ranking: RankingConfig::default(),
            top_n: 5,
            pool_size: 15,
            max_team_size: 3,
            concurrency: 5,
        }
    }
}

impl EngineConfig {
    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            top_n: self.top_n,
            strict_required: false,
        }
    }

    pub fn team_options(&self) -> TeamOptions {
        TeamOptions {
            pool_size: self.pool_size,
            max_team_size: self.max_team_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOptions {
    /// Ranked candidates considered by the assembler.
    pub pool_size: usize,
    pub max_team_size: usize,
}

impl Default for TeamOptions {
    fn default() -> Self {
        Self {
            pool_size: 15,
            max_team_size: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoLine {
    pub skill: String,
    pub weight: f64,
    pub confidence: f64,
    pub importance: f64,
    pub target_level: ProficiencyLevel,
}

/// Requirement lines as the run interpreted them, with targets resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementEcho {
    pub required: Vec<EchoLine>,
    pub preferred: Vec<EchoLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexitySummary {
    pub score: f64,
    pub label: ComplexityLabel,
    pub reasoning: String,
}

/// Everything a caller needs to present one team recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRun {
    pub requirements: RequirementEcho,
    pub complexity: ComplexitySummary,
    pub candidate_pool: Vec<EmployeeMatch>,
    pub team: Vec<EmployeeMatch>,
    pub team_coverage_required: f64,
    pub missing_required: Vec<SkillKey>,
    pub team_score: f64,
}

impl TeamRun {
    fn without_required(requirements: RequirementEcho) -> Self {
        Self {
            requirements,
            complexity: ComplexitySummary {
                score: 0.0,
                label: ComplexityLabel::Low,
                reasoning: NO_REQUIRED_REASONING.to_string(),
            },
            candidate_pool: Vec::new(),
            team: Vec::new(),
            team_coverage_required: 0.0,
            missing_required: Vec::new(),
            team_score: 0.0,
        }
    }
}

/// Engine facade over an injected roster store. Every call loads its own snapshot.
pub struct MatchService<S: ?Sized> {
    loader: RosterLoader<S>,
    ranker: CandidateRanker,
    assembler: TeamAssembler,
    config: EngineConfig,
}

impl<S> MatchService<S>
where
    S: RosterStore + ?Sized,
{
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        let scorer = MatchScorer::new(config.scoring.clone());
        let ranker = CandidateRanker::new(scorer, config.ranking.clone());
        Self {
            loader: RosterLoader::new(store),
            ranker,
            assembler: TeamAssembler::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rank_candidates(
        &self,
        requirements: &SkillRequirements,
        profile: &ComplexityProfile,
        options: RankOptions,
    ) -> Result<Vec<EmployeeMatch>, RosterError> {
        let snapshot = self.loader.load()?;
        let ranked = self
            .ranker
            .rank(&snapshot, requirements, profile, options);

        info!(
            roster = snapshot.len(),
            returned = ranked.len(),
            strict = options.strict_required,
            "ranking complete"
        );

        Ok(ranked)
    }

    pub fn recommend_team(
        &self,
        requirements: &SkillRequirements,
        profile: &ComplexityProfile,
        options: TeamOptions,
    ) -> Result<TeamRun, RosterError> {
        let echo = self.echo(requirements, profile);

        if requirements.required.is_empty() {
            info!("no required skills; skipping team assembly");
            return Ok(TeamRun::without_required(echo));
        }

        let pool = self.rank_candidates(
            requirements,
            profile,
            RankOptions {
                top_n: options.pool_size,
                strict_required: false,
            },
        )?;

        let team = self
            .assembler
            .assemble(&pool, requirements, options.max_team_size);
        let score = team_score(&team.members);

        info!(
            pool = pool.len(),
            members = team.members.len(),
            coverage = team.coverage_ratio,
            missing = team.missing_skills.len(),
            "team recommendation complete"
        );

        let mut candidate_pool = pool;
        candidate_pool.truncate(POOL_PREVIEW_LIMIT);

        Ok(TeamRun {
            requirements: echo,
            complexity: ComplexitySummary {
                score: profile.complexity_score,
                label: profile.complexity_label,
                reasoning: profile.reasoning.clone(),
            },
            candidate_pool,
            team: team.members,
            team_coverage_required: team.coverage_ratio,
            missing_required: team.missing_skills,
            team_score: score,
        })
    }

    fn echo(&self, requirements: &SkillRequirements, profile: &ComplexityProfile) -> RequirementEcho {
        let scoring = &self.config.scoring;
        let required_targets = profile.required_targets();
        let preferred_targets = profile.preferred_targets();

        let required = requirements
            .required
            .iter()
            .map(|skill| EchoLine {
                skill: skill.skill.clone(),
                weight: skill.weight,
                confidence: skill.confidence,
                importance: skill.importance,
                target_level: resolved_level(
                    &required_targets,
                    &skill.skill,
                    scoring.required_default_target,
                ),
            })
            .collect();

        let preferred = requirements
            .preferred
            .iter()
            .map(|skill| EchoLine {
                skill: skill.skill.clone(),
                weight: skill.weight,
                confidence: skill.confidence,
                importance: skill.importance,
                target_level: resolved_level(
                    &preferred_targets,
                    &skill.skill,
                    scoring.preferred_default_target,
                ),
            })
            .collect();

        RequirementEcho {
            required,
            preferred,
        }
    }
}

fn resolved_level(
    targets: &SkillMap<&SkillTarget>,
    skill: &str,
    fallback: ProficiencyLevel,
) -> ProficiencyLevel {
    targets
        .get(skill)
        .map(|target| target.target_level)
        .unwrap_or(fallback)
}
