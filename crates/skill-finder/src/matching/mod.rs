//! Candidate scoring, ranking, and team coverage against an employee skills directory.
//!
//! Upstream components supply a [`SkillRequirements`] document and a [`ComplexityProfile`];
//! this module turns them into a ranked candidate list and a small team that jointly covers
//! the required skills.

pub mod domain;
pub mod input;
pub mod keys;
pub mod ranking;
pub mod roster;
pub mod scoring;
pub mod service;
pub mod team;
pub mod workstreams;

#[cfg(test)]
mod tests;

pub use domain::{
    ComplexityLabel, ComplexityProfile, EmployeeMatch, EmployeeRecord, EmployeeSkillRecord,
    MatchDetail, PreferredSkill, ProficiencyLevel, RequiredSkill, SkillKind, SkillRequirements,
    SkillTarget,
};
pub use input::{InputError, ProfileDocument, RequirementsDocument};
pub use keys::{SkillKey, SkillMap};
pub use ranking::{CandidateRanker, Exclusion, RankOptions, RankingConfig};
pub use roster::{
    open_store, CsvRosterStore, InMemoryRosterStore, RosterError, RosterLoader, RosterSnapshot,
    RosterStore, SqliteRosterStore,
};
pub use scoring::{MatchScorer, ScoringConfig};
pub use service::{
    ComplexitySummary, EchoLine, EngineConfig, MatchService, RequirementEcho, TeamOptions, TeamRun,
};
pub use team::{team_score, TeamAssembler, TeamRecommendation};
pub use workstreams::{
    run_workstreams, Workstream, WorkstreamOutcome, WorkstreamReport, WorkstreamRequest,
};
