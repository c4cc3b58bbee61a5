//! Staffing several independent workstreams of one request concurrently.
//!
//! Each workstream gets its own blocking job and its own roster snapshot. A failure in one
//! workstream is reported in place and never aborts the others.

use std::io::Read;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::domain::{ComplexityProfile, SkillRequirements};
use super::input::{InputError, ProfileDocument, RequirementsDocument};
use super::roster::RosterStore;
use super::service::{MatchService, TeamOptions, TeamRun};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workstream {
    pub name: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone)]
pub struct WorkstreamRequest {
    pub workstream: Workstream,
    pub requirements: SkillRequirements,
    pub profile: ComplexityProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WorkstreamOutcome {
    Completed { run: TeamRun },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkstreamReport {
    pub workstream: Workstream,
    pub outcome: WorkstreamOutcome,
}

impl WorkstreamReport {
    pub fn run(&self) -> Option<&TeamRun> {
        match &self.outcome {
            WorkstreamOutcome::Completed { run } => Some(run),
            WorkstreamOutcome::Failed { .. } => None,
        }
    }
}

/// Runs every request on the blocking pool with at most `concurrency` in flight.
/// Reports come back in request order. `concurrency` is clamped to `1..=Semaphore::MAX_PERMITS`.
pub async fn run_workstreams<S>(
    service: Arc<MatchService<S>>,
    requests: Vec<WorkstreamRequest>,
    options: TeamOptions,
    concurrency: usize,
) -> Vec<WorkstreamReport>
where
    S: RosterStore + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.clamp(1, Semaphore::MAX_PERMITS)));
    let mut handles = Vec::with_capacity(requests.len());

    for request in requests {
        let service = Arc::clone(&service);
        let permits = Arc::clone(&permits);
        let workstream = request.workstream.clone();

        let handle = tokio::spawn(async move {
            let permit = permits.acquire_owned().await;
            let result = tokio::task::spawn_blocking(move || {
                service.recommend_team(&request.requirements, &request.profile, options)
            })
            .await;
            drop(permit);
            result
        });

        handles.push((workstream, handle));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for (workstream, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(Ok(run))) => {
                debug!(workstream = %workstream.name, members = run.team.len(), "workstream staffed");
                WorkstreamOutcome::Completed { run }
            }
            Ok(Ok(Err(err))) => failed(&workstream, err.to_string()),
            Ok(Err(err)) | Err(err) => failed(&workstream, err.to_string()),
        };

        reports.push(WorkstreamReport {
            workstream,
            outcome,
        });
    }

    reports
}

fn failed(workstream: &Workstream, reason: String) -> WorkstreamOutcome {
    warn!(workstream = %workstream.name, %reason, "workstream failed");
    WorkstreamOutcome::Failed { reason }
}

/// One entry of a workstream plan file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkstreamDocument {
    #[serde(flatten)]
    pub workstream: Workstream,
    #[serde(default)]
    pub requirements: RequirementsDocument,
    #[serde(default)]
    pub profile: ProfileDocument,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkstreamPlanDocument {
    #[serde(default)]
    pub workstreams: Vec<WorkstreamDocument>,
}

impl WorkstreamPlanDocument {
    pub fn into_requests(self) -> Vec<WorkstreamRequest> {
        self.workstreams
            .into_iter()
            .map(|document| WorkstreamRequest {
                workstream: document.workstream,
                requirements: document.requirements.into_requirements(),
                profile: document.profile.into_profile(),
            })
            .collect()
    }
}

pub fn plan_from_reader<R: Read>(reader: R) -> Result<Vec<WorkstreamRequest>, InputError> {
    let document: WorkstreamPlanDocument = serde_json::from_reader(reader)?;
    Ok(document.into_requests())
}
