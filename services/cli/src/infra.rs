use std::path::PathBuf;
use std::sync::Arc;

use skill_finder::config::AppConfig;
use skill_finder::error::AppError;
use skill_finder::matching::{open_store, MatchService, RosterStore};
use skill_finder::telemetry;
use tracing::info;

pub(crate) type Service = MatchService<dyn RosterStore>;

/// Loads configuration, installs logging, and opens the roster the command points at.
pub(crate) fn bootstrap(roster: Option<PathBuf>) -> Result<(AppConfig, Arc<Service>), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = roster {
        config.roster.path = path;
    }

    telemetry::init(&config.telemetry)?;

    let store = open_store(&config.roster.path)?;
    info!(
        roster = %config.roster.path.display(),
        environment = ?config.environment,
        "roster store opened"
    );

    let service = Arc::new(MatchService::new(store, config.engine.clone()));
    Ok((config, service))
}
