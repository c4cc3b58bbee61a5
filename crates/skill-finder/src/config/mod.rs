use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::matching::EngineConfig;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub roster: RosterConfig,
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let roster_path = env::var("ROSTER_PATH").unwrap_or_else(|_| "data/roster".to_string());

        let mut engine = EngineConfig::default();
        engine.top_n = number("MATCH_TOP_N", engine.top_n)?;
        engine.pool_size = number("MATCH_POOL_SIZE", engine.pool_size)?;
        engine.max_team_size = number("MATCH_MAX_TEAM_SIZE", engine.max_team_size)?;
        engine.concurrency = number("MATCH_WORKSTREAM_CONCURRENCY", engine.concurrency)?;
        engine.scoring.preferred_multiplier =
            ratio("MATCH_PREFERRED_MULTIPLIER", engine.scoring.preferred_multiplier)?;
        engine.ranking.min_required_signal =
            ratio("MATCH_MIN_REQUIRED_SIGNAL", engine.ranking.min_required_signal)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            roster: RosterConfig {
                path: PathBuf::from(roster_path),
            },
            engine,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

/// A finite number in `[0, 1]`.
fn ratio(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = number(key, default)?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidNumber { key })
    }
}

/// Location of the employee directory: a folder of CSV exports or a SQLite file.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a valid number in range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
