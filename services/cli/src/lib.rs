mod cli;
mod infra;
mod report;

use skill_finder::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
