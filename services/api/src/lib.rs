mod cli;
mod infra;
mod routes;
mod scenarios;
mod server;

use scenario_ranking::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
