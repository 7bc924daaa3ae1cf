mod cli;
mod evaluate;
mod infra;
mod routes;
mod server;

use claims_review::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
