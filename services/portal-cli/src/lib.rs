mod cli;
mod render;
mod session;

use career_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
