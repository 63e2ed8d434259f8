//! Database migration command.
//!
//! Migrations live in `crates/api/migrations/` and are embedded at build
//! time. The API server never runs them on startup.

use super::{CommandError, connect};

/// Apply pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let (_, pool) = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
