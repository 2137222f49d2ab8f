//! Embedded schema migrations.
//!
//! SQL files live in `migrations/sqlite/` at the workspace root and are
//! compiled into the binary, so a fresh install needs no external files.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");
    MIGRATOR.run(pool).await?;
    info!(count = MIGRATOR.migrations.len(), "All migrations applied");
    Ok(())
}
