mod migration;
mod sql;

use migration::{Migrator, MigratorTrait};
use once_cell::sync::OnceCell;
use sea_orm::{DatabaseConnection, DbErr};
use tempo_error::{storage::StorageError, StorageResult, TempoError, TempoResult};
use tempo_models::settings::Settings;
use tracing::{info, instrument};

static DB: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to the configured SQLite database, run pending migrations and
/// install the process-wide connection pool.
#[instrument(name = "init-storage", skip_all)]
pub async fn init(settings: &Settings) -> TempoResult<()> {
    let db = sql::sqlite::init_db(&settings.db.sqlite)
        .await
        .map_err(|e| {
            TempoError::InitializationError(format!("Failed to init SQLite database: {e}"))
        })?;

    Migrator::up(&db, None).await.map_err(|e| {
        TempoError::InitializationError(format!("Failed to migrate SQLite database: {e}"))
    })?;

    DB.set(db)
        .map_err(|_| TempoError::InitializationError("Storage already initialized".into()))?;

    info!("Storage initialized successfully");
    Ok(())
}

/// Handle to the shared connection pool. Fails until [`init`] has run.
#[inline]
pub fn connection() -> StorageResult<DatabaseConnection> {
    DB.get().cloned().ok_or(StorageError::StorageUnavailable)
}

/// Run all migrations against an externally managed connection.
///
/// Integration tests use this with per-test in-memory databases.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

#[instrument(name = "close-storage", skip_all)]
pub async fn close() -> TempoResult<()> {
    info!("Closing database connections...");
    if let Some(db) = DB.get() {
        db.clone().close().await?;
    }
    info!("Database connections closed successfully");
    Ok(())
}
