use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Connects to the store and brings the schema up to date.
///
/// Exactly one writer process owns the store file, so the pool is pinned to a
/// single connection; callers are serialized by the surrounding controller.
/// If any pending migration fails, the error propagates, the version stays at
/// the last completed migration, and no connection is handed out.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;

    info!(url = %database_url, "score store ready");
    Ok(db)
}

/// In-memory store for tests. Schema is applied the same way as on disk.
pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    connect_and_migrate("sqlite::memory:").await
}
