pub mod connection;
pub mod entities;
pub mod legacy;
pub mod repositories;

use anyhow::Result;
use sea_orm::DatabaseConnection;

use repositories::{GameRepository, StatsRepository, StreakRepository, UserRepository};

/// The open score store: one SQLite file, one connection, explicit lifecycle
/// (open → migrate → ready → close). Repositories hand out views onto the
/// same connection.
pub struct Store {
    connection: DatabaseConnection,
}

impl Store {
    /// Opens the store at `database_url` (e.g. `sqlite://scores.db?mode=rwc`)
    /// and applies any pending migrations.
    pub async fn open(database_url: &str) -> Result<Self> {
        let connection = connection::connect_and_migrate(database_url).await?;
        Ok(Self { connection })
    }

    /// Opens a fresh in-memory store. Used by tests.
    pub async fn open_in_memory() -> Result<Self> {
        let connection = connection::connect_to_memory_database().await?;
        Ok(Self { connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn games(&self) -> GameRepository {
        GameRepository::new(self.connection.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.connection.clone())
    }

    pub fn streaks(&self) -> StreakRepository {
        StreakRepository::new(self.connection.clone())
    }

    pub fn stats(&self) -> StatsRepository {
        StatsRepository::new(self.connection.clone())
    }

    pub async fn close(self) -> Result<()> {
        self.connection.close().await?;
        Ok(())
    }
}
