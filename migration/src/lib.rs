//! Forward-only schema migrations for the score store.
//!
//! NEVER modify a released migration, ONLY add new ones. Each migration runs
//! in its own transaction together with its version record; a failed body
//! leaves the store at the last completed version.

pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_base_tables;
mod m20240308_000002_create_guess_indices;
mod m20240415_000003_create_streaks;
mod m20240502_000004_create_game_winners;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_base_tables::Migration),
            Box::new(m20240308_000002_create_guess_indices::Migration),
            Box::new(m20240415_000003_create_streaks::Migration),
            Box::new(m20240502_000004_create_game_winners::Migration),
        ]
    }
}
