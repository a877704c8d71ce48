//! Bridge to the pre-relational JSON settings store. Identity fields are
//! migrated into the database on first sight of a user; the historical
//! counters stay in the old store and get merged into stats reads.

pub mod facade;
pub mod store;

pub use facade::{get_global_stats, get_or_migrate_user, get_user_stats};
pub use store::{JsonFileStore, LegacyStore};
