pub use super::games::Entity as Games;
pub use super::guesses::Entity as Guesses;
pub use super::rounds::Entity as Rounds;
pub use super::streaks::Entity as Streaks;
pub use super::users::Entity as Users;
