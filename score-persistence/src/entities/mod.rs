pub mod prelude;

pub mod games;
pub mod guesses;
pub mod rounds;
pub mod streaks;
pub mod users;
