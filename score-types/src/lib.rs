pub mod game;
pub mod legacy;
pub mod location;
pub mod stats;

// Re-export all types
pub use game::*;
pub use legacy::*;
pub use location::*;
pub use stats::*;

/// The maximum attainable score for a single guess.
pub const PERFECT_SCORE: i32 = 5000;
