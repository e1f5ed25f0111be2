//! Score keeping: session keys, ranking and persistence

pub mod ranking;
pub mod session;
pub mod store;

pub use ranking::{Leaderboard, MAX_LEADERBOARD_ENTRIES, ScoreRecord, Scoreboard};
pub use session::SessionKey;
pub use store::{JsonFileStore, LeaderboardStore, MemoryStore};
