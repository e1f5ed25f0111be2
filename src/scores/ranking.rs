//! Scoreboard and top-3 leaderboard
//!
//! Both views are keyed by the session's `(date, time)`: a session updates its own
//! record instead of adding a second one.

use serde::{Deserialize, Serialize};

/// Maximum number of sessions kept on the leaderboard
pub const MAX_LEADERBOARD_ENTRIES: usize = 3;

/// Result of one play session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub date: String,
    pub time: String,
    pub final_score: i64,
    pub asteroids_destroyed: i64,
}

impl ScoreRecord {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        final_score: i64,
        asteroids_destroyed: i64,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            final_score,
            asteroids_destroyed,
        }
    }

    /// Records with the same date and time belong to the same session
    pub fn same_session(&self, other: &ScoreRecord) -> bool {
        self.date == other.date && self.time == other.time
    }
}

/// Chronological log of sessions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub games: Vec<ScoreRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self { games: Vec::new() }
    }

    /// Append `record`, or replace the last entry if it is the same session
    pub fn record(&mut self, record: ScoreRecord) {
        match self.games.last_mut() {
            Some(last) if last.same_session(&record) => *last = record,
            _ => self.games.push(record),
        }
    }
}

/// Best sessions, highest score first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub games: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self { games: Vec::new() }
    }

    /// Rank (0-indexed) a new session with `score` would take, None if it misses the cut
    pub fn potential_rank(&self, score: i64) -> Option<usize> {
        let rank = self
            .games
            .iter()
            .position(|e| score > e.final_score)
            .unwrap_or(self.games.len());
        (rank < MAX_LEADERBOARD_ENTRIES).then_some(rank)
    }

    /// Merge `record` into the board
    ///
    /// A session already on the board is replaced where it stands and moves up past
    /// lower scores; it never gains or loses a slot. A new session is inserted at its
    /// rank, pushing the last entry off a full board. Returns the record's rank
    /// (0-indexed), or None if it is not on the board.
    pub fn merge(&mut self, record: ScoreRecord) -> Option<usize> {
        if let Some(mut i) = self.games.iter().position(|e| e.same_session(&record)) {
            let score = record.final_score;
            self.games[i] = record;
            while i > 0 && self.games[i - 1].final_score < score {
                self.games.swap(i - 1, i);
                i -= 1;
            }
            return Some(i);
        }

        let rank = self.potential_rank(record.final_score)?;
        self.games.insert(rank, record);
        self.games.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.games.first().map(|e| e.final_score)
    }
}
