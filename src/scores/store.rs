//! Score persistence
//!
//! The engine only talks to [`LeaderboardStore`]. [`JsonFileStore`] keeps two
//! pretty-printed JSON documents, one per view.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ranking::{Leaderboard, ScoreRecord, Scoreboard};
use crate::error::StoreError;

pub const SCOREBOARD_FILE: &str = "scoreboard.json";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";

pub trait LeaderboardStore {
    /// Log `record`, replacing the last entry if it is the same session
    fn append_or_replace_last_session(&mut self, record: &ScoreRecord) -> Result<(), StoreError>;

    /// Merge `record` into the ranked board and return the new top 3
    fn merge_into_top3(&mut self, record: &ScoreRecord) -> Result<Vec<ScoreRecord>, StoreError>;

    /// Current top 3
    fn top3(&self) -> Result<Vec<ScoreRecord>, StoreError>;
}

/// Keeps both views in memory for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub scoreboard: Scoreboard,
    pub leaderboard: Leaderboard,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryStore {
    fn append_or_replace_last_session(&mut self, record: &ScoreRecord) -> Result<(), StoreError> {
        self.scoreboard.record(record.clone());
        Ok(())
    }

    fn merge_into_top3(&mut self, record: &ScoreRecord) -> Result<Vec<ScoreRecord>, StoreError> {
        self.leaderboard.merge(record.clone());
        Ok(self.leaderboard.games.clone())
    }

    fn top3(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.leaderboard.games.clone())
    }
}

/// Scoreboard and leaderboard as JSON files in one directory
///
/// Every operation reads the file, updates it and writes it back. A missing file
/// is an empty log; a corrupt one is logged and replaced on the next write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    scoreboard_path: PathBuf,
    leaderboard_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(scoreboard_path: impl Into<PathBuf>, leaderboard_path: impl Into<PathBuf>) -> Self {
        Self {
            scoreboard_path: scoreboard_path.into(),
            leaderboard_path: leaderboard_path.into(),
        }
    }

    /// Store using the default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(SCOREBOARD_FILE), dir.join(LEADERBOARD_FILE))
    }

    pub fn scoreboard(&self) -> Result<Scoreboard, StoreError> {
        load_document(&self.scoreboard_path)
    }

    pub fn leaderboard(&self) -> Result<Leaderboard, StoreError> {
        load_document(&self.leaderboard_path)
    }
}

impl LeaderboardStore for JsonFileStore {
    fn append_or_replace_last_session(&mut self, record: &ScoreRecord) -> Result<(), StoreError> {
        let mut scoreboard = self.scoreboard()?;
        scoreboard.record(record.clone());
        save_document(&self.scoreboard_path, &scoreboard)
    }

    fn merge_into_top3(&mut self, record: &ScoreRecord) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut leaderboard = self.leaderboard()?;
        leaderboard.merge(record.clone());
        save_document(&self.leaderboard_path, &leaderboard)?;
        Ok(leaderboard.games)
    }

    fn top3(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.leaderboard()?.games)
    }
}

fn load_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    match serde_json::from_str(&text) {
        Ok(doc) => Ok(doc),
        Err(err) => {
            log::warn!("{}: unreadable score file, starting fresh: {err}", path.display());
            Ok(T::default())
        }
    }
}

fn save_document<T: Serialize>(path: &Path, doc: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(n: u32, score: i64, kills: i64) -> ScoreRecord {
        ScoreRecord::new(format!("0{n} Jan 2026"), "10:00:00 AM", score, kills)
    }

    #[test]
    fn test_memory_store_tracks_both_views() {
        let mut store = MemoryStore::new();
        store.append_or_replace_last_session(&rec(1, 10, 1)).unwrap();
        store.append_or_replace_last_session(&rec(1, 25, 2)).unwrap();
        let top = store.merge_into_top3(&rec(1, 25, 2)).unwrap();

        assert_eq!(store.scoreboard.games, vec![rec(1, 25, 2)]);
        assert_eq!(top, vec![rec(1, 25, 2)]);
        assert_eq!(store.top3().unwrap(), top);
    }

    #[test]
    fn test_file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());
        assert!(store.top3().unwrap().is_empty());

        store.append_or_replace_last_session(&rec(1, 10, 1)).unwrap();
        store.merge_into_top3(&rec(1, 10, 1)).unwrap();
        store.append_or_replace_last_session(&rec(2, 40, 3)).unwrap();
        let top = store.merge_into_top3(&rec(2, 40, 3)).unwrap();
        assert_eq!(top, vec![rec(2, 40, 3), rec(1, 10, 1)]);

        // A fresh handle sees the same data
        let reopened = JsonFileStore::in_dir(dir.path());
        assert_eq!(reopened.scoreboard().unwrap().games.len(), 2);
        assert_eq!(reopened.top3().unwrap(), top);

        let raw = fs::read_to_string(dir.path().join(LEADERBOARD_FILE)).unwrap();
        assert!(raw.contains("\"games\""));
        assert!(raw.contains("\"final_score\": 40"));
    }

    #[test]
    fn test_corrupt_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SCOREBOARD_FILE), "{ not json").unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());

        assert!(store.scoreboard().unwrap().games.is_empty());
        store.append_or_replace_last_session(&rec(1, 5, 1)).unwrap();
        assert_eq!(store.scoreboard().unwrap().games, vec![rec(1, 5, 1)]);
    }

    #[test]
    fn test_unwritable_location_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        // Parent of the score files is a regular file
        let mut store = JsonFileStore::in_dir(&blocker);
        let err = store.merge_into_top3(&rec(1, 5, 1)).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
