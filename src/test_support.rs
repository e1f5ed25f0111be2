//! Stub collaborators for unit tests

use std::io;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::ports::{RandomGenerator, Visualizer};
use crate::scores::{LeaderboardStore, ScoreRecord};
use crate::sim::SpaceFieldSnapshot;

/// Always returns the same sample
pub struct FixedProbability(pub f64);

impl RandomGenerator for FixedProbability {
    fn generate_probability(&mut self) -> f64 {
        self.0
    }
}

/// Keeps every rendered frame
#[derive(Default)]
pub struct RecordingVisualizer {
    pub frames: Vec<SpaceFieldSnapshot>,
}

impl Visualizer for RecordingVisualizer {
    fn render_space_field(&mut self, snapshot: &SpaceFieldSnapshot) {
        self.frames.push(snapshot.clone());
    }
}

/// Store whose disk is always gone
pub struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("/unavailable/scores.json"),
            source: io::Error::other("disk unavailable"),
        }
    }
}

impl LeaderboardStore for FailingStore {
    fn append_or_replace_last_session(&mut self, _record: &ScoreRecord) -> Result<(), StoreError> {
        Err(Self::error())
    }

    fn merge_into_top3(&mut self, _record: &ScoreRecord) -> Result<Vec<ScoreRecord>, StoreError> {
        Err(Self::error())
    }

    fn top3(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Err(Self::error())
    }
}
