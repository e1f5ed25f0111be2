//! Engine-owned game state
//!
//! Everything the tick pipeline mutates besides the field itself lives here.

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Simulation frozen, rendering continues
    Paused,
}

impl GamePhase {
    pub fn toggled(self) -> Self {
        match self {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        }
    }
}

/// Cumulative score for the running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub total_score: i64,
    pub asteroids_destroyed: i64,
}

impl ScoreState {
    /// Score awarded for destroying an asteroid: `floor(mass / radius)`
    pub fn asteroid_value(mass: f64, radius: f64) -> i64 {
        if radius <= 0.0 {
            return 0;
        }
        (mass / radius).floor() as i64
    }

    /// Record one destroyed asteroid worth `delta` points
    pub fn add_kill(&mut self, delta: i64) {
        self.total_score += delta;
        self.asteroids_destroyed += 1;
    }
}

/// Complete mutable engine state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineState {
    pub phase: GamePhase,
    pub score: ScoreState,
    /// Ticks executed so far, paused ones included
    pub time_ticks: u64,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
