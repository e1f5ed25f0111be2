//! Galaxy Raiders - a fixed-tick 2D space shooter
//!
//! Core modules:
//! - `physics`: Point and vector algebra
//! - `sim`: Objects, collisions, the space field and the tick engine
//! - `scores`: Session records, scoreboard and top-3 leaderboard
//! - `ports`: Controller, visualizer and random-source interfaces
//! - `config`: Engine configuration (TOML + environment)

pub mod config;
pub mod controllers;
pub mod error;
pub mod physics;
pub mod ports;
pub mod scores;
pub mod sim;
pub mod visualizer;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{EngineConfig, FieldConfig};
pub use error::{ConfigError, DomainError, StoreError};
pub use physics::{Point2D, Vector2D};
pub use sim::{GameEngine, RunMode};

/// Game constants
pub mod consts {
    pub const MILLISECONDS_PER_SECOND: u64 = 1000;

    /// Ticks an explosion stays on the field
    pub const EXPLOSION_LIFETIME_TICKS: u32 = 15;
}
