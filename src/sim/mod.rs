//! Simulation module
//!
//! All gameplay logic lives here. One tick is fully sequential:
//! - Objects are addressed by stable ids, never by collection position
//! - Iteration order is ship, missiles, asteroids, explosions
//! - No rendering, input or storage dependencies beyond the port traits

pub mod collision;
pub mod engine;
pub mod field;
pub mod object;
pub mod pacing;
pub mod state;

pub use collision::{CollisionOutcome, collision_outcome};
pub use engine::GameEngine;
pub use field::{SpaceField, SpaceFieldSnapshot};
pub use object::{Explosion, ObjectId, ObjectKind, SpaceObject};
pub use pacing::{FramePacer, RunMode};
pub use state::{EngineState, GamePhase, ScoreState};
