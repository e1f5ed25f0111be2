//! Collaborator interfaces consumed by the engine
//!
//! Input, rendering and randomness live outside the simulation; the engine only
//! sees these traits.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::SpaceFieldSnapshot;

/// Discrete player commands, at most one per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCommand {
    MoveShipUp,
    MoveShipDown,
    MoveShipLeft,
    MoveShipRight,
    LaunchMissile,
    PauseGame,
}

/// Source of player commands; must not block
pub trait Controller {
    fn next_player_command(&mut self) -> Option<PlayerCommand>;
}

/// Receives the field once per tick
pub trait Visualizer {
    fn render_space_field(&mut self, snapshot: &SpaceFieldSnapshot);
}

/// Uniform samples in [0, 1)
pub trait RandomGenerator {
    fn generate_probability(&mut self) -> f64;
}

/// Seeded PCG random source, reproducible for a given seed
#[derive(Debug, Clone)]
pub struct PcgRandom {
    rng: Pcg32,
}

impl PcgRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomGenerator for PcgRandom {
    fn generate_probability(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

impl<T: Controller + ?Sized> Controller for Box<T> {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        (**self).next_player_command()
    }
}

impl<T: Visualizer + ?Sized> Visualizer for Box<T> {
    fn render_space_field(&mut self, snapshot: &SpaceFieldSnapshot) {
        (**self).render_space_field(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcg_probabilities_in_unit_interval() {
        let mut random = PcgRandom::new(42);
        for _ in 0..1000 {
            let p = random.generate_probability();
            assert!((0.0..1.0).contains(&p));
        }
    }

    #[test]
    fn test_pcg_is_deterministic() {
        let mut a = PcgRandom::new(7);
        let mut b = PcgRandom::new(7);
        for _ in 0..16 {
            assert_eq!(a.generate_probability(), b.generate_probability());
        }
    }
}
