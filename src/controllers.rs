//! Built-in controllers: a fixed script and a random demo pilot

use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::ports::{Controller, PlayerCommand};

/// Unknown character in a command script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub position: usize,
    pub found: char,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown command {:?} at position {} (expected one of w a s d f p .)",
            self.found, self.position
        )
    }
}

impl std::error::Error for ScriptError {}

/// Plays back a fixed sequence of commands, then stays idle
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    commands: VecDeque<Option<PlayerCommand>>,
}

impl ScriptedController {
    pub fn new(commands: impl IntoIterator<Item = Option<PlayerCommand>>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    /// One character per tick: `w`/`a`/`s`/`d` boost, `f` fire, `p` pause, `.` idle
    ///
    /// Whitespace and commas are ignored.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut commands = VecDeque::new();
        for (position, c) in script.chars().enumerate() {
            let command = match c.to_ascii_lowercase() {
                'w' => Some(PlayerCommand::MoveShipUp),
                's' => Some(PlayerCommand::MoveShipDown),
                'a' => Some(PlayerCommand::MoveShipLeft),
                'd' => Some(PlayerCommand::MoveShipRight),
                'f' => Some(PlayerCommand::LaunchMissile),
                'p' => Some(PlayerCommand::PauseGame),
                '.' => None,
                c if c.is_whitespace() || c == ',' => continue,
                found => return Err(ScriptError { position, found }),
            };
            commands.push_back(command);
        }
        Ok(Self { commands })
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl Controller for ScriptedController {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        self.commands.pop_front().flatten()
    }
}

/// Random pilot for demo runs: fires often, drifts around, never pauses
#[derive(Debug, Clone)]
pub struct DemoController {
    rng: Pcg32,
    fire_chance: f64,
    move_chance: f64,
}

impl DemoController {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_chance: 0.15,
            move_chance: 0.1,
        }
    }
}

impl Controller for DemoController {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        let roll = self.rng.random::<f64>();
        if roll < self.fire_chance {
            return Some(PlayerCommand::LaunchMissile);
        }
        if roll < self.fire_chance + self.move_chance {
            // Sideways moves only, so the ship stays near the bottom
            return Some(if self.rng.random::<bool>() {
                PlayerCommand::MoveShipLeft
            } else {
                PlayerCommand::MoveShipRight
            });
        }
        None
    }
}
