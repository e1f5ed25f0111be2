//! The game engine: one tick at a time
//!
//! A tick reads one player command, advances the field (unless paused) and then
//! renders. Nothing outside a tick touches the field or the score.

use std::time::Instant;

use super::collision::{CollisionOutcome, collision_outcome};
use super::field::SpaceField;
use super::object::{ObjectId, SpaceObject};
use super::pacing::{FramePacer, RunMode};
use super::state::{EngineState, GamePhase, ScoreState};
use crate::config::EngineConfig;
use crate::ports::{Controller, PlayerCommand, RandomGenerator, Visualizer};
use crate::scores::{LeaderboardStore, ScoreRecord, SessionKey};

pub struct GameEngine<C: Controller, V: Visualizer> {
    config: EngineConfig,
    field: SpaceField,
    controller: C,
    visualizer: V,
    store: Box<dyn LeaderboardStore>,
    session: SessionKey,
    state: EngineState,
    /// Top 3 as last returned by the store
    leaderboard: Vec<ScoreRecord>,
}

impl<C: Controller, V: Visualizer> GameEngine<C, V> {
    pub fn new(
        config: EngineConfig,
        generator: Box<dyn RandomGenerator>,
        controller: C,
        visualizer: V,
        store: Box<dyn LeaderboardStore>,
        session: SessionKey,
    ) -> Self {
        let field = SpaceField::new(
            f64::from(config.field_width),
            f64::from(config.field_height),
            config.field.clone(),
            generator,
        );
        let leaderboard = store.top3().unwrap_or_else(|err| {
            log::error!("Could not read leaderboard: {err}");
            Vec::new()
        });
        Self {
            config,
            field,
            controller,
            visualizer,
            store,
            session,
            state: EngineState::new(),
            leaderboard,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn field(&self) -> &SpaceField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut SpaceField {
        &mut self.field
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn score(&self) -> ScoreState {
        self.state.score
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn session(&self) -> &SessionKey {
        &self.session
    }

    pub fn leaderboard(&self) -> &[ScoreRecord] {
        &self.leaderboard
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn visualizer(&self) -> &V {
        &self.visualizer
    }

    pub fn store(&self) -> &dyn LeaderboardStore {
        self.store.as_ref()
    }

    /// Drive the engine; `Continuous` only returns when the process ends
    pub fn execute(&mut self, mode: RunMode) {
        log::info!(
            "Starting session {} {} ({:?})",
            self.session.date,
            self.session.time,
            mode
        );
        match mode {
            RunMode::Bounded(ticks) => {
                for _ in 0..ticks {
                    self.tick();
                }
                log::info!(
                    "Finished {ticks} ticks: score {}, {} asteroids destroyed",
                    self.state.score.total_score,
                    self.state.score.asteroids_destroyed
                );
            }
            RunMode::Continuous => {
                let pacer = FramePacer::new(self.config.ms_per_frame());
                loop {
                    let start = Instant::now();
                    self.tick();
                    pacer.sleep_from(start);
                }
            }
        }
    }

    /// Run one full tick
    pub fn tick(&mut self) {
        self.state.time_ticks += 1;
        self.process_player_input();
        self.update_space_objects();
        self.render_space_field();
    }

    /// Apply at most one command; only pause is honoured while paused
    pub fn process_player_input(&mut self) {
        let Some(command) = self.controller.next_player_command() else {
            return;
        };
        if command == PlayerCommand::PauseGame {
            self.state.phase = self.state.phase.toggled();
            log::debug!("Game {:?} at tick {}", self.state.phase, self.state.time_ticks);
            return;
        }
        if self.state.phase == GamePhase::Paused {
            return;
        }
        match command {
            PlayerCommand::MoveShipUp => self.field.boost_up(),
            PlayerCommand::MoveShipDown => self.field.boost_down(),
            PlayerCommand::MoveShipLeft => self.field.boost_left(),
            PlayerCommand::MoveShipRight => self.field.boost_right(),
            PlayerCommand::LaunchMissile => {
                self.field.generate_missile();
            }
            PlayerCommand::PauseGame => {}
        }
    }

    /// Simulation stages of the tick; skipped entirely while paused
    pub fn update_space_objects(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.handle_collisions();
        self.move_space_objects();
        self.trim_space_objects();
        self.generate_asteroids();
        self.set_timer_explosion();
    }

    /// Resolve every impacting pair once
    ///
    /// Only objects alive when the scan starts take part. A missile and asteroid
    /// destroyed by one pair are skipped by every later pair and leave the field
    /// when the scan ends.
    pub fn handle_collisions(&mut self) {
        let ids = self.field.object_ids();
        let restitution = self.config.coefficient_restitution;
        let mut destroyed: Vec<ObjectId> = Vec::new();

        for (i, &first_id) in ids.iter().enumerate() {
            for &second_id in &ids[i + 1..] {
                if destroyed.contains(&first_id) {
                    break;
                }
                if destroyed.contains(&second_id) {
                    continue;
                }
                let (Some(&first), Some(&second)) =
                    (self.field.object(first_id), self.field.object(second_id))
                else {
                    continue;
                };
                if !first.impacts(&second) {
                    continue;
                }

                let (mut first, mut second) = (first, second);
                match first.collide_with(&mut second, restitution) {
                    Ok(()) => {
                        self.write_velocity(&first);
                        self.write_velocity(&second);
                    }
                    Err(err) => log::debug!("Skipping response for {first_id}/{second_id}: {err}"),
                }

                if let CollisionOutcome::AsteroidDestroyed { missile, asteroid } =
                    collision_outcome(&first, &second)
                {
                    let rock = if first.id == asteroid { first } else { second };
                    self.score_asteroid(&rock);
                    destroyed.push(missile);
                    destroyed.push(asteroid);
                }
            }
        }

        for pair in destroyed.chunks(2) {
            self.field.delete_missile(pair[0]);
            self.field.delete_asteroid(pair[1]);
        }
    }

    fn write_velocity(&mut self, object: &SpaceObject) {
        if let Some(live) = self.field.object_mut(object.id) {
            live.velocity = object.velocity;
        }
    }

    /// Explosion, score and score records for a destroyed asteroid
    fn score_asteroid(&mut self, asteroid: &SpaceObject) {
        self.field.generate_explosion(asteroid.center);
        let delta = ScoreState::asteroid_value(asteroid.mass, asteroid.radius);
        self.state.score.add_kill(delta);
        log::info!(
            "Asteroid {} destroyed for {delta} points (total {})",
            asteroid.id,
            self.state.score.total_score
        );

        let record = self.session.record(&self.state.score);
        if let Err(err) = self.store.append_or_replace_last_session(&record) {
            log::error!("Failed to update scoreboard: {err}");
        }
        match self.store.merge_into_top3(&record) {
            Ok(top) => {
                if let Some(rank) = top.iter().position(|e| e.same_session(&record)) {
                    log::info!("Session ranked #{} on the leaderboard", rank + 1);
                }
                self.leaderboard = top;
            }
            Err(err) => log::error!("Failed to update leaderboard: {err}"),
        }
    }

    pub fn move_space_objects(&mut self) {
        self.field.move_ship();
        self.field.move_asteroids();
        self.field.move_missiles();
    }

    pub fn trim_space_objects(&mut self) {
        self.field.trim_asteroids();
        self.field.trim_missiles();
        self.field.trim_explosions();
    }

    /// Spawn an asteroid when the sample is at or below the configured chance
    pub fn generate_asteroids(&mut self) {
        let probability = self.field.generate_probability();
        if probability <= self.config.asteroid_probability {
            self.field.generate_asteroid();
        }
    }

    pub fn set_timer_explosion(&mut self) {
        self.field.iniciate_explosion();
    }

    /// Hand the current field to the visualizer, paused or not
    pub fn render_space_field(&mut self) {
        let snapshot = self.field.snapshot(&self.state);
        self.visualizer.render_space_field(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EXPLOSION_LIFETIME_TICKS;
    use crate::controllers::ScriptedController;
    use crate::physics::{Point2D, Vector2D};
    use crate::scores::MemoryStore;
    use crate::test_support::{FailingStore, FixedProbability, RecordingVisualizer};

    type TestEngine = GameEngine<ScriptedController, RecordingVisualizer>;

    fn engine_with(
        commands: Vec<Option<PlayerCommand>>,
        probability: f64,
        asteroid_probability: f64,
        store: Box<dyn LeaderboardStore>,
    ) -> TestEngine {
        let config = EngineConfig {
            asteroid_probability,
            ..EngineConfig::default()
        };
        GameEngine::new(
            config,
            Box::new(FixedProbability(probability)),
            ScriptedController::new(commands),
            RecordingVisualizer::default(),
            store,
            SessionKey::new("19 Oct 2026", "08:00:00 PM"),
        )
    }

    fn quiet_engine(commands: Vec<Option<PlayerCommand>>) -> TestEngine {
        engine_with(commands, 0.5, 0.0, Box::new(MemoryStore::new()))
    }

    /// Missile below an asteroid, closing in (mass 10, radius 2.5)
    fn arm_kill(engine: &mut TestEngine) -> (ObjectId, ObjectId) {
        let field = engine.field_mut();
        let missile = field.insert_missile(Point2D::new(5.0, 9.0), Vector2D::new(0.0, 1.0));
        let asteroid =
            field.insert_asteroid(Point2D::new(5.0, 10.0), Vector2D::new(0.0, -1.0), 2.5, 10.0);
        (missile, asteroid)
    }

    #[test]
    fn test_bounded_mode_runs_exact_ticks() {
        let mut engine = quiet_engine(Vec::new());
        engine.execute(RunMode::Bounded(7));
        assert_eq!(engine.state().time_ticks, 7);
        assert_eq!(engine.visualizer().frames.len(), 7);
        assert_eq!(engine.visualizer().frames[6].tick, 7);
    }

    #[test]
    fn test_missile_kill_scores_mass_over_radius() {
        let mut engine = quiet_engine(Vec::new());
        let (missile, asteroid) = arm_kill(&mut engine);

        engine.tick();

        assert_eq!(
            engine.score(),
            ScoreState {
                total_score: 4,
                asteroids_destroyed: 1
            }
        );
        assert!(engine.field().object(missile).is_none());
        assert!(engine.field().object(asteroid).is_none());
        assert_eq!(engine.field().explosions().len(), 1);
        assert_eq!(
            engine.field().explosions()[0].object.center,
            Point2D::new(5.0, 10.0)
        );
        assert_eq!(
            engine.leaderboard(),
            [ScoreRecord::new("19 Oct 2026", "08:00:00 PM", 4, 1)]
        );
        assert_eq!(engine.store().top3().unwrap(), engine.leaderboard());
    }

    #[test]
    fn test_missile_destroys_only_first_asteroid() {
        let mut engine = quiet_engine(Vec::new());
        let field = engine.field_mut();
        let missile = field.insert_missile(Point2D::new(5.0, 9.0), Vector2D::new(0.0, 1.0));
        let first =
            field.insert_asteroid(Point2D::new(4.5, 10.0), Vector2D::new(0.0, -1.0), 2.0, 30.0);
        let second =
            field.insert_asteroid(Point2D::new(5.5, 10.0), Vector2D::new(0.0, -1.0), 2.0, 30.0);

        engine.tick();

        assert!(engine.field().object(missile).is_none());
        assert!(engine.field().object(first).is_none());
        assert!(engine.field().object(second).is_some());
        assert_eq!(engine.score().asteroids_destroyed, 1);
        assert_eq!(engine.score().total_score, 15);
    }

    #[test]
    fn test_bouncing_asteroids_exchange_momentum() {
        let mut engine = quiet_engine(Vec::new());
        let field = engine.field_mut();
        let left = field.insert_asteroid(Point2D::new(4.0, 10.0), Vector2D::new(0.5, 0.0), 1.0, 5.0);
        let right =
            field.insert_asteroid(Point2D::new(5.5, 10.0), Vector2D::new(-0.5, 0.0), 1.0, 5.0);

        engine.handle_collisions();

        let e = engine.config().coefficient_restitution;
        let left = engine.field().object(left).unwrap();
        let right = engine.field().object(right).unwrap();
        assert!((left.velocity.dx + 0.5 * e).abs() < 1e-12);
        assert!((right.velocity.dx - 0.5 * e).abs() < 1e-12);
        assert_eq!(engine.score(), ScoreState::default());
    }

    #[test]
    fn test_pause_freezes_simulation_but_keeps_rendering() {
        use PlayerCommand::*;
        let mut engine = quiet_engine(vec![None, Some(PauseGame), None, None, Some(PauseGame), None]);
        let rock =
            engine
                .field_mut()
                .insert_asteroid(Point2D::new(3.0, 15.0), Vector2D::new(0.0, -0.5), 1.0, 5.0);

        engine.execute(RunMode::Bounded(6));

        let frames = &engine.visualizer().frames;
        assert_eq!(frames.len(), 6);
        let y = |i: usize| frames[i].asteroids.iter().find(|a| a.id == rock).unwrap().center.y;
        assert_eq!(y(0), 14.5);
        assert!(!frames[1].playing);
        assert_eq!(y(1), 14.5);
        assert_eq!(y(2), 14.5);
        assert_eq!(y(3), 14.5);
        assert!(frames[4].playing);
        assert_eq!(y(4), 14.0);
        assert_eq!(y(5), 13.5);
    }

    #[test]
    fn test_commands_ignored_while_paused() {
        use PlayerCommand::*;
        let mut engine = quiet_engine(vec![
            Some(PauseGame),
            Some(MoveShipUp),
            Some(LaunchMissile),
            Some(PauseGame),
            Some(MoveShipRight),
        ]);
        engine.execute(RunMode::Bounded(4));
        assert!(engine.is_playing());
        assert_eq!(engine.field().ship().velocity, Vector2D::ZERO);
        assert!(engine.field().missiles().is_empty());

        engine.tick();
        assert_eq!(engine.field().ship().velocity, Vector2D::new(1.0, 0.0));
    }

    #[test]
    fn test_paused_game_keeps_score_and_explosions() {
        use PlayerCommand::*;
        let mut engine = quiet_engine(vec![None, Some(PauseGame)]);
        arm_kill(&mut engine);
        engine.execute(RunMode::Bounded(2));
        let age = engine.field().explosions()[0].age();

        engine.execute(RunMode::Bounded(20));
        assert_eq!(engine.score().total_score, 4);
        assert_eq!(engine.field().explosions()[0].age(), age);
    }

    #[test]
    fn test_launch_and_boost_commands() {
        use PlayerCommand::*;
        let mut engine = quiet_engine(vec![Some(LaunchMissile), Some(MoveShipLeft)]);
        engine.tick();
        assert_eq!(engine.field().missiles().len(), 1);
        engine.tick();
        assert_eq!(engine.field().ship().velocity, Vector2D::new(-1.0, 0.0));
    }

    #[test]
    fn test_spawn_threshold_is_inclusive() {
        let mut at_threshold = engine_with(Vec::new(), 0.25, 0.25, Box::new(MemoryStore::new()));
        at_threshold.tick();
        assert_eq!(at_threshold.field().asteroids().len(), 1);

        let mut above = engine_with(Vec::new(), 0.2500001, 0.25, Box::new(MemoryStore::new()));
        above.execute(RunMode::Bounded(10));
        assert!(above.field().asteroids().is_empty());
    }

    #[test]
    fn test_explosion_removed_after_lifetime() {
        let mut engine = quiet_engine(Vec::new());
        arm_kill(&mut engine);

        engine.execute(RunMode::Bounded(u64::from(EXPLOSION_LIFETIME_TICKS)));
        let explosions = engine.field().explosions();
        assert_eq!(explosions.len(), 1);
        assert!(explosions[0].is_triggered());

        engine.tick();
        assert!(engine.field().explosions().is_empty());
    }

    #[test]
    fn test_store_failure_does_not_stop_the_game() {
        let mut engine = engine_with(Vec::new(), 0.5, 0.0, Box::new(FailingStore));
        arm_kill(&mut engine);
        engine.execute(RunMode::Bounded(3));
        assert_eq!(engine.score().total_score, 4);
        assert!(engine.leaderboard().is_empty());
        assert_eq!(engine.visualizer().frames.len(), 3);
    }

    #[test]
    fn test_kills_update_session_records() {
        let mut engine = quiet_engine(Vec::new());
        arm_kill(&mut engine);
        engine.tick();
        arm_kill(&mut engine);
        engine.tick();

        assert_eq!(
            engine.leaderboard(),
            [ScoreRecord::new("19 Oct 2026", "08:00:00 PM", 8, 2)]
        );
    }
}
