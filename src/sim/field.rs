//! The space field: entity ownership, spawning, movement and boundary trimming
//!
//! Objects are addressed by [`ObjectId`] rather than by position in a collection,
//! so callers can hold on to an id across removals.

use serde::Serialize;

use super::object::{Explosion, ObjectId, ObjectKind, SpaceObject};
use super::state::{EngineState, ScoreState};
use crate::config::FieldConfig;
use crate::physics::{Point2D, Vector2D};
use crate::ports::RandomGenerator;

/// Owned view of the field handed to visualizers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceFieldSnapshot {
    pub width: f64,
    pub height: f64,
    pub ship: SpaceObject,
    pub missiles: Vec<SpaceObject>,
    pub asteroids: Vec<SpaceObject>,
    pub explosions: Vec<Explosion>,
    pub playing: bool,
    pub score: ScoreState,
    pub tick: u64,
}

impl SpaceFieldSnapshot {
    /// Every object, in the field's iteration order
    pub fn space_objects(&self) -> impl Iterator<Item = &SpaceObject> {
        std::iter::once(&self.ship)
            .chain(&self.missiles)
            .chain(&self.asteroids)
            .chain(self.explosions.iter().map(|e| &e.object))
    }
}

pub struct SpaceField {
    width: f64,
    height: f64,
    config: FieldConfig,
    generator: Box<dyn RandomGenerator>,
    ship: SpaceObject,
    missiles: Vec<SpaceObject>,
    asteroids: Vec<SpaceObject>,
    explosions: Vec<Explosion>,
    next_id: u32,
}

impl SpaceField {
    /// Create a field with the ship parked at the bottom center
    pub fn new(
        width: f64,
        height: f64,
        config: FieldConfig,
        generator: Box<dyn RandomGenerator>,
    ) -> Self {
        let ship = SpaceObject::new(
            ObjectId(0),
            ObjectKind::Ship,
            Point2D::new(width / 2.0, 1.0),
            Vector2D::ZERO,
            config.ship_radius,
            config.ship_mass,
        );
        Self {
            width,
            height,
            config,
            generator,
            ship,
            missiles: Vec::new(),
            asteroids: Vec::new(),
            explosions: Vec::new(),
            next_id: 1,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn ship(&self) -> &SpaceObject {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut SpaceObject {
        &mut self.ship
    }

    pub fn missiles(&self) -> &[SpaceObject] {
        &self.missiles
    }

    pub fn asteroids(&self) -> &[SpaceObject] {
        &self.asteroids
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Draw one sample from the field's random source
    pub fn generate_probability(&mut self) -> f64 {
        self.generator.generate_probability()
    }

    /// Every live object: ship, missiles, asteroids, explosions
    pub fn space_objects(&self) -> impl Iterator<Item = &SpaceObject> {
        std::iter::once(&self.ship)
            .chain(&self.missiles)
            .chain(&self.asteroids)
            .chain(self.explosions.iter().map(|e| &e.object))
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.space_objects().map(|o| o.id).collect()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SpaceObject> {
        self.space_objects().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SpaceObject> {
        if self.ship.id == id {
            return Some(&mut self.ship);
        }
        self.missiles
            .iter_mut()
            .chain(self.asteroids.iter_mut())
            .chain(self.explosions.iter_mut().map(|e| &mut e.object))
            .find(|o| o.id == id)
    }

    fn next_object_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    // === Ship controls ===

    pub fn boost_up(&mut self) {
        self.ship.boost(Vector2D::new(0.0, self.config.ship_boost));
    }

    pub fn boost_down(&mut self) {
        self.ship.boost(Vector2D::new(0.0, -self.config.ship_boost));
    }

    pub fn boost_left(&mut self) {
        self.ship.boost(Vector2D::new(-self.config.ship_boost, 0.0));
    }

    pub fn boost_right(&mut self) {
        self.ship.boost(Vector2D::new(self.config.ship_boost, 0.0));
    }

    // === Movement ===

    /// Move the ship, keeping it inside the field
    ///
    /// An axis that hits the border loses its velocity component.
    pub fn move_ship(&mut self) {
        self.ship.advance();
        let ship = &mut self.ship;
        if !(0.0..=self.width).contains(&ship.center.x) {
            ship.center.x = ship.center.x.clamp(0.0, self.width);
            ship.velocity.dx = 0.0;
        }
        if !(0.0..=self.height).contains(&ship.center.y) {
            ship.center.y = ship.center.y.clamp(0.0, self.height);
            ship.velocity.dy = 0.0;
        }
    }

    pub fn move_asteroids(&mut self) {
        self.asteroids.iter_mut().for_each(SpaceObject::advance);
    }

    pub fn move_missiles(&mut self) {
        self.missiles.iter_mut().for_each(SpaceObject::advance);
    }

    // === Trimming ===

    pub fn trim_asteroids(&mut self) {
        let (width, height) = (self.width, self.height);
        self.asteroids.retain(|a| a.in_bounds(width, height));
    }

    pub fn trim_missiles(&mut self) {
        let (width, height) = (self.width, self.height);
        self.missiles.retain(|m| m.in_bounds(width, height));
    }

    pub fn trim_explosions(&mut self) {
        let (width, height) = (self.width, self.height);
        self.explosions
            .retain(|e| !e.is_triggered() && e.object.in_bounds(width, height));
    }

    // === Spawning ===

    pub fn insert_asteroid(
        &mut self,
        center: Point2D,
        velocity: Vector2D,
        radius: f64,
        mass: f64,
    ) -> ObjectId {
        let id = self.next_object_id();
        self.asteroids.push(SpaceObject::new(
            id,
            ObjectKind::Asteroid,
            center,
            velocity,
            radius,
            mass,
        ));
        id
    }

    pub fn insert_missile(&mut self, center: Point2D, velocity: Vector2D) -> ObjectId {
        let id = self.next_object_id();
        self.missiles.push(SpaceObject::new(
            id,
            ObjectKind::Missile,
            center,
            velocity,
            self.config.missile_radius,
            self.config.missile_mass,
        ));
        id
    }

    /// Spawn an asteroid on the top edge, heading into the field
    pub fn generate_asteroid(&mut self) -> ObjectId {
        let cfg = self.config.clone();
        let x = self.generate_probability() * self.width;
        let speed = self.random_in(cfg.asteroid_min_speed, cfg.asteroid_max_speed);
        let drift = (2.0 * self.generate_probability() - 1.0) * cfg.asteroid_max_drift * speed;
        let radius = self.random_in(cfg.asteroid_min_radius, cfg.asteroid_max_radius);
        let mass = self.random_in(cfg.asteroid_min_mass, cfg.asteroid_max_mass);

        let id = self.insert_asteroid(
            Point2D::new(x, self.height),
            Vector2D::new(drift, -speed),
            radius,
            mass,
        );
        log::debug!("Spawned asteroid {id} at x={x:.2} (r={radius:.2}, m={mass:.1})");
        id
    }

    /// Launch a missile straight ahead of the ship
    pub fn generate_missile(&mut self) -> ObjectId {
        let offset =
            self.ship.radius + self.config.missile_radius + self.config.missile_distance_from_ship;
        let center = self.ship.center + Vector2D::new(0.0, offset);
        let id = self.insert_missile(center, Vector2D::new(0.0, self.config.missile_speed));
        log::debug!("Launched missile {id} from {center}");
        id
    }

    /// Place a motionless explosion at `at`
    pub fn generate_explosion(&mut self, at: Point2D) -> ObjectId {
        let id = self.next_object_id();
        self.explosions.push(Explosion::new(SpaceObject::new(
            id,
            ObjectKind::Explosion,
            at,
            Vector2D::ZERO,
            self.config.explosion_radius,
            self.config.explosion_mass,
        )));
        id
    }

    /// Advance every explosion timer by one tick
    pub fn iniciate_explosion(&mut self) {
        self.explosions.iter_mut().for_each(Explosion::iniciate);
    }

    // === Removal ===

    pub fn delete_asteroid(&mut self, id: ObjectId) -> bool {
        remove_by_id(&mut self.asteroids, id)
    }

    pub fn delete_missile(&mut self, id: ObjectId) -> bool {
        remove_by_id(&mut self.missiles, id)
    }

    /// Owned copy of the current field for rendering
    pub fn snapshot(&self, state: &EngineState) -> SpaceFieldSnapshot {
        SpaceFieldSnapshot {
            width: self.width,
            height: self.height,
            ship: self.ship,
            missiles: self.missiles.clone(),
            asteroids: self.asteroids.clone(),
            explosions: self.explosions.clone(),
            playing: state.is_playing(),
            score: state.score,
            tick: state.time_ticks,
        }
    }

    fn random_in(&mut self, min: f64, max: f64) -> f64 {
        min + self.generate_probability() * (max - min)
    }
}

fn remove_by_id(objects: &mut Vec<SpaceObject>, id: ObjectId) -> bool {
    let before = objects.len();
    objects.retain(|o| o.id != id);
    objects.len() != before
}
