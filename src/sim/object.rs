//! Space objects: the shared entity record and the explosion variant

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::EXPLOSION_LIFETIME_TICKS;
use crate::physics::{Point2D, Vector2D};

/// Stable identity of an object for the lifetime of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Object variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Ship,
    Asteroid,
    Missile,
    Explosion,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Ship => "SpaceShip",
            ObjectKind::Asteroid => "Asteroid",
            ObjectKind::Missile => "Missile",
            ObjectKind::Explosion => "Explosion",
        }
    }

    /// Glyph used by text renderers
    pub fn symbol(&self) -> char {
        match self {
            ObjectKind::Ship => '@',
            ObjectKind::Asteroid => '.',
            ObjectKind::Missile => '^',
            ObjectKind::Explosion => '*',
        }
    }
}

/// Physical state shared by every object in the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub symbol: char,
    pub center: Point2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub mass: f64,
}

impl SpaceObject {
    pub fn new(
        id: ObjectId,
        kind: ObjectKind,
        center: Point2D,
        velocity: Vector2D,
        radius: f64,
        mass: f64,
    ) -> Self {
        debug_assert!(radius >= 0.0 && mass >= 0.0);
        Self {
            id,
            kind,
            symbol: kind.symbol(),
            center,
            velocity,
            radius,
            mass,
        }
    }

    /// Move by one tick's worth of velocity
    pub fn advance(&mut self) {
        self.center = self.center + self.velocity;
    }

    /// Add an impulse to the velocity (no cap)
    pub fn boost(&mut self, impulse: Vector2D) {
        self.velocity = self.velocity + impulse;
    }

    /// True unless the center is farther than `radius` outside the field
    pub fn in_bounds(&self, width: f64, height: f64) -> bool {
        let r = self.radius;
        (-r..=width + r).contains(&self.center.x) && (-r..=height + r).contains(&self.center.y)
    }
}

impl fmt::Display for SpaceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {} moving {} (r={}, m={})",
            self.kind.as_str(),
            self.id,
            self.center,
            self.velocity,
            self.radius,
            self.mass
        )
    }
}

/// A short-lived blast left where an asteroid was destroyed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub object: SpaceObject,
    age: u32,
    triggered: bool,
}

impl Explosion {
    pub fn new(object: SpaceObject) -> Self {
        debug_assert_eq!(object.kind, ObjectKind::Explosion);
        Self {
            object,
            age: 0,
            triggered: false,
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Spent explosions are dropped on the next trim pass
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Advance the explosion timer by one tick
    pub fn iniciate(&mut self) {
        self.age = self.age.saturating_add(1);
        if self.age >= EXPLOSION_LIFETIME_TICKS {
            self.triggered = true;
        }
    }
}
