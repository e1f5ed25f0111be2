//! Collision detection and response between circular space objects
//!
//! Contact is resolved along the line of centers: each velocity is split into a
//! normal and a tangential part, only the normal parts exchange momentum.

use super::object::{ObjectId, ObjectKind, SpaceObject};
use crate::error::DomainError;

/// What the engine should do with an impacting pair beyond the physical response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Plain physical contact
    Bounce,
    /// A missile struck an asteroid; both are destroyed and the kill is scored
    AsteroidDestroyed {
        missile: ObjectId,
        asteroid: ObjectId,
    },
}

/// Dispatch table for kind-specific collision effects (order-independent)
pub fn collision_outcome(a: &SpaceObject, b: &SpaceObject) -> CollisionOutcome {
    match (a.kind, b.kind) {
        (ObjectKind::Missile, ObjectKind::Asteroid) => CollisionOutcome::AsteroidDestroyed {
            missile: a.id,
            asteroid: b.id,
        },
        (ObjectKind::Asteroid, ObjectKind::Missile) => CollisionOutcome::AsteroidDestroyed {
            missile: b.id,
            asteroid: a.id,
        },
        _ => CollisionOutcome::Bounce,
    }
}

impl SpaceObject {
    /// Overlapping and approaching each other
    ///
    /// Pairs that already separate are not impacts, so a resolved contact is not
    /// resolved a second time while the bodies still overlap.
    pub fn impacts(&self, other: &SpaceObject) -> bool {
        if self.id == other.id {
            return false;
        }
        let separation = other.center - self.center;
        let overlapping = separation.magnitude() <= self.radius + other.radius;
        let closing = (other.velocity - self.velocity) * separation < 0.0;
        overlapping && closing
    }

    /// Resolve a contact with `other` using the given restitution in [0, 1]
    ///
    /// On error neither velocity is modified.
    pub fn collide_with(
        &mut self,
        other: &mut SpaceObject,
        restitution: f64,
    ) -> Result<(), DomainError> {
        let total_mass = self.mass + other.mass;
        if total_mass == 0.0 {
            return Err(DomainError::ZeroTotalMass);
        }
        let normal = (other.center - self.center).unit()?;

        let u1 = self.velocity * normal;
        let u2 = other.velocity * normal;
        let momentum = self.mass * u1 + other.mass * u2;
        let v1 = (momentum + other.mass * restitution * (u2 - u1)) / total_mass;
        let v2 = (momentum + self.mass * restitution * (u1 - u2)) / total_mass;

        // Tangential parts are carried over untouched
        self.velocity = self.velocity + (v1 - u1) * normal;
        other.velocity = other.velocity + (v2 - u2) * normal;
        Ok(())
    }
}
