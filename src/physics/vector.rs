//! Immutable 2D vector algebra
//!
//! Every operator returns a fresh value. Directional quantities (`unit`, `normal`,
//! `radiant`, projections) are undefined for the zero vector and report a
//! [`DomainError`] instead of producing NaN.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Point2D;
use crate::error::DomainError;

/// A displacement or velocity in field units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.as_dvec2().length()
    }

    #[inline]
    pub fn dot(self, other: Vector2D) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }

    /// Angle from the +x axis in radians, in (-π, π]
    pub fn radiant(self) -> Result<f64, DomainError> {
        let magnitude = self.nonzero_magnitude("radiant")?;
        // Rounding can push the ratio a hair outside acos' domain
        let angle = (self.dx / magnitude).clamp(-1.0, 1.0).acos();
        Ok(if self.dy >= 0.0 { angle } else { -angle })
    }

    pub fn degree(self) -> Result<f64, DomainError> {
        Ok(self.radiant()? * 180.0 / std::f64::consts::PI)
    }

    pub fn unit(self) -> Result<Vector2D, DomainError> {
        let magnitude = self.nonzero_magnitude("unit")?;
        Ok(self / magnitude)
    }

    /// Unit vector perpendicular to `self`, rotated clockwise
    pub fn normal(self) -> Result<Vector2D, DomainError> {
        self.nonzero_magnitude("normal")?;
        Vector2D::new(self.dy, -self.dx).unit()
    }

    /// Length of `self` along `target`
    pub fn scalar_project(self, target: Vector2D) -> Result<f64, DomainError> {
        Ok(self * target.unit()?)
    }

    /// Component of `self` parallel to `target`
    pub fn vector_project(self, target: Vector2D) -> Result<Vector2D, DomainError> {
        let direction = target.unit()?;
        Ok((self * direction) * direction)
    }

    fn nonzero_magnitude(self, operation: &'static str) -> Result<f64, DomainError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(DomainError::ZeroMagnitude { operation });
        }
        Ok(magnitude)
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2D(dx={}, dy={})", self.dx, self.dy)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        (self.as_dvec2() + rhs.as_dvec2()).into()
    }
}

impl Add<Point2D> for Vector2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.dx + rhs.x, self.dy + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        (self.as_dvec2() - rhs.as_dvec2()).into()
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.dx, -self.dy)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, scalar: f64) -> Vector2D {
        (self.as_dvec2() * scalar).into()
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, v: Vector2D) -> Vector2D {
        v * self
    }
}

/// Dot product
impl Mul for Vector2D {
    type Output = f64;

    fn mul(self, rhs: Vector2D) -> f64 {
        self.dot(rhs)
    }
}

impl Div<f64> for Vector2D {
    type Output = Vector2D;

    fn div(self, scalar: f64) -> Vector2D {
        Vector2D::new(self.dx / scalar, self.dy / scalar)
    }
}
