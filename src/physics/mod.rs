//! Point and vector algebra used by the simulation

pub mod point;
pub mod vector;

pub use point::Point2D;
pub use vector::Vector2D;
