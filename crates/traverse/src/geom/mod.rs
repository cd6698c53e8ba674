//! Plane geometry for traverse area estimation.
//!
//! Purpose
//! - Exact-sign predicates (`vector`, `cross_z`, `segments_cross`) shared by
//!   the classifier and the parity ray.
//! - Value types: `Box2` (bounding box and subdivision cell) and `Polygon`
//!   (closed ring, first vertex repeated at the end).
//!
//! Conventions
//! - Vectors and coordinates are both `nalgebra::Vector2<f64>` (`Vec2`).
//! - The y axis points north; "top" means larger y.
//!
//! Code cross-refs: `classify::classify`, `traverse::build_traverse`

mod predicates;
mod types;

pub use predicates::{cross_z, segments_cross, vector};
pub use types::{BoundingBox, Box2, Polygon};

/// Plane vector or coordinate.
pub type Vec2 = nalgebra::Vector2<f64>;
