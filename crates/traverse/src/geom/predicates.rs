//! Exact-sign predicates on raw `f64` coordinates.
//!
//! No tolerance is applied here: a cross product that evaluates to exactly
//! zero means "not on opposite sides". Callers that need slack (the parity
//! ray) apply it themselves.

use super::Vec2;

/// Vector from `a` to `b`.
#[inline]
pub fn vector(a: Vec2, b: Vec2) -> Vec2 {
    b - a
}

/// z-component of the 3D cross product of two plane vectors.
///
/// Positive when `v2` is counterclockwise of `v1`, negative when clockwise.
#[inline]
pub fn cross_z(v1: Vec2, v2: Vec2) -> f64 {
    v1.x * v2.y - v1.y * v2.x
}

/// Strictly opposite signs. Zero or NaN on either side is never opposite.
#[inline]
fn opposite(z1: f64, z2: f64) -> bool {
    (z1 > 0.0 && z2 < 0.0) || (z1 < 0.0 && z2 > 0.0)
}

/// True iff the open segments `ab` and `pq` properly cross.
///
/// P and Q must lie strictly on opposite sides of the line through A and B,
/// and A and B strictly on opposite sides of the line through P and Q.
/// Touching at an endpoint and collinear overlap report `false`.
pub fn segments_cross(a: Vec2, b: Vec2, p: Vec2, q: Vec2) -> bool {
    let ab = vector(a, b);
    if !opposite(cross_z(ab, vector(a, p)), cross_z(ab, vector(a, q))) {
        return false;
    }
    let pq = vector(p, q);
    opposite(cross_z(pq, vector(p, a)), cross_z(pq, vector(p, b)))
}
