//! Box/polygon classification: inside, outside, or straddling the boundary.
//!
//! Model
//! - A box that no polygon edge properly crosses or passes through, and that
//!   holds no polygon vertex in its interior, lies wholly on one side of the
//!   boundary. One probe point then decides the side by ray-crossing parity.
//! - The parity ray runs from the probe to a point beyond `outer`'s max corner.
//!   Crossings use the strict predicate, so a ray through a polygon vertex
//!   would miscount; such rays are bent (endpoint stepped down along
//!   `x = outer.max_x + 1`) until no vertex lies on them.
//!
//! Touching configurations are not crossings: a box whose side lies along a
//! polygon edge is Inside or Outside, never Intersecting.

use crate::cfg::{RAY_ATTEMPTS, RAY_COLLINEAR_EPS, RAY_STEP_DIVISOR};
use crate::geom::{cross_z, segments_cross, Box2, Polygon, Vec2};

/// Relationship of a box to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Inside,
    Outside,
    Intersecting,
}

/// Point of the box the parity ray starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParityProbe {
    /// `(min_x, max_y)`. Lies on the polygon boundary for boxes flush against
    /// an edge, where the strict predicate undercounts.
    TopLeftCorner,
    /// Box center; strictly interior to the box.
    #[default]
    Center,
}

/// Classifier settings.
#[derive(Clone, Copy, Debug)]
pub struct ClassifyCfg {
    pub probe: ParityProbe,
    /// Ray endpoints tried before a grazing ray is accepted as is.
    pub ray_attempts: usize,
    /// Relative sine below which a vertex counts as lying on the ray.
    pub collinear_eps: f64,
}

impl Default for ClassifyCfg {
    fn default() -> Self {
        Self {
            probe: ParityProbe::default(),
            ray_attempts: RAY_ATTEMPTS,
            collinear_eps: RAY_COLLINEAR_EPS,
        }
    }
}

/// Classify `bx` against `polygon` with default settings.
///
/// `outer` must contain the polygon; the parity ray ends outside it.
pub fn classify(bx: &Box2, polygon: &Polygon, outer: &Box2) -> Classification {
    classify_with(bx, polygon, outer, &ClassifyCfg::default())
}

/// Classify `bx` against `polygon`.
pub fn classify_with(
    bx: &Box2,
    polygon: &Polygon,
    outer: &Box2,
    cfg: &ClassifyCfg,
) -> Classification {
    let sides = bx.edges();
    for (a, b) in polygon.edges() {
        if sides.iter().any(|&(p, q)| segments_cross(a, b, p, q)) {
            return Classification::Intersecting;
        }
    }
    if polygon.corners().iter().any(|&v| bx.contains_strict(v)) {
        return Classification::Intersecting;
    }
    // Edges entering only through corners or from points on the sides.
    if polygon.edges().any(|(a, b)| bx.segment_meets_interior(a, b)) {
        return Classification::Intersecting;
    }

    let probe = match cfg.probe {
        ParityProbe::TopLeftCorner => bx.corners()[0],
        ParityProbe::Center => bx.center(),
    };
    if crossing_count(probe, polygon, outer, cfg) % 2 == 1 {
        Classification::Inside
    } else {
        Classification::Outside
    }
}

/// Polygon edges crossed by the parity ray from `probe`.
pub fn crossing_count(probe: Vec2, polygon: &Polygon, outer: &Box2, cfg: &ClassifyCfg) -> usize {
    let end = parity_ray_end(probe, polygon, outer, cfg);
    polygon
        .edges()
        .filter(|&(a, b)| segments_cross(probe, end, a, b))
        .count()
}

/// First candidate endpoint whose ray misses every polygon vertex.
///
/// Candidate `k` is `(max_x + 1, max_y + 1 − k·step)`; `k = 0` is the corner
/// one unit beyond `outer`. All candidates lie right of `outer`.
fn parity_ray_end(probe: Vec2, polygon: &Polygon, outer: &Box2, cfg: &ClassifyCfg) -> Vec2 {
    let x = outer.max_x + 1.0;
    let step = (outer.height() + 2.0) / RAY_STEP_DIVISOR;
    let mut end = Vec2::new(x, outer.max_y + 1.0);
    for k in 0..cfg.ray_attempts.max(1) {
        end = Vec2::new(x, outer.max_y + 1.0 - (k as f64) * step);
        if !grazes_vertex(probe, end, polygon, cfg.collinear_eps) {
            break;
        }
        tracing::trace!(
            k,
            probe_x = probe.x,
            probe_y = probe.y,
            "parity_ray_grazes_vertex"
        );
    }
    end
}

/// Does any polygon vertex lie (within `eps`) on the open segment `probe → end`?
fn grazes_vertex(probe: Vec2, end: Vec2, polygon: &Polygon, eps: f64) -> bool {
    let d = end - probe;
    let dd = d.norm_squared();
    let dn = dd.sqrt();
    polygon.corners().iter().any(|&v| {
        let w = v - probe;
        let t = d.dot(&w);
        t > 0.0 && t < dd && cross_z(d, w).abs() <= eps * dn * w.norm()
    })
}
