//! Measurements → raw coordinates → closed polygon + bounding box.

use crate::error::ValidationError;
use crate::geom::{Box2, Polygon, Vec2};

use super::measure::{HeadingDistance, MIN_BEARINGS};

/// A traverse realized in the plane.
///
/// Keeps the raw (unadjusted) path next to the closed polygon so a renderer
/// can draw both; `bounds` covers the two together.
#[derive(Clone, Debug, PartialEq)]
pub struct Traverse {
    raw: Vec<Vec2>,
    polygon: Polygon,
    bounds: Box2,
}

impl Traverse {
    /// Raw coordinates from the origin, one more than the measurement count.
    pub fn raw(&self) -> &[Vec2] {
        &self.raw
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn bounds(&self) -> &Box2 {
        &self.bounds
    }

    /// Unadjusted end point minus start point.
    pub fn misclosure(&self) -> Vec2 {
        self.raw[self.raw.len() - 1] - self.raw[0]
    }

    /// Total measured length of the traverse.
    pub fn perimeter(&self) -> f64 {
        self.raw.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Perimeter over misclosure length ("1 in N"); infinite for an exact loop.
    pub fn precision_ratio(&self) -> f64 {
        let m = self.misclosure().norm();
        if m == 0.0 {
            f64::INFINITY
        } else {
            self.perimeter() / m
        }
    }

    pub fn into_parts(self) -> (Polygon, Box2) {
        (self.polygon, self.bounds)
    }
}

/// Build the closed polygon and its bounding box.
pub fn build_polygon(
    measurements: &[HeadingDistance],
) -> Result<(Polygon, Box2), ValidationError> {
    build_traverse(measurements).map(Traverse::into_parts)
}

/// Build the full traverse: raw path, closed polygon, bounding box.
pub fn build_traverse(measurements: &[HeadingDistance]) -> Result<Traverse, ValidationError> {
    if measurements.len() < MIN_BEARINGS {
        return Err(ValidationError::TooFewBearings {
            found: measurements.len(),
        });
    }
    let raw = raw_coordinates(measurements.iter().map(HeadingDistance::to_vector));
    let adjusted = adjust_closure(&raw);
    let bounds = Box2::from_points(raw.iter().chain(adjusted.iter()).copied())
        .ok_or(ValidationError::TooFewBearings { found: 0 })?;
    let trav = Traverse {
        raw,
        polygon: Polygon::from_closed_ring(adjusted),
        bounds,
    };
    tracing::debug!(
        measurements = measurements.len(),
        misclosure = trav.misclosure().norm(),
        width = bounds.width(),
        height = bounds.height(),
        "traverse_built"
    );
    Ok(trav)
}

/// Running sums of `vectors` starting at the origin.
pub fn raw_coordinates<I>(vectors: I) -> Vec<Vec2>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut out = vec![Vec2::zeros()];
    for v in vectors {
        let prev = out[out.len() - 1];
        out.push(prev + v);
    }
    out
}

/// Distribute the misclosure linearly over the vertex indices.
///
/// Vertex `i` moves by `(first − last) · i / n`, `n` the last index. The ratio
/// is exactly 1 at `i = n`, and the last vertex is then pinned to the first so
/// the ring closes bit-for-bit.
pub fn adjust_closure(raw: &[Vec2]) -> Vec<Vec2> {
    if raw.len() < 2 {
        return raw.to_vec();
    }
    let n = raw.len() - 1;
    let delta = raw[0] - raw[n];
    let mut out: Vec<Vec2> = raw
        .iter()
        .enumerate()
        .map(|(i, c)| c + delta * (i as f64 / n as f64))
        .collect();
    out[n] = out[0];
    out
}
