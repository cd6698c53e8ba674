//! Axis-aligned boxes and closed polygon rings.
//!
//! - `Box2`: the bounding box of a traverse and the subdivision unit of the
//!   estimator. Same shape for both roles.
//! - `Polygon`: a closed ring whose last vertex is the first vertex, stored
//!   explicitly so that edges are plain consecutive pairs.

use super::Vec2;
use crate::error::ValidationError;

/// Axis-aligned rectangle `[min_x, max_x] × [min_y, max_y]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// The enclosing box of a traverse; same representation as a subdivision box.
pub type BoundingBox = Box2;

impl Box2 {
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every point; `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Self::new(first.x, first.y, first.x, first.y);
        for p in it {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.min_x + 0.5 * self.width(),
            self.min_y + 0.5 * self.height(),
        )
    }

    /// Corners in clockwise order starting at the top-left corner:
    /// top-left, top-right, bottom-right, bottom-left.
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min_x, self.max_y),
            Vec2::new(self.max_x, self.max_y),
            Vec2::new(self.max_x, self.min_y),
            Vec2::new(self.min_x, self.min_y),
        ]
    }

    /// The four sides as `(start, end)` pairs following `corners()`.
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let [p, q, r, s] = self.corners();
        [(p, q), (q, r), (r, s), (s, p)]
    }

    /// Four equal quadrants split at the midpoint of each axis:
    /// top-left, top-right, bottom-left, bottom-right.
    ///
    /// Children share their split lines exactly, so they tile the parent.
    pub fn subdivide(&self) -> [Box2; 4] {
        let mx = self.min_x + 0.5 * self.width();
        let my = self.min_y + 0.5 * self.height();
        [
            Box2::new(self.min_x, my, mx, self.max_y),
            Box2::new(mx, my, self.max_x, self.max_y),
            Box2::new(self.min_x, self.min_y, mx, my),
            Box2::new(mx, self.min_y, self.max_x, my),
        ]
    }

    /// Interior membership; points on the boundary are excluded.
    #[inline]
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.y > self.min_y && p.y < self.max_y
    }

    /// Closed membership; points on the boundary are included.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Does the segment `ab` pass through the interior of the box?
    ///
    /// Clips `ab` to the closed box (Liang-Barsky) and tests the midpoint of
    /// the clipped piece. A segment that runs along a side or only touches a
    /// corner stays on the boundary and reports `false`.
    pub fn segment_meets_interior(&self, a: Vec2, b: Vec2) -> bool {
        let d = b - a;
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [
            (-d.x, a.x - self.min_x),
            (d.x, self.max_x - a.x),
            (-d.y, a.y - self.min_y),
            (d.y, self.max_y - a.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
            } else if p < 0.0 {
                t0 = t0.max(q / p);
            } else {
                t1 = t1.min(q / p);
            }
        }
        t0 <= t1 && self.contains_strict(a + d * (0.5 * (t0 + t1)))
    }
}

/// Closed polygon ring.
///
/// Invariant: `verts.len() >= 4` and `verts[0] == verts[verts.len() - 1]`
/// bit-for-bit. The wraparound edge is therefore an ordinary consecutive pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    verts: Vec<Vec2>,
}

impl Polygon {
    /// Ring from explicit vertices. An open ring is closed by repeating the
    /// first vertex; a ring already closed is taken as is.
    pub fn closed(mut points: Vec<Vec2>) -> Result<Self, ValidationError> {
        let is_closed = points.len() > 1 && points.first() == points.last();
        let open_len = if is_closed {
            points.len() - 1
        } else {
            points.len()
        };
        if open_len < 3 {
            return Err(ValidationError::TooFewVertices { found: open_len });
        }
        if !is_closed {
            points.push(points[0]);
        }
        Ok(Self { verts: points })
    }

    /// Caller guarantees the ring invariant (used by the traverse builder).
    pub(crate) fn from_closed_ring(verts: Vec<Vec2>) -> Self {
        debug_assert!(verts.len() >= 4 && verts.first() == verts.last());
        Self { verts }
    }

    /// All ring vertices, the closing duplicate included.
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.verts
    }

    /// Distinct corners: the ring without its closing duplicate.
    #[inline]
    pub fn corners(&self) -> &[Vec2] {
        &self.verts[..self.verts.len() - 1]
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.verts.len() - 1
    }

    /// Consecutive vertex pairs of the ring, wraparound included.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.verts.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn first(&self) -> Vec2 {
        self.verts[0]
    }

    pub fn last(&self) -> Vec2 {
        self.verts[self.verts.len() - 1]
    }
}
