//! Error-bounded refinement loop.

use crate::cfg::MIN_ASPECT;
use crate::classify::{classify_with, Classification};
use crate::error::{DegenerateInputError, EstimateError};
use crate::geom::{Box2, Polygon};

use super::queue::{Cell, Pending};
use super::types::{AreaEstimate, EstimateCfg, EstimateStats};

/// Estimate the polygon's area to `max_rel_error` with default settings otherwise.
pub fn estimate_area(
    polygon: &Polygon,
    bounds: &Box2,
    max_rel_error: f64,
) -> Result<AreaEstimate, EstimateError> {
    estimate_area_with(polygon, bounds, &EstimateCfg::with_max_rel_error(max_rel_error))
}

/// Estimate the polygon's area by adaptive quadrant subdivision of `bounds`.
///
/// `bounds` must contain every polygon vertex; otherwise
/// `DegenerateInputError::PolygonOutsideBounds`.
/// Post: `0 <= area <= bounds.area()` and `unresolved <= cfg.max_rel_error * area`.
pub fn estimate_area_with(
    polygon: &Polygon,
    bounds: &Box2,
    cfg: &EstimateCfg,
) -> Result<AreaEstimate, EstimateError> {
    cfg.validate()?;
    check_bounds(polygon, bounds)?;
    Estimator::new(polygon, bounds, cfg).run()
}

/// Reject bounds that are non-finite, empty, flat at f64 resolution, or that
/// leave part of the polygon outside.
fn check_bounds(polygon: &Polygon, b: &Box2) -> Result<(), DegenerateInputError> {
    let (w, h) = (b.width(), b.height());
    let ok = w.is_finite()
        && h.is_finite()
        && w > 0.0
        && h > 0.0
        && w.min(h) > MIN_ASPECT * w.max(h);
    if !ok {
        return Err(DegenerateInputError::ZeroAreaBounds {
            width: w,
            height: h,
        });
    }
    match polygon.corners().iter().position(|&v| !b.contains(v)) {
        Some(i) => Err(DegenerateInputError::PolygonOutsideBounds {
            vertex: i,
            x: polygon.corners()[i].x,
            y: polygon.corners()[i].y,
        }),
        None => Ok(()),
    }
}

/// Estimation state; owned by one call.
struct Estimator<'a> {
    polygon: &'a Polygon,
    outer: &'a Box2,
    cfg: &'a EstimateCfg,
    pending: Pending,
    area: f64,
    error: f64,
    boxes: Vec<Box2>,
    stats: EstimateStats,
}

impl<'a> Estimator<'a> {
    fn new(polygon: &'a Polygon, outer: &'a Box2, cfg: &'a EstimateCfg) -> Self {
        Self {
            polygon,
            outer,
            cfg,
            pending: Pending::new(cfg.order),
            area: 0.0,
            error: 0.0,
            boxes: Vec::new(),
            stats: EstimateStats::default(),
        }
    }

    fn run(mut self) -> Result<AreaEstimate, EstimateError> {
        for q in self.outer.subdivide() {
            self.error += q.area();
            self.pending.push(q, 1);
        }
        tracing::debug!(
            edges = self.polygon.edge_count(),
            bounds_area = self.error,
            max_rel_error = self.cfg.max_rel_error,
            order = ?self.cfg.order,
            "estimate_seeded"
        );

        while self.error > self.cfg.max_rel_error * self.area {
            if self.stats.classified >= self.cfg.max_classifications {
                return Err(self.stalled());
            }
            let Some(cell) = self.pending.pop() else {
                return Err(self.stalled());
            };
            self.step(cell);
        }

        if self.area <= 0.0 {
            return Err(self.stalled());
        }
        tracing::debug!(
            area = self.area,
            unresolved = self.error,
            classified = self.stats.classified,
            subdivisions = self.stats.subdivisions,
            deepest = self.stats.deepest,
            pending = self.pending.len(),
            "estimate_done"
        );
        Ok(AreaEstimate {
            area: self.area,
            unresolved: self.error,
            boxes: self.boxes,
            stats: self.stats,
        })
    }

    fn step(&mut self, cell: Cell) {
        let a = cell.bx.area();
        self.error -= a;
        let class = classify_with(&cell.bx, self.polygon, self.outer, &self.cfg.classify);
        self.stats.classified += 1;
        self.stats.deepest = self.stats.deepest.max(cell.depth);
        tracing::trace!(depth = cell.depth, area = a, ?class, "box_classified");

        match class {
            Classification::Inside => {
                self.area += a;
                self.boxes.push(cell.bx);
            }
            Classification::Outside => {}
            Classification::Intersecting if cell.depth >= self.cfg.max_depth => {
                // Unsplittable: stays unresolved for good.
                self.error += a;
                self.stats.stranded += 1;
            }
            Classification::Intersecting => {
                self.stats.subdivisions += 1;
                for kid in cell.bx.subdivide() {
                    self.error += kid.area();
                    self.pending.push(kid, cell.depth + 1);
                }
            }
        }
    }

    /// The bound can no longer be reached.
    fn stalled(&self) -> EstimateError {
        let classified = self.stats.classified;
        tracing::warn!(
            classified,
            area = self.area,
            unresolved = self.error,
            stranded = self.stats.stranded,
            "estimate_stalled"
        );
        if self.area <= 0.0 {
            DegenerateInputError::NoInterior { classified }.into()
        } else {
            DegenerateInputError::BudgetExhausted {
                classified,
                area: self.area,
                unresolved: self.error,
            }
            .into()
        }
    }
}
