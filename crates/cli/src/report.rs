//! JSON shapes written by the CLI.

use serde::Serialize;
use traverse::estimate::{AreaEstimate, EstimateStats};
use traverse::traverse::Traverse;
use traverse::{Box2, Vec2};

#[derive(Debug, Serialize)]
pub struct TraverseReport {
    pub raw: Vec<[f64; 2]>,
    pub polygon: Vec<[f64; 2]>,
    /// `[min_x, min_y, max_x, max_y]`
    pub bounds: [f64; 4],
    pub misclosure: [f64; 2],
    pub perimeter: f64,
    /// Absent for an exact closure.
    pub precision_ratio: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub classified: usize,
    pub subdivisions: usize,
    pub deepest: u32,
    pub stranded: usize,
}

#[derive(Debug, Serialize)]
pub struct AreaReport {
    pub traverse: TraverseReport,
    pub area: f64,
    pub unresolved: f64,
    pub relative_error: f64,
    pub stats: StatsReport,
    /// Confirmed-inside boxes in confirmation order, `[min_x, min_y, max_x, max_y]`.
    pub boxes: Vec<[f64; 4]>,
}

#[inline]
fn pt(v: &Vec2) -> [f64; 2] {
    [v.x, v.y]
}

#[inline]
fn rect(b: &Box2) -> [f64; 4] {
    [b.min_x, b.min_y, b.max_x, b.max_y]
}

impl From<&Traverse> for TraverseReport {
    fn from(t: &Traverse) -> Self {
        let ratio = t.precision_ratio();
        Self {
            raw: t.raw().iter().map(pt).collect(),
            polygon: t.polygon().vertices().iter().map(pt).collect(),
            bounds: rect(t.bounds()),
            misclosure: pt(&t.misclosure()),
            perimeter: t.perimeter(),
            precision_ratio: ratio.is_finite().then_some(ratio),
        }
    }
}

impl From<&EstimateStats> for StatsReport {
    fn from(s: &EstimateStats) -> Self {
        Self {
            classified: s.classified,
            subdivisions: s.subdivisions,
            deepest: s.deepest,
            stranded: s.stranded,
        }
    }
}

impl AreaReport {
    pub fn new(trav: &Traverse, est: &AreaEstimate) -> Self {
        Self {
            traverse: trav.into(),
            area: est.area,
            unresolved: est.unresolved,
            relative_error: est.relative_error(),
            stats: (&est.stats).into(),
            boxes: est.boxes.iter().map(rect).collect(),
        }
    }
}
