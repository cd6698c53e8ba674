//! Pipeline entry points.
//!
//! - `build_polygon`: measurements → closed polygon + bounding box.
//! - `estimate_area`: polygon + bounds + tolerance → area and covering boxes.
//! - `measure_area`: raw text straight through both stages.

pub use crate::estimate::{estimate_area, estimate_area_with, AreaEstimate, EstimateCfg};
pub use crate::traverse::{build_polygon, build_traverse, parse_traverse, Traverse};

use crate::error::Error;

/// Parse, build and estimate in one call.
///
/// Validation errors abort before any geometry; configuration errors before
/// any subdivision.
pub fn measure_area(text: &str, cfg: &EstimateCfg) -> Result<(Traverse, AreaEstimate), Error> {
    let measurements = parse_traverse(text)?;
    let trav = build_traverse(&measurements)?;
    let est = estimate_area_with(trav.polygon(), trav.bounds(), cfg)?;
    Ok((trav, est))
}
