//! Traverse area estimation.
//!
//! A closed survey traverse (compass headings and distances) becomes a closed
//! polygon via closure adjustment; its area is then estimated to a relative
//! error bound by adaptive quadrant subdivision of its bounding box, returning
//! the confirmed-inside boxes as an auditable cover.
//!
//! Layout
//! - `geom`: predicates and value types (`Box2`, `Polygon`).
//! - `traverse`: measurement validation and polygon construction.
//! - `classify`: box vs polygon (inside / outside / intersecting).
//! - `estimate`: the refinement loop.
//! - `api`: pipeline entry points.
//!
//! Everything here is pure and single-threaded; rendering and user-facing
//! error display belong to callers.

pub mod api;
mod cfg;
pub mod classify;
pub mod error;
pub mod estimate;
pub mod geom;
pub mod traverse;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ConfigError, DegenerateInputError, Error, EstimateError, ValidationError};
pub use geom::{BoundingBox, Box2, Polygon, Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::measure_area;
    pub use crate::classify::{classify, classify_with, Classification, ClassifyCfg, ParityProbe};
    pub use crate::estimate::{
        estimate_area, estimate_area_with, AreaEstimate, EstimateCfg, EstimateStats, QueueOrder,
    };
    pub use crate::geom::{cross_z, segments_cross, vector, Box2, Polygon, Vec2};
    pub use crate::traverse::{
        build_polygon, build_traverse, measurements_from_tokens, measurements_from_values,
        parse_traverse, HeadingDistance, Traverse,
    };
}
