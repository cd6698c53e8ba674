//! Traverse builder: heading/distance measurements to a closed polygon.
//!
//! Purpose
//! - Validate raw tokens or values into `HeadingDistance` measurements.
//! - Fold measurement vectors into raw coordinates from the origin, distribute
//!   the misclosure linearly (closure adjustment), and compute the bounding box
//!   over raw and adjusted coordinates together.
//!
//! Pure transformation; nothing here draws or reports to a user.
//!
//! Code cross-refs: `geom::{Polygon, Box2}`, `estimate::estimate_area`

mod build;
mod measure;
pub mod rand;

pub use build::{adjust_closure, build_polygon, build_traverse, raw_coordinates, Traverse};
pub use measure::{
    measurements_from_tokens, measurements_from_values, parse_traverse, HeadingDistance,
    MIN_BEARINGS,
};
