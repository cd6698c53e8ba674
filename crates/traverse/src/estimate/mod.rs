//! Adaptive area estimator.
//!
//! Purpose
//! - Cover a polygon with axis-aligned boxes obtained by repeated quadrant
//!   subdivision of its bounding box, and stop once the area still unresolved
//!   is at most `max_rel_error` times the confirmed inside area.
//!
//! Model
//! - Seed: the four quadrants of the bounding box; `error` = their total area.
//! - Step: take the next pending box, remove its area from `error`, classify.
//!   Inside adds to `area` and to the output list; Outside is dropped;
//!   Intersecting is split and its four quadrants re-enter `error`.
//! - `QueueOrder::Fifo` (default) processes boxes in insertion order;
//!   `QueueOrder::LargestFirst` takes the shallowest box first.
//! - `max_depth` and `max_classifications` bound the loop; inputs that cannot
//!   meet the bound within them end in `DegenerateInputError`.
//!
//! Code cross-refs: `classify::classify_with`, `geom::Box2::subdivide`

mod queue;
mod run;
mod types;

pub use run::{estimate_area, estimate_area_with};
pub use types::{AreaEstimate, EstimateCfg, EstimateStats, QueueOrder};

#[cfg(test)]
mod tests;
