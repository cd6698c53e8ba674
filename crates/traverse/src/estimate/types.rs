//! Estimator configuration and results.

use crate::cfg::{
    DEFAULT_MAX_CLASSIFICATIONS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_REL_ERROR, MAX_REL_ERROR_LIMIT,
};
use crate::classify::ClassifyCfg;
use crate::error::ConfigError;
use crate::geom::Box2;

/// Order in which pending boxes are classified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueueOrder {
    /// Insertion order.
    #[default]
    Fifo,
    /// Shallowest (largest) box first; insertion order among equals.
    LargestFirst,
}

/// Estimator settings.
#[derive(Clone, Copy, Debug)]
pub struct EstimateCfg {
    /// Stop once `unresolved <= max_rel_error * area`. Must lie in (0, 0.5).
    pub max_rel_error: f64,
    pub order: QueueOrder,
    /// Depth at which an intersecting box is kept unresolved instead of split.
    /// Seed quadrants have depth 1.
    pub max_depth: u32,
    /// Hard cap on classified boxes.
    pub max_classifications: usize,
    pub classify: ClassifyCfg,
}

impl Default for EstimateCfg {
    fn default() -> Self {
        Self {
            max_rel_error: DEFAULT_MAX_REL_ERROR,
            order: QueueOrder::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_classifications: DEFAULT_MAX_CLASSIFICATIONS,
            classify: ClassifyCfg::default(),
        }
    }
}

impl EstimateCfg {
    /// Default settings with the given error bound.
    pub fn with_max_rel_error(max_rel_error: f64) -> Self {
        Self {
            max_rel_error,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = self.max_rel_error;
        // NaN fails both comparisons.
        if !(e > 0.0 && e < MAX_REL_ERROR_LIMIT) {
            return Err(ConfigError::MaxRelativeError { value: e });
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroBudget { field: "max_depth" });
        }
        if self.max_classifications == 0 {
            return Err(ConfigError::ZeroBudget {
                field: "max_classifications",
            });
        }
        Ok(())
    }
}

/// Counters describing one estimation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EstimateStats {
    /// Boxes taken off the queue and classified.
    pub classified: usize,
    /// Intersecting boxes split into quadrants.
    pub subdivisions: usize,
    /// Deepest level classified.
    pub deepest: u32,
    /// Intersecting boxes left unsplit at `max_depth`.
    pub stranded: usize,
}

/// Result of an area estimation.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaEstimate {
    /// Sum of confirmed-inside box areas.
    pub area: f64,
    /// Area still unresolved at termination; at most `max_rel_error * area`.
    pub unresolved: f64,
    /// Confirmed-inside boxes in confirmation order.
    pub boxes: Vec<Box2>,
    pub stats: EstimateStats,
}

impl AreaEstimate {
    /// Achieved `unresolved / area`.
    pub fn relative_error(&self) -> f64 {
        self.unresolved / self.area
    }

    /// Inside area plus everything unresolved: an upper bound on the true area.
    pub fn upper_bound(&self) -> f64 {
        self.area + self.unresolved
    }
}
