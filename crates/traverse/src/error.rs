//! Error taxonomy for the traverse pipeline.
//!
//! - `ValidationError`: malformed measurements, raised before any geometry.
//! - `ConfigError`: estimator settings out of range, raised before seeding.
//! - `DegenerateInputError`: inputs that cannot reach the error bound
//!   (flat or misplaced bounds, no interior, exhausted budget).

use thiserror::Error;

/// Malformed traverse input. Indices are 1-based measurement numbers.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("need a distance for every heading ({tokens} tokens given)")]
    MissingDistance { tokens: usize },

    #[error("need at least three bearings, got {found}")]
    TooFewBearings { found: usize },

    #[error("measurement {index}: {token} is not a valid heading (0 .. 359)")]
    InvalidHeading { index: usize, token: String },

    #[error("measurement {index}: {token} is not a valid distance, must be > 0")]
    InvalidDistance { index: usize, token: String },

    #[error("polygon needs at least three vertices, got {found}")]
    TooFewVertices { found: usize },
}

/// Estimator settings outside their admissible range.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("error {value} must be within (0, 0.5)")]
    MaxRelativeError { value: f64 },

    #[error("{field} must be positive")]
    ZeroBudget { field: &'static str },
}

/// Inputs for which the termination condition cannot be met.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DegenerateInputError {
    #[error("bounding box {width} x {height} encloses no area")]
    ZeroAreaBounds { width: f64, height: f64 },

    #[error("polygon vertex {vertex} at ({x}, {y}) lies outside the bounding box")]
    PolygonOutsideBounds { vertex: usize, x: f64, y: f64 },

    #[error("no box confirmed inside the polygon after {classified} classifications")]
    NoInterior { classified: usize },

    #[error(
        "subdivision budget exhausted after {classified} classifications \
         (area {area}, unresolved {unresolved})"
    )]
    BudgetExhausted {
        classified: usize,
        area: f64,
        unresolved: f64,
    },
}

/// Failure of a single area estimation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Degenerate(#[from] DegenerateInputError),
}

/// Any failure of the text-to-area pipeline.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Degenerate(#[from] DegenerateInputError),
}

impl From<EstimateError> for Error {
    fn from(e: EstimateError) -> Self {
        match e {
            EstimateError::Config(c) => Error::Config(c),
            EstimateError::Degenerate(d) => Error::Degenerate(d),
        }
    }
}
