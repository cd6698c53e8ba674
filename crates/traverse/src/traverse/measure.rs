//! Heading/distance measurements and their validation.
//!
//! Tokens come in heading/distance pairs. Count checks run first so that an
//! incomplete trailing pair reports the missing distance rather than a value
//! error further up the list.

use std::f64::consts::PI;

use crate::error::ValidationError;
use crate::geom::Vec2;

/// Fewest heading/distance pairs that can enclose an area.
pub const MIN_BEARINGS: usize = 3;

/// One validated measurement: compass heading in whole degrees and a
/// positive, finite distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingDistance {
    heading: u16,
    distance: f64,
}

impl HeadingDistance {
    /// `None` unless `heading ∈ [0, 359]` and `distance` is finite and `> 0`.
    pub fn new(heading: u16, distance: f64) -> Option<Self> {
        if heading > 359 || !distance.is_finite() || distance <= 0.0 {
            return None;
        }
        Some(Self { heading, distance })
    }

    #[inline]
    pub fn heading(&self) -> u16 {
        self.heading
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Displacement in the plane: y points north, x points east.
    ///
    /// The compass bearing maps to `(90 − heading) mod 360` degrees measured
    /// counterclockwise from east.
    pub fn to_vector(&self) -> Vec2 {
        let math_deg = (90 - i32::from(self.heading)).rem_euclid(360);
        let rad = f64::from(math_deg) * PI / 180.0;
        Vec2::new(self.distance * rad.cos(), self.distance * rad.sin())
    }
}

/// Split text on whitespace and validate it as a measurement list.
pub fn parse_traverse(text: &str) -> Result<Vec<HeadingDistance>, ValidationError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    measurements_from_tokens(&tokens)
}

/// Validate alternating heading/distance tokens.
pub fn measurements_from_tokens<S: AsRef<str>>(
    tokens: &[S],
) -> Result<Vec<HeadingDistance>, ValidationError> {
    check_counts(tokens.len())?;
    tokens
        .chunks_exact(2)
        .enumerate()
        .map(|(k, pair)| {
            let (h, d) = (pair[0].as_ref(), pair[1].as_ref());
            validate_pair(k + 1, h.trim().parse::<f64>().ok(), h, d.trim().parse::<f64>().ok(), d)
        })
        .collect()
}

/// Validate alternating heading/distance values.
pub fn measurements_from_values(values: &[f64]) -> Result<Vec<HeadingDistance>, ValidationError> {
    check_counts(values.len())?;
    values
        .chunks_exact(2)
        .enumerate()
        .map(|(k, pair)| {
            let (h, d) = (pair[0], pair[1]);
            validate_pair(k + 1, Some(h), &h.to_string(), Some(d), &d.to_string())
        })
        .collect()
}

fn check_counts(tokens: usize) -> Result<(), ValidationError> {
    if tokens % 2 == 1 {
        return Err(ValidationError::MissingDistance { tokens });
    }
    if tokens / 2 < MIN_BEARINGS {
        return Err(ValidationError::TooFewBearings { found: tokens / 2 });
    }
    Ok(())
}

fn validate_pair(
    index: usize,
    heading: Option<f64>,
    heading_token: &str,
    distance: Option<f64>,
    distance_token: &str,
) -> Result<HeadingDistance, ValidationError> {
    let heading = heading
        .filter(|h| h.fract() == 0.0 && (0.0..=359.0).contains(h))
        .ok_or_else(|| ValidationError::InvalidHeading {
            index,
            token: heading_token.to_string(),
        })?;
    let distance = distance
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| ValidationError::InvalidDistance {
            index,
            token: distance_token.to_string(),
        })?;
    // Range checked above, the cast is exact.
    Ok(HeadingDistance {
        heading: heading as u16,
        distance,
    })
}
