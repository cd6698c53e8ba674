//! Fixed numeric defaults (internal).
//!
//! Policy
//! - Defaults live here as constants; the public `Cfg` structs copy them in
//!   their `Default` impls so callers can override per run.

/// Default relative error bound for `EstimateCfg::default()`.
pub(crate) const DEFAULT_MAX_REL_ERROR: f64 = 0.1;
/// Exclusive upper limit for the relative error bound.
pub(crate) const MAX_REL_ERROR_LIMIT: f64 = 0.5;
/// Quadrant depth beyond which an intersecting box is no longer split.
/// Seed quadrants have depth 1; f64 midpoints stay distinct well past 40.
pub(crate) const DEFAULT_MAX_DEPTH: u32 = 40;
/// Upper bound on classified boxes per estimation.
pub(crate) const DEFAULT_MAX_CLASSIFICATIONS: usize = 1 << 22;
/// Bounds with `min(w, h) <= MIN_ASPECT * max(w, h)` count as flat.
pub(crate) const MIN_ASPECT: f64 = 1e-12;
/// Relative sine below which a polygon vertex counts as lying on the parity ray.
pub(crate) const RAY_COLLINEAR_EPS: f64 = 1e-9;
/// Parity ray endpoints tried before accepting a grazing ray.
pub(crate) const RAY_ATTEMPTS: usize = 8;
/// Divisor for the vertical step between successive ray endpoints. Not a
/// simple fraction, so candidates avoid lattice-aligned vertices.
pub(crate) const RAY_STEP_DIVISOR: f64 = 7.318_281_828;
