//! Random closed traverses (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic sampler of simple, star-shaped traverses for property tests
//!   and benches. Draws are indexable through a `(seed, index)` token.
//!
//! Model
//! - `n` equally spaced angles on [0, 2π) with bounded angular and radial
//!   jitter give a star-shaped ring around the origin.
//! - Each ring edge becomes one measurement; headings are rounded to whole
//!   degrees, so the traverse misses closure by a small amount and the builder's
//!   closure adjustment has real work to do.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::measure::HeadingDistance;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    /// Clamped to [0, 0.9].
    pub radial_jitter: f64,
    pub base_radius: f64,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(8),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 100.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a counterclockwise star-shaped traverse of `n ≥ 3` measurements.
pub fn draw_traverse_radial(cfg: RadialCfg, tok: ReplayToken) -> Vec<HeadingDistance> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-6);
    let delta = std::f64::consts::TAU / (n as f64);
    let ring: Vec<Vector2<f64>> = (0..n)
        .map(|k| {
            let th = (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    (0..n)
        .filter_map(|k| {
            let e = ring[(k + 1) % n] - ring[k];
            HeadingDistance::new(bearing_of(e), e.norm())
        })
        .collect()
}

/// Compass bearing of a displacement, rounded to whole degrees.
fn bearing_of(e: Vector2<f64>) -> u16 {
    let math_deg = e.y.atan2(e.x).to_degrees();
    ((90.0 - math_deg).round() as i32).rem_euclid(360) as u16
}
