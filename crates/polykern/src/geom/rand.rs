//! Seeded random polygons for tests, benches and examples.
//!
//! Model
//! - Start from `n` equally spaced angles on `[0, 2π)`, add bounded
//!   angular and radial jitter. Convex draws pass through a monotone
//!   chain hull; star draws alternate an outer and an inner radius so
//!   every second vertex is reflex.
//! - Determinism uses a replay token `(seed, index)` mixed into a
//!   single RNG, so a failing case can be replayed from its token.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Vec2 = Vector2<f64>;

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertices: usize,
    /// Angular jitter as a fraction of the base spacing `2π/n`.
    /// Clamped to `[0, 0.49]`.
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude): radii are
    /// `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertices: 12,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
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
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    fn rng(self) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ self.index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

fn radial_points(cfg: RadialCfg, rng: &mut StdRng) -> Vec<Vec2> {
    let n = cfg.vertices.max(3);
    let spacing = std::f64::consts::TAU / n as f64;
    let jitter = cfg.angle_jitter_frac.clamp(0.0, 0.49) * spacing;
    let mut pts = Vec::with_capacity(n);
    for k in 0..n {
        let theta = k as f64 * spacing + rng.gen_range(-jitter..=jitter);
        let u: f64 = if cfg.radial_jitter > 0.0 {
            rng.gen_range(-cfg.radial_jitter..=cfg.radial_jitter)
        } else {
            0.0
        };
        let r = cfg.base_radius * (1.0 + u);
        pts.push(Vector2::new(r * theta.cos(), r * theta.sin()));
    }
    pts
}

/// Draw a convex polygon in CCW order (radial sample + hull).
pub fn draw_convex_polygon(cfg: RadialCfg, token: ReplayToken) -> Vec<Vec2> {
    let mut rng = token.rng();
    loop {
        let pts = radial_points(cfg, &mut rng);
        if let Some(hull) = convex_hull(&pts) {
            if hull.len() >= 3 {
                return hull;
            }
        }
    }
}

/// Draw a star polygon in CCW order: `spikes` outer vertices at
/// `outer_radius` interleaved with inner vertices at `inner_radius`.
/// Every inner vertex is reflex when `inner_radius` is small enough.
pub fn draw_star_polygon(
    spikes: usize,
    outer_radius: f64,
    inner_radius: f64,
    token: ReplayToken,
) -> Vec<Vec2> {
    let spikes = spikes.max(3);
    let mut rng = token.rng();
    let phase = rng.gen_range(0.0..std::f64::consts::TAU);
    let step = std::f64::consts::TAU / (2 * spikes) as f64;
    let mut pts = Vec::with_capacity(2 * spikes);
    for k in 0..2 * spikes {
        let theta = phase + k as f64 * step;
        let r = if k % 2 == 0 { outer_radius } else { inner_radius };
        pts.push(Vector2::new(r * theta.cos(), r * theta.sin()));
    }
    pts
}

// Andrew's monotone chain (returns hull in CCW order).
fn convex_hull(points: &[Vec2]) -> Option<Vec<Vec2>> {
    if points.len() < 3 {
        return None;
    }
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| {
        match a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
            o => o,
        }
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return None;
    }
    let cross = |a: Vec2, b: Vec2, c: Vec2| (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    let mut lower: Vec<Vec2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vec2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    Some(hull)
}
