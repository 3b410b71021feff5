//! Reproducible point-cloud samplers for benches and property tests.
//!
//! A draw is addressed by a replay token `(seed, index)` mixed into a single
//! RNG, so any sample can be regenerated on its own without replaying a
//! sequence of draws.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scatter configuration: `count` points inside a `width × height` box
/// anchored at the origin.
#[derive(Clone, Copy, Debug)]
pub struct ScatterCfg {
    pub count: usize,
    pub width: f64,
    pub height: f64,
}

impl Default for ScatterCfg {
    fn default() -> Self {
        Self {
            count: 100,
            width: 10.0,
            height: 10.0,
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
        // SplitMix64-style mixing, cheap and stable.
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

/// Uniform scatter inside the configured box.
pub fn scatter_points(cfg: ScatterCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    (0..cfg.count)
        .map(|_| {
            Vector2::new(
                rng.gen::<f64>() * cfg.width,
                rng.gen::<f64>() * cfg.height,
            )
        })
        .collect()
}

/// Blobby scatter: `per_cluster` points jittered around each of `centers`,
/// the shape clustered map markers actually take.
pub fn scatter_clusters(
    centers: &[Vector2<f64>],
    per_cluster: usize,
    spread: f64,
    tok: ReplayToken,
) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let mut out = Vec::with_capacity(centers.len() * per_cluster);
    for &c in centers {
        for _ in 0..per_cluster {
            // Sum of two uniforms: cheap bell-shaped jitter in [-spread, spread].
            let jx = (rng.gen::<f64>() + rng.gen::<f64>() - 1.0) * spread;
            let jy = (rng.gen::<f64>() + rng.gen::<f64>() - 1.0) * spread;
            out.push(Vector2::new(c.x + jx, c.y + jy));
        }
    }
    out
}
