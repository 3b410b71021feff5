//! Shared types: search boxes, refinement configuration, error taxonomy.

use nalgebra::Vector2;
use thiserror::Error;

/// Default concavity, in the same linear units as the input points.
/// Larger values produce coarser (more convex-like) hulls.
pub const DEFAULT_CONCAVITY: f64 = 20.0;

/// Axis-aligned bounding box used for neighborhood searches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Bbox {
    /// Tight box around a single edge.
    #[inline]
    pub fn of_edge(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Refinement policy knobs.
///
/// Invariants:
/// - `max_search_area_fraction > 0` (checked by the entry points).
/// - `max_concave_angle_cos` is a cosine threshold a candidate must exceed
///   at both edge endpoints before it may be inserted.
#[derive(Clone, Copy, Debug)]
pub struct RefineCfg {
    /// Minimum cosine of ∠(A→B, A→M) and ∠(B→A, B→M) for a candidate `M`
    /// on edge `A–B`.
    pub max_concave_angle_cos: f64,
    /// Per-axis cap on the search box, as a fraction of the occupied extent.
    pub max_search_area_fraction: f64,
}

impl Default for RefineCfg {
    fn default() -> Self {
        Self {
            // cos(90°): reject insertions that would fold the edge back at a
            // right angle or sharper.
            max_concave_angle_cos: 0.0,
            max_search_area_fraction: 0.6,
        }
    }
}

/// Precondition violations, reported before any computation begins.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HullError {
    #[error("concavity must be strictly positive, got {0}")]
    NonPositiveConcavity(f64),
    #[error("grid cell size must be strictly positive, got {0}")]
    NonPositiveCellSize(f64),
    #[error("max_search_area_fraction must be strictly positive, got {0}")]
    NonPositiveSearchFraction(f64),
}
