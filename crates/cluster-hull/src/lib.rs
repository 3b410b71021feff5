//! Concave boundary polygons for clustered 2-D point sets.
//!
//! Purpose
//! - Draw a tight enclosing outline around a cluster of already-projected
//!   planar points (e.g. map markers grouped into one cluster). The caller
//!   hands over a finite point set and a concavity parameter; the crate
//!   returns an ordered polygon boundary. No geography, projections, or UI.
//!
//! Pipeline
//! - `preprocess`: sort, deduplicate, measure the occupied extent.
//! - `convex`: monotone-chain convex hull, returned as a closed ring.
//! - `grid`: bucketed spatial index over interior points for range queries.
//! - `intersect`: segment intersection predicate keeping the hull simple.
//! - `concave`: iterative edge refinement with tunable concavity.
//!
//! Conventions
//! - Every non-degenerate result is a closed ring (first point repeated at
//!   the end). Degenerate inputs (fewer than four distinct points) are
//!   returned unchanged.
//! - Point equality is exact floating-point equality on both coordinates;
//!   dedup, hull membership, and grid removal all rely on it.

pub mod concave;
pub mod convex;
pub mod grid;
pub mod intersect;
pub mod preprocess;
pub mod rand;
mod types;

pub use concave::{concave_hull, concave_hull_with};
pub use types::{Bbox, HullError, RefineCfg, DEFAULT_CONCAVITY};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Point type used throughout.
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::concave::{concave_hull, concave_hull_with};
    pub use crate::rand::{scatter_clusters, scatter_points, ReplayToken, ScatterCfg};
    pub use crate::types::{Bbox, HullError, RefineCfg, DEFAULT_CONCAVITY};
    pub use nalgebra::Vector2 as Vec2;
}
