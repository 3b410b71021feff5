//! Concave refinement: walk hull edges, pull nearby interior points into
//! edges that are too long, repeat until a fixed point is reached.
//!
//! The refiner starts from the closed convex ring. Each scanning pass
//! examines every edge in order; an edge longer than the concavity budget
//! searches a growing neighborhood for an insertable midpoint. A pass with
//! no insertion terminates refinement. Termination is guaranteed: every
//! pass either consumes at least one grid point (a finite pool) or halts.
//!
//! The whole run owns its working state exclusively (hull ring, grid, skip
//! set); concurrent invocations for different clusters need no
//! synchronization.

use std::collections::HashSet;

use nalgebra::Vector2;
use tracing::{debug, trace};

use crate::convex::convex_hull;
use crate::grid::Grid;
use crate::intersect::segments_intersect;
use crate::preprocess::{prepare, Prepared};
use crate::types::{Bbox, HullError, RefineCfg};

/// Structural identity of a directed hull edge, keyed by the bit patterns
/// of its endpoint coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct EdgeKey([u64; 4]);

impl EdgeKey {
    #[inline]
    fn new(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self([a.x.to_bits(), a.y.to_bits(), b.x.to_bits(), b.y.to_bits()])
    }
}

#[inline]
fn sq_length(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let d = b - a;
    d.x * d.x + d.y * d.y
}

/// Cosine of the angle at `o` between `o → a` and `o → b`.
#[inline]
fn cos_at(o: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let oa = a - o;
    let ob = b - o;
    oa.dot(&ob) / (sq_length(o, a) * sq_length(o, b)).sqrt()
}

/// Compute the concave hull of `points` with the default refinement policy
/// ([`RefineCfg::default`]).
///
/// Returns a closed ring (first point repeated at the end) for any
/// non-degenerate input. Degenerate inputs — fewer than four distinct
/// points — are returned unchanged. `concavity` is the maximum edge length
/// (in point units) tolerated before refinement is attempted on an edge;
/// see [`crate::DEFAULT_CONCAVITY`].
pub fn concave_hull(
    points: &[Vector2<f64>],
    concavity: f64,
) -> Result<Vec<Vector2<f64>>, HullError> {
    concave_hull_with(points, concavity, &RefineCfg::default())
}

/// Same as [`concave_hull`], with explicit policy knobs.
pub fn concave_hull_with(
    points: &[Vector2<f64>],
    concavity: f64,
    cfg: &RefineCfg,
) -> Result<Vec<Vector2<f64>>, HullError> {
    if !(concavity > 0.0) || !concavity.is_finite() {
        return Err(HullError::NonPositiveConcavity(concavity));
    }
    if !(cfg.max_search_area_fraction > 0.0) || !cfg.max_search_area_fraction.is_finite() {
        return Err(HullError::NonPositiveSearchFraction(cfg.max_search_area_fraction));
    }

    let (sorted, extent) = match prepare(points) {
        Prepared::Degenerate => return Ok(points.to_vec()),
        Prepared::Ready { points, extent } => (points, extent),
    };

    let hull = convex_hull(&sorted);
    // Interior = not exactly equal (both coordinates) to any hull vertex.
    let interior: Vec<Vector2<f64>> = sorted
        .iter()
        .copied()
        .filter(|p| !hull.iter().any(|h| h.x == p.x && h.y == p.y))
        .collect();

    // Collinear sets occupy zero area; the closed convex ring is already
    // the tightest simple boundary, and a grid cell size cannot be derived.
    let area = extent.width * extent.height;
    if interior.is_empty() || !(area > 0.0) {
        return Ok(hull);
    }

    let cell_size = (area / sorted.len() as f64).ceil();
    debug!(
        n = sorted.len(),
        interior = interior.len(),
        concavity,
        cell_size,
        "refining convex hull"
    );

    let refiner = Refiner {
        hull,
        grid: Grid::new(&interior, cell_size)?,
        skip: HashSet::new(),
        max_sq_edge_len: concavity * concavity,
        max_search_w: extent.width * cfg.max_search_area_fraction,
        max_search_h: extent.height * cfg.max_search_area_fraction,
        max_angle_cos: cfg.max_concave_angle_cos,
    };
    Ok(refiner.run())
}

/// One refinement run over a closed convex ring. Owns the hull under
/// construction, the grid of remaining candidates, and the skip set of
/// exhausted edges.
struct Refiner {
    hull: Vec<Vector2<f64>>,
    grid: Grid,
    skip: HashSet<EdgeKey>,
    max_sq_edge_len: f64,
    max_search_w: f64,
    max_search_h: f64,
    max_angle_cos: f64,
}

impl Refiner {
    fn run(mut self) -> Vec<Vector2<f64>> {
        let mut pass = 0u32;
        loop {
            let inserted = self.scan();
            trace!(pass, inserted, hull_len = self.hull.len(), "refinement pass");
            if inserted == 0 {
                break;
            }
            pass += 1;
        }
        self.hull
    }

    /// One scan over the current edges; returns the number of insertions.
    /// The ring grows while scanning, so the bound is re-evaluated each
    /// iteration and a freshly inserted midpoint's trailing half-edge is
    /// examined within the same pass.
    fn scan(&mut self) -> usize {
        let mut inserted = 0usize;
        let mut i = 0usize;
        while i + 1 < self.hull.len() {
            let a = self.hull[i];
            let b = self.hull[i + 1];
            let key = EdgeKey::new(a, b);
            if sq_length(a, b) < self.max_sq_edge_len || self.skip.contains(&key) {
                i += 1;
                continue;
            }
            let (mid, exhausted) = self.search_midpoint(a, b);
            if exhausted {
                // The neighborhood is fully searched; never reconsider this
                // edge in later passes.
                self.skip.insert(key);
            }
            if let Some(m) = mid {
                self.hull.insert(i + 1, m);
                self.grid.remove_point(m);
                inserted += 1;
            }
            i += 1;
        }
        inserted
    }

    /// Grow the search box around `a–b` in discrete steps until a candidate
    /// appears or both box extents reach the permitted maximum. Returns the
    /// candidate (if any) and whether the box reached the cap.
    fn search_midpoint(&self, a: Vector2<f64>, b: Vector2<f64>) -> (Option<Vector2<f64>>, bool) {
        let mut bbox = Bbox::of_edge(a, b);
        let mut scale = 0u32;
        loop {
            bbox = self.grid.extend_bbox(&bbox, scale);
            scale += 1;
            let at_cap = bbox.width() >= self.max_search_w && bbox.height() >= self.max_search_h;
            let candidates = self.grid.range_points(&bbox);
            if let Some(m) = self.pick_midpoint(a, b, &candidates) {
                return (Some(m), at_cap);
            }
            if at_cap {
                return (None, true);
            }
        }
    }

    /// Greedy candidate selection: a candidate must beat the angle gate at
    /// both endpoints, strictly improve both incumbent cosines, and keep the
    /// hull simple when connected to `a` and `b`.
    fn pick_midpoint(
        &self,
        a: Vector2<f64>,
        b: Vector2<f64>,
        candidates: &[Vector2<f64>],
    ) -> Option<Vector2<f64>> {
        let mut best: Option<Vector2<f64>> = None;
        let mut best_cos_a = self.max_angle_cos;
        let mut best_cos_b = self.max_angle_cos;
        for &p in candidates {
            let ca = cos_at(a, b, p);
            let cb = cos_at(b, a, p);
            if ca > best_cos_a
                && cb > best_cos_b
                && !self.crosses_hull(a, p)
                && !self.crosses_hull(b, p)
            {
                best_cos_a = ca;
                best_cos_b = cb;
                best = Some(p);
            }
        }
        best
    }

    /// Would segment `from–p` cross any current hull edge not incident to
    /// `from`?
    fn crosses_hull(&self, from: Vector2<f64>, p: Vector2<f64>) -> bool {
        for w in self.hull.windows(2) {
            let (e0, e1) = (w[0], w[1]);
            // Edges sharing the segment's hull endpoint cannot properly
            // cross it.
            if from == e0 || from == e1 {
                continue;
            }
            if segments_intersect(from, p, e0, e1) {
                return true;
            }
        }
        false
    }
}
