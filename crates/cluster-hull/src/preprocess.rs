//! Input preprocessing: sort, deduplicate, measure the occupied extent.

use nalgebra::Vector2;

/// Width/height of the axis-aligned box occupied by a point set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// Preprocessing outcome.
#[derive(Clone, Debug)]
pub enum Prepared {
    /// Fewer than four distinct points survive deduplication: a point,
    /// segment, or triangle set. No refinement is meaningful; the pipeline
    /// returns the caller's input unchanged.
    Degenerate,
    /// Sorted by (x, then y) with exact duplicates dropped.
    Ready {
        points: Vec<Vector2<f64>>,
        extent: Extent,
    },
}

/// Sort by (x ascending, then y ascending), drop exact consecutive
/// duplicates, and measure the occupied extent.
pub fn prepare(raw: &[Vector2<f64>]) -> Prepared {
    let mut points = raw.to_vec();
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
    points.dedup_by(|a, b| a.x == b.x && a.y == b.y);
    if points.len() < 4 {
        return Prepared::Degenerate;
    }
    let extent = occupied_extent(&points);
    Prepared::Ready { points, extent }
}

/// Extent of the axis-aligned box covering `points` (must be non-empty).
pub fn occupied_extent(points: &[Vector2<f64>]) -> Extent {
    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Extent {
        width: max.x - min.x,
        height: max.y - min.y,
    }
}
