//! Convex hull via Andrew's monotone chain.
//!
//! Operates on the preprocessed (sorted, deduplicated) point sequence and
//! returns a closed CCW ring. Collinear triples pop (`cross <= 0`), so
//! strictly collinear interior points never become hull vertices.

use nalgebra::Vector2;

/// Cross product `ab × ac`; positive when `c` lies left of `a → b`.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// One tangent chain: scan `points`, popping while the last three turn
/// non-left.
fn chain(points: impl Iterator<Item = Vector2<f64>>) -> Vec<Vector2<f64>> {
    let mut out: Vec<Vector2<f64>> = Vec::new();
    for p in points {
        while out.len() >= 2 && cross(out[out.len() - 2], out[out.len() - 1], p) <= 0.0 {
            out.pop();
        }
        out.push(p);
    }
    out
}

/// Convex hull of a sorted, deduplicated point set, as a closed ring
/// (the first vertex is repeated at the end).
pub fn convex_hull(sorted: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut hull = chain(sorted.iter().copied());
    hull.pop(); // last point starts the upper chain
    let mut upper = chain(sorted.iter().rev().copied());
    upper.pop(); // last point is the first of the lower chain
    hull.extend(upper);
    if let Some(&first) = hull.first() {
        hull.push(first);
    }
    hull
}
