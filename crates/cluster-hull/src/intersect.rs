//! Segment intersection predicate used to keep the hull simple.
//!
//! Pure function, no tolerances beyond the sign of the orientation cross
//! product. Collinear triples count as counterclockwise, which makes fully
//! collinear overlaps report no crossing; the refiner relies on exactly this
//! behavior when it inserts points lying on an existing edge.

use nalgebra::Vector2;

/// Is `c` counterclockwise of (or collinear with) `a → b`?
#[inline]
fn ccw(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> bool {
    (c.y - a.y) * (b.x - a.x) - (b.y - a.y) * (c.x - a.x) >= 0.0
}

/// Do segments `a0–a1` and `b0–b1` intersect?
///
/// Proper crossings and most endpoint touches report `true`; segments that
/// are entirely collinear report `false` even when they overlap.
#[inline]
pub fn segments_intersect(
    a0: Vector2<f64>,
    a1: Vector2<f64>,
    b0: Vector2<f64>,
    b1: Vector2<f64>,
) -> bool {
    ccw(a0, b0, b1) != ccw(a1, b0, b1) && ccw(a0, a1, b0) != ccw(a0, a1, b1)
}
