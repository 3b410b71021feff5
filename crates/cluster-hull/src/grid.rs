//! Bucketed spatial index over interior points.
//!
//! Cells are `cell_size`-sized squares addressed by
//! `(floor(x / cell_size), floor(y / cell_size))`. The grid exclusively
//! owns the remaining candidate points for one refinement run: every point
//! sits in exactly one bucket and is removed once consumed into the hull.

use std::collections::HashMap;

use nalgebra::Vector2;

use crate::types::{Bbox, HullError};

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: HashMap<(i64, i64), Vec<Vector2<f64>>>,
    cell_size: f64,
}

impl Grid {
    /// Bucket `points` into `cell_size`-sized cells.
    ///
    /// `cell_size` must be strictly positive and finite; anything else is a
    /// configuration error, not a silently-empty grid.
    pub fn new(points: &[Vector2<f64>], cell_size: f64) -> Result<Self, HullError> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(HullError::NonPositiveCellSize(cell_size));
        }
        let mut cells: HashMap<(i64, i64), Vec<Vector2<f64>>> = HashMap::new();
        for &p in points {
            cells.entry(cell_of(p, cell_size)).or_default().push(p);
        }
        Ok(Self { cells, cell_size })
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// All points whose cell falls inside the cell rectangle spanned by the
    /// bbox corners, inclusive on both ends.
    ///
    /// Iteration order is deterministic: x-major, then y, then bucket
    /// insertion order. Candidate selection relies on this for reproducible
    /// tie-breaks.
    pub fn range_points(&self, bbox: &Bbox) -> Vec<Vector2<f64>> {
        let (x0, y0) = cell_of(bbox.min, self.cell_size);
        let (x1, y1) = cell_of(bbox.max, self.cell_size);
        let mut out = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                if let Some(bucket) = self.cells.get(&(x, y)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out
    }

    /// Remove one occurrence of an exactly-equal point.
    ///
    /// Removing a point that is not present is a logic error in the caller:
    /// the refiner only removes points it just drew from a range query.
    pub fn remove_point(&mut self, p: Vector2<f64>) {
        let key = cell_of(p, self.cell_size);
        let mut removed = false;
        if let Some(bucket) = self.cells.get_mut(&key) {
            if let Some(i) = bucket.iter().position(|q| q.x == p.x && q.y == p.y) {
                bucket.remove(i);
                removed = true;
            }
        }
        debug_assert!(removed, "remove_point: ({}, {}) not present in grid", p.x, p.y);
    }

    /// Grow `bbox` symmetrically by `scale * cell_size` on each side.
    pub fn extend_bbox(&self, bbox: &Bbox, scale: u32) -> Bbox {
        let d = f64::from(scale) * self.cell_size;
        Bbox {
            min: Vector2::new(bbox.min.x - d, bbox.min.y - d),
            max: Vector2::new(bbox.max.x + d, bbox.max.y + d),
        }
    }
}

#[inline]
fn cell_of(p: Vector2<f64>, cell_size: f64) -> (i64, i64) {
    ((p.x / cell_size).floor() as i64, (p.y / cell_size).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(x, y)
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let pts = [v(0.0, 0.0)];
        assert_eq!(
            Grid::new(&pts, 0.0),
            Err(HullError::NonPositiveCellSize(0.0))
        );
        assert_eq!(
            Grid::new(&pts, -2.0),
            Err(HullError::NonPositiveCellSize(-2.0))
        );
        assert!(Grid::new(&pts, f64::NAN).is_err());
    }

    #[test]
    fn range_query_is_inclusive_on_both_ends() {
        let pts = [v(0.5, 0.5), v(1.5, 0.5), v(2.5, 2.5), v(-0.5, -0.5)];
        let grid = Grid::new(&pts, 1.0).unwrap();
        // Cells (0,0)..=(1,0): the first two points.
        let got = grid.range_points(&Bbox {
            min: v(0.0, 0.0),
            max: v(1.9, 0.9),
        });
        assert_eq!(got, vec![v(0.5, 0.5), v(1.5, 0.5)]);
        // The corner cells themselves count.
        let all = grid.range_points(&Bbox {
            min: v(-0.5, -0.5),
            max: v(2.5, 2.5),
        });
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn negative_coordinates_floor_into_negative_cells() {
        let pts = [v(-0.5, -0.5)];
        let grid = Grid::new(&pts, 1.0).unwrap();
        // A box covering only cell (0, 0) must not see the point at (-1, -1).
        let none = grid.range_points(&Bbox {
            min: v(0.1, 0.1),
            max: v(0.9, 0.9),
        });
        assert!(none.is_empty());
        let hit = grid.range_points(&Bbox {
            min: v(-1.0, -1.0),
            max: v(-0.1, -0.1),
        });
        assert_eq!(hit, vec![v(-0.5, -0.5)]);
    }

    #[test]
    fn remove_point_removes_a_single_occurrence() {
        let pts = [v(0.5, 0.5), v(0.5, 0.5), v(0.6, 0.6)];
        let mut grid = Grid::new(&pts, 1.0).unwrap();
        grid.remove_point(v(0.5, 0.5));
        let left = grid.range_points(&Bbox {
            min: v(0.0, 0.0),
            max: v(0.9, 0.9),
        });
        assert_eq!(left, vec![v(0.5, 0.5), v(0.6, 0.6)]);
    }

    #[test]
    #[should_panic(expected = "not present in grid")]
    fn removing_an_absent_point_is_a_logic_error() {
        let mut grid = Grid::new(&[v(0.5, 0.5)], 1.0).unwrap();
        grid.remove_point(v(9.0, 9.0));
    }

    #[test]
    fn extend_bbox_grows_by_scale_times_cell_size() {
        let grid = Grid::new(&[v(0.0, 0.0)], 2.0).unwrap();
        let bbox = Bbox {
            min: v(1.0, 1.0),
            max: v(3.0, 2.0),
        };
        let same = grid.extend_bbox(&bbox, 0);
        assert_eq!(same, bbox);
        let grown = grid.extend_bbox(&bbox, 3);
        assert_eq!(grown.min, v(-5.0, -5.0));
        assert_eq!(grown.max, v(9.0, 8.0));
    }
}
