// src/math/grid.rs

use crate::math::error::{FieldError, FieldResult};
use bevy::math::DVec2;

/// Evenly spaced values over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Square sampling lattice centered at the origin.
///
/// Samples are stored row-major: row 0 lies at `y = -half_width`, column 0 at
/// `x = -half_width`. The lattice never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    half_width: f64,
}

impl SampleGrid {
    pub fn square(half_width: f64, resolution: usize) -> FieldResult<Self> {
        if !(half_width.is_finite() && half_width > 0.0) {
            return Err(FieldError::InvalidGrid {
                message: format!("half width must be positive, got {half_width}"),
            });
        }
        if resolution < 2 {
            return Err(FieldError::InvalidGrid {
                message: format!("need at least 2 samples per axis, got {resolution}"),
            });
        }
        let axis = linspace(-half_width, half_width, resolution);
        Ok(Self {
            xs: axis.clone(),
            ys: axis,
            half_width,
        })
    }

    pub fn width(&self) -> usize {
        self.xs.len()
    }

    pub fn height(&self) -> usize {
        self.ys.len()
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn spacing(&self) -> f64 {
        2.0 * self.half_width / (self.width() - 1) as f64
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Coordinate of the lattice node `(ix, iy)`.
    pub fn point(&self, ix: usize, iy: usize) -> Option<DVec2> {
        Some(DVec2::new(*self.xs.get(ix)?, *self.ys.get(iy)?))
    }

    /// All lattice nodes in row-major order (the flattened meshgrid).
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.ys
            .iter()
            .flat_map(move |&y| self.xs.iter().map(move |&x| DVec2::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(-0.1, 0.1, 200);
        assert_eq!(values.len(), 200);
        assert_eq!(values[0], -0.1);
        assert_eq!(values[199], 0.1);
        assert_relative_eq!(values[1] - values[0], 0.2 / 199.0, epsilon = 1e-15);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
    }

    #[test]
    fn test_square_grid_dimensions() {
        let grid = SampleGrid::square(0.1, 200).unwrap();
        assert_eq!(grid.width(), 200);
        assert_eq!(grid.height(), 200);
        assert_eq!(grid.len(), 40_000);
        assert_relative_eq!(grid.spacing(), 0.2 / 199.0, epsilon = 1e-15);
    }

    #[test]
    fn test_points_row_major() {
        let grid = SampleGrid::square(1.0, 3).unwrap();
        let points: Vec<DVec2> = grid.points().collect();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], DVec2::new(-1.0, -1.0));
        assert_eq!(points[1], DVec2::new(0.0, -1.0));
        assert_eq!(points[3], DVec2::new(-1.0, 0.0));
        assert_eq!(points[8], DVec2::new(1.0, 1.0));
        assert_eq!(grid.point(2, 0), Some(DVec2::new(1.0, -1.0)));
        assert_eq!(grid.point(3, 0), None);
    }

    #[test]
    fn test_invalid_grids_rejected() {
        assert!(matches!(
            SampleGrid::square(0.1, 1),
            Err(FieldError::InvalidGrid { .. })
        ));
        assert!(matches!(
            SampleGrid::square(0.0, 10),
            Err(FieldError::InvalidGrid { .. })
        ));
        assert!(matches!(
            SampleGrid::square(f64::NAN, 10),
            Err(FieldError::InvalidGrid { .. })
        ));
    }
}
