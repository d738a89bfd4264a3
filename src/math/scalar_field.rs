// src/math/scalar_field.rs

use crate::math::grid::SampleGrid;
use bevy::math::DVec2;

/// Two-dimensional scalar field sampled on a lattice.
/// Lets algorithms such as marching squares run on any sampled field.
pub trait ScalarField2D {
    /// Number of nodes along x.
    fn width(&self) -> usize;

    /// Number of nodes along y.
    fn height(&self) -> usize;

    /// Value at node `(x_idx, y_idx)`, or `0.0` outside the lattice.
    fn get_value(&self, x_idx: usize, y_idx: usize) -> f64;

    /// World position of node `(x_idx, y_idx)`.
    fn node_to_world(&self, x_idx: usize, y_idx: usize) -> DVec2;
}

/// Field magnitudes evaluated on a [`SampleGrid`], row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSamples {
    data: Vec<f64>,
    width: usize,
    height: usize,
    origin: DVec2,
    spacing: f64,
    min: f64,
    max: f64,
}

impl FieldSamples {
    /// Wraps values laid out like `grid.points()`.
    pub fn from_grid(grid: &SampleGrid, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), grid.len());
        let (min, max) = data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let (min, max) = if min > max { (0.0, 0.0) } else { (min, max) };
        Self {
            data,
            width: grid.width(),
            height: grid.height(),
            origin: DVec2::splat(-grid.half_width()),
            spacing: grid.spacing(),
            min,
            max,
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.idx(x, y).and_then(|i| self.data.get(i).copied())
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl ScalarField2D for FieldSamples {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_value(&self, x_idx: usize, y_idx: usize) -> f64 {
        self.get(x_idx, y_idx).unwrap_or(0.0)
    }

    fn node_to_world(&self, x_idx: usize, y_idx: usize) -> DVec2 {
        self.origin + DVec2::new(x_idx as f64, y_idx as f64) * self.spacing
    }
}
