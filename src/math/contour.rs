// src/math/contour.rs

use crate::math::error::{FieldError, FieldResult};

/// Uniform level boundaries for a filled contour plot.
///
/// `count` bands split `[min, max]` evenly; band `i` covers
/// `[boundary(i), boundary(i + 1))`, the top band includes `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLevels {
    min: f64,
    max: f64,
    count: usize,
}

impl ContourLevels {
    pub fn uniform(min: f64, max: f64, count: usize) -> FieldResult<Self> {
        if count == 0 {
            return Err(FieldError::InvalidLevels {
                message: "at least one level is required".to_string(),
            });
        }
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(FieldError::InvalidLevels {
                message: format!("invalid range [{min}, {max}]"),
            });
        }
        Ok(Self { min, max, count })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Value at boundary `i`, for `i` in `0..=count`.
    pub fn boundary(&self, i: usize) -> f64 {
        let t = i.min(self.count) as f64 / self.count as f64;
        self.min + (self.max - self.min) * t
    }

    /// Interior boundaries, where iso-lines separate neighbouring bands.
    pub fn interior_boundaries(&self) -> impl Iterator<Item = f64> + '_ {
        (1..self.count).map(move |i| self.boundary(i))
    }

    /// Band holding `value`; out-of-range values clamp to the outer bands.
    pub fn band_index(&self, value: f64) -> usize {
        let span = self.max - self.min;
        if span <= 0.0 || value.is_nan() {
            return 0;
        }
        let t = (value - self.min) / span;
        let band = (t * self.count as f64).floor();
        if band <= 0.0 {
            0
        } else {
            (band as usize).min(self.count - 1)
        }
    }

    /// Normalised color position of a band's midpoint in `[0, 1]`.
    pub fn band_fraction(&self, band: usize) -> f64 {
        if self.count == 1 {
            return 0.5;
        }
        band.min(self.count - 1) as f64 / (self.count - 1) as f64
    }
}
