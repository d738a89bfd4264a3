// src/physics/electrostatics/sphere.rs

use crate::math::error::{FieldError, FieldResult};
use crate::math::grid::SampleGrid;
use crate::math::scalar_field::FieldSamples;
use crate::math::utils::constants::PI;
use bevy::math::DVec2;

/// Permittivity of free space in C²/(N·m²).
pub const VACUUM_PERMITTIVITY: f64 = 8.85e-12;
/// Volume charge density in C/m³ (1 µC/m³).
pub const DEFAULT_CHARGE_DENSITY: f64 = 1e-6;
/// Radius of the reference sphere in meters (5 cm).
pub const DEFAULT_RADIUS: f64 = 0.05;

/// Coulomb constant `1 / (4π ε₀)`.
#[inline]
pub fn coulomb_constant(epsilon_0: f64) -> f64 {
    1.0 / (4.0 * PI * epsilon_0)
}

/// Total charge of a sphere of radius `radius` filled with density `sigma`.
#[inline]
pub fn charge_from_density(radius: f64, sigma: f64) -> f64 {
    sigma * (4.0 / 3.0) * PI * radius.powi(3)
}

/// Uniformly charged solid sphere centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargedSphere {
    /// Radius in meters.
    pub radius: f64,
    /// Total charge in coulombs.
    pub charge: f64,
}

impl ChargedSphere {
    pub fn new(radius: f64, charge: f64) -> FieldResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FieldError::InvalidRadius { radius });
        }
        Ok(Self { radius, charge })
    }

    /// Sphere whose charge follows from a fixed volume density.
    pub fn from_density(radius: f64, sigma: f64) -> FieldResult<Self> {
        Self::new(radius, charge_from_density(radius, sigma))
    }

    /// Field magnitude at distance `r` from the center.
    ///
    /// Inside the sphere the field grows linearly, outside it falls off with the
    /// inverse square. Both branches meet at `r = radius`.
    pub fn field_at_radius(&self, r: f64, epsilon_0: f64) -> f64 {
        let k = coulomb_constant(epsilon_0);
        let inside = k * self.charge * r / self.radius.powi(3);
        let outside = k * self.charge / (r * r);
        if r < self.radius { inside } else { outside }
    }

    /// Field magnitude at a point of the cross-section plane.
    pub fn field_at(&self, point: DVec2, epsilon_0: f64) -> f64 {
        self.field_at_radius(point.length(), epsilon_0)
    }

    /// Field on the surface, the largest value anywhere.
    pub fn surface_field(&self, epsilon_0: f64) -> f64 {
        coulomb_constant(epsilon_0) * self.charge / (self.radius * self.radius)
    }
}

/// Evaluates the field over every node of `grid` in one pass.
pub fn evaluate_on_grid(grid: &SampleGrid, sphere: &ChargedSphere, epsilon_0: f64) -> FieldSamples {
    let data = grid
        .points()
        .map(|p| sphere.field_at(p, epsilon_0))
        .collect();
    FieldSamples::from_grid(grid, data)
}
