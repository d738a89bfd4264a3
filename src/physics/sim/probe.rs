use crate::math::utils::format::{fixed, scientific};
use crate::physics::electrostatics::ChargedSphere;
use bevy::math::DVec2;
use bevy::prelude::*;

/// User-placed point at which the field is read out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbePoint {
    pub position: DVec2,
}

impl ProbePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
        }
    }

    /// Moves the probe to `click` when it lies strictly inside the circular
    /// domain bound, otherwise keeps it where it is.
    pub fn relocated(self, click: DVec2, radius_bound: f64) -> Self {
        if click.is_finite() && click.length() < radius_bound {
            Self { position: click }
        } else {
            self
        }
    }
}

/// Field value at the probe for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    pub frame: u32,
    pub position: DVec2,
    /// Field magnitude in N/C
    pub field: f64,
    pub inside_sphere: bool,
}

impl ProbeReading {
    pub fn measure(sphere: &ChargedSphere, probe: ProbePoint, epsilon_0: f64, frame: u32) -> Self {
        Self {
            frame,
            position: probe.position,
            field: sphere.field_at(probe.position, epsilon_0),
            inside_sphere: probe.position.length() < sphere.radius,
        }
    }

    /// Annotation text, e.g. `E @ (0.02, 0.02) = 1.07e+03 N/C`.
    pub fn label(&self) -> String {
        format!(
            "E @ ({}, {}) = {} N/C",
            fixed(self.position.x, 2),
            fixed(self.position.y, 2),
            scientific(self.field, 2)
        )
    }
}

/// Latest probe reading, refreshed on every frame tick and every accepted click.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ProbeReadout(pub ProbeReading);
