use crate::math::error::{FieldError, FieldResult};
use crate::math::grid::SampleGrid;
use crate::physics::electrostatics::{DEFAULT_CHARGE_DENSITY, DEFAULT_RADIUS, VACUUM_PERMITTIVITY};
use crate::visualization::colormap::Colormap;
use bevy::math::DVec2;
use bevy::prelude::*;
use std::time::Duration;

/// What happens once the last frame of a cycle has been shown.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Wrap around to frame 0.
    #[default]
    Loop,
    /// Stop on the last frame.
    Once,
}

#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
pub struct SphereParameters {
    // --- Physik ---
    /// ε₀ in C²/(N·m²)
    pub epsilon_0: f64,
    /// σ in C/m³
    pub charge_density: f64,
    /// Radius at frame 0, in meters
    pub base_radius: f64,
    pub radius_amplitude: f64,
    /// Phase advance per frame, in radians
    pub phase_step: f64,

    // --- Abtastung ---
    pub domain_half_width: f64,
    pub grid_resolution: usize,
    pub contour_levels: usize,

    // --- Wiedergabe ---
    pub frame_count: u32,
    pub frame_interval_ms: u64,
    pub playback_mode: PlaybackMode,
    pub initial_probe: DVec2,
    pub trace_capacity: usize,

    // --- Darstellung ---
    pub colormap: Colormap,
    pub show_iso_lines: bool,
    pub iso_line_count: usize,
}

impl Default for SphereParameters {
    fn default() -> Self {
        Self {
            epsilon_0: VACUUM_PERMITTIVITY,
            charge_density: DEFAULT_CHARGE_DENSITY,
            base_radius: DEFAULT_RADIUS,
            radius_amplitude: 0.02, // R schwankt zwischen 3 und 7 cm
            phase_step: 0.1,

            domain_half_width: 0.1,
            grid_resolution: 200,
            contour_levels: 500, // wirkt fast stufenlos

            frame_count: 100,
            frame_interval_ms: 50,
            playback_mode: PlaybackMode::Loop,
            initial_probe: DVec2::new(0.02, 0.02),
            trace_capacity: 100, // so viele wie Frames pro Durchlauf

            colormap: Colormap::Inferno,
            show_iso_lines: false,
            iso_line_count: 10,
        }
    }
}

impl SphereParameters {
    /// Fixed sphere for the single-shot map: no oscillation, 50 levels.
    pub fn static_map() -> Self {
        Self {
            radius_amplitude: 0.0,
            contour_levels: 50,
            ..Self::default()
        }
    }

    /// Sphere radius shown at `frame`.
    pub fn radius_at_frame(&self, frame: u32) -> f64 {
        self.base_radius + self.radius_amplitude * (self.phase_step * frame as f64).sin()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn sample_grid(&self) -> FieldResult<SampleGrid> {
        SampleGrid::square(self.domain_half_width, self.grid_resolution)
    }

    /// Rejects settings under which a frame could not be built.
    pub fn validate(&self) -> FieldResult<()> {
        let invalid = |message: String| -> FieldResult<()> {
            Err(FieldError::InvalidParameters { message })
        };

        if !(self.epsilon_0.is_finite() && self.epsilon_0 > 0.0) {
            return invalid(format!("epsilon_0 must be positive, got {}", self.epsilon_0));
        }
        if !self.charge_density.is_finite() {
            return invalid(format!("charge density must be finite, got {}", self.charge_density));
        }
        let smallest_radius = self.base_radius - self.radius_amplitude.abs();
        if !(smallest_radius.is_finite() && smallest_radius > 0.0) {
            return invalid(format!(
                "radius must stay positive, base {} with amplitude {}",
                self.base_radius, self.radius_amplitude
            ));
        }
        if !(self.domain_half_width.is_finite() && self.domain_half_width > 0.0) {
            return invalid(format!(
                "domain half width must be positive, got {}",
                self.domain_half_width
            ));
        }
        if self.grid_resolution < 2 {
            return invalid(format!("grid resolution too small: {}", self.grid_resolution));
        }
        if self.contour_levels == 0 {
            return invalid("contour levels must be at least 1".to_string());
        }
        if self.frame_count == 0 || self.frame_interval_ms == 0 {
            return invalid(format!(
                "need a positive frame count and interval, got {} frames every {} ms",
                self.frame_count, self.frame_interval_ms
            ));
        }
        if self.initial_probe.length() >= self.domain_half_width {
            return invalid(format!(
                "initial probe {:?} lies outside the domain",
                self.initial_probe
            ));
        }
        if self.trace_capacity == 0 {
            return invalid("probe trace needs room for at least one reading".to_string());
        }
        Ok(())
    }
}

/// Sampling lattice shared by every frame of a session.
#[derive(Resource, Debug, Clone)]
pub struct DomainGrid(pub SampleGrid);

/// Fixed-interval frame timer.
#[derive(Resource, Debug)]
pub struct FrameClock {
    pub timer: Timer,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
        }
    }
}

/// One-shot requests raised by the UI and consumed by the playback systems.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequests {
    pub toggle_pause: bool,
    pub single_step: bool,
    pub reset: bool,
}

/// Sent whenever the animation shows a new frame and the field must be redrawn.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FrameAdvanced {
    pub frame: u32,
}
