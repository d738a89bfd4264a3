use super::probe::{ProbePoint, ProbeReading};
use super::resources::{PlaybackMode, SphereParameters};
use crate::math::error::FieldResult;
use crate::physics::electrostatics::ChargedSphere;
use bevy::math::DVec2;
use bevy::prelude::*;

/// Everything that changes while the sphere oscillates.
///
/// Frame ticks and clicks never mutate it in place: they take the current value
/// and return the next one, and the systems swap it into the resource.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SphereAnimation {
    /// Index of the frame currently shown.
    pub frame: u32,
    pub sphere: ChargedSphere,
    pub probe: ProbePoint,
}

/// Result of a frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    Advanced(SphereAnimation),
    /// The last frame was already shown and playback does not loop.
    Finished,
}

impl SphereAnimation {
    /// Frame 0 with the probe at its initial position.
    pub fn initial(params: &SphereParameters) -> FieldResult<Self> {
        let probe = ProbePoint {
            position: params.initial_probe,
        };
        Self::at_frame(0, probe, params)
    }

    /// State for `frame`, recomputing radius and charge from the parameters.
    pub fn at_frame(frame: u32, probe: ProbePoint, params: &SphereParameters) -> FieldResult<Self> {
        let sphere =
            ChargedSphere::from_density(params.radius_at_frame(frame), params.charge_density)?;
        Ok(Self {
            frame,
            sphere,
            probe,
        })
    }

    /// Index of the frame after this one, `None` once a one-shot run is over.
    pub fn next_frame_index(&self, params: &SphereParameters) -> Option<u32> {
        let next = self.frame.saturating_add(1);
        if next < params.frame_count {
            return Some(next);
        }
        match params.playback_mode {
            PlaybackMode::Loop => Some(0),
            PlaybackMode::Once => None,
        }
    }

    pub fn advance(self, params: &SphereParameters) -> FieldResult<FrameStep> {
        match self.next_frame_index(params) {
            Some(frame) => Ok(FrameStep::Advanced(Self::at_frame(frame, self.probe, params)?)),
            None => Ok(FrameStep::Finished),
        }
    }

    /// Applies a pointer click; clicks outside the domain bound change nothing.
    pub fn with_click(self, click: DVec2, radius_bound: f64) -> Self {
        Self {
            probe: self.probe.relocated(click, radius_bound),
            ..self
        }
    }

    pub fn probe_reading(&self, epsilon_0: f64) -> ProbeReading {
        ProbeReading::measure(&self.sphere, self.probe, epsilon_0, self.frame)
    }
}
