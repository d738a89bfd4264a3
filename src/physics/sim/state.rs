use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum PlaybackState {
    #[default] // Startzustand, spielt sofort los
    Running,
    Paused,
    /// Reached the last frame in `PlaybackMode::Once`
    Finished,
}
