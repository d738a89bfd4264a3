use super::animation::{FrameStep, SphereAnimation};
use super::history::ProbeTrace;
use super::probe::{ProbePoint, ProbeReadout};
use super::resources::{DomainGrid, FrameAdvanced, FrameClock, PlaybackRequests, SphereParameters};
use super::state::PlaybackState;
use bevy::prelude::*;

/// Asks the renderer to draw whatever frame the animation currently holds.
pub fn request_initial_frame_system(
    animation: Res<SphereAnimation>,
    mut advanced: EventWriter<FrameAdvanced>,
) {
    info!(
        "Initial frame {}: R = {:.4} m, Q = {:.3e} C",
        animation.frame, animation.sphere.radius, animation.sphere.charge
    );
    advanced.send(FrameAdvanced {
        frame: animation.frame,
    });
}

/// Puts the frame 0 reading into the trace, so the first cycle's range includes it.
pub fn record_initial_reading_system(readout: Res<ProbeReadout>, mut trace: ResMut<ProbeTrace>) {
    trace.push(readout.0);
}

/// Rebuilds the grid, sphere and probe reading after the parameters were edited
/// at runtime (F1 inspector). Rejected edits leave the last valid state in place.
pub fn apply_parameter_edits_system(
    params: Res<SphereParameters>,
    mut grid: ResMut<DomainGrid>,
    mut animation: ResMut<SphereAnimation>,
    readout: Option<ResMut<ProbeReadout>>,
) {
    if !params.is_changed() || params.is_added() {
        return;
    }
    if let Err(err) = params.validate() {
        error!("Parameter edit rejected: {err}");
        return;
    }

    if grid.0.width() != params.grid_resolution || grid.0.half_width() != params.domain_half_width {
        match params.sample_grid() {
            Ok(rebuilt) => {
                info!(
                    "Sample grid rebuilt: {}x{} over ±{} m",
                    rebuilt.width(),
                    rebuilt.height(),
                    rebuilt.half_width()
                );
                grid.0 = rebuilt;
            }
            Err(err) => {
                error!("Grid edit rejected: {err}");
                return;
            }
        }
    }

    // ein geschrumpftes Gebiet darf die Sonde nicht aussperren
    let probe = if animation.probe.position.length() < params.domain_half_width {
        animation.probe
    } else {
        ProbePoint {
            position: params.initial_probe,
        }
    };
    match SphereAnimation::at_frame(animation.frame, probe, &params) {
        Ok(rebuilt) => {
            if *animation != rebuilt {
                *animation = rebuilt;
                debug!(
                    "Frame {} rebuilt: R = {:.4} m, Q = {:.3e} C",
                    rebuilt.frame, rebuilt.sphere.radius, rebuilt.sphere.charge
                );
            }
            if let Some(mut readout) = readout {
                readout.0 = rebuilt.probe_reading(params.epsilon_0);
            }
        }
        Err(err) => error!("Parameter edit rejected: {err}"),
    }
}

/// Turns the one-shot UI requests (pause toggle, reset) into state changes.
#[allow(clippy::too_many_arguments)]
pub fn apply_playback_requests_system(
    mut requests: ResMut<PlaybackRequests>,
    state: Res<State<PlaybackState>>,
    mut next_state: ResMut<NextState<PlaybackState>>,
    params: Res<SphereParameters>,
    mut animation: ResMut<SphereAnimation>,
    mut readout: ResMut<ProbeReadout>,
    mut trace: ResMut<ProbeTrace>,
    mut clock: ResMut<FrameClock>,
    mut advanced: EventWriter<FrameAdvanced>,
) {
    if requests.reset {
        requests.reset = false;
        requests.toggle_pause = false;
        match SphereAnimation::initial(&params) {
            Ok(initial) => {
                *animation = initial;
                readout.0 = initial.probe_reading(params.epsilon_0);
                trace.max_size = params.trace_capacity;
                trace.clear();
                trace.push(readout.0);
                *clock = FrameClock::new(params.frame_interval());
                advanced.send(FrameAdvanced {
                    frame: initial.frame,
                });
                next_state.set(PlaybackState::Running);
                info!("Animation reset to frame 0.");
            }
            Err(err) => error!("Reset rejected: {err}"),
        }
        return;
    }

    if requests.toggle_pause {
        requests.toggle_pause = false;
        match state.get() {
            PlaybackState::Running => {
                next_state.set(PlaybackState::Paused);
                info!("Playback paused at frame {}.", animation.frame);
            }
            PlaybackState::Paused => {
                next_state.set(PlaybackState::Running);
                info!("Playback resumed at frame {}.", animation.frame);
            }
            PlaybackState::Finished => {
                info!("Playback already finished, reset to play again.");
            }
        }
    }
}

/// Advances the animation by one frame when the clock fires, or on a single
/// step request while paused.
#[allow(clippy::too_many_arguments)]
pub fn frame_tick_system(
    time: Res<Time>,
    state: Res<State<PlaybackState>>,
    mut next_state: ResMut<NextState<PlaybackState>>,
    mut clock: ResMut<FrameClock>,
    mut requests: ResMut<PlaybackRequests>,
    params: Res<SphereParameters>,
    mut animation: ResMut<SphereAnimation>,
    mut readout: ResMut<ProbeReadout>,
    mut trace: ResMut<ProbeTrace>,
    mut advanced: EventWriter<FrameAdvanced>,
) {
    // pick up interval and capacity edits from the inspector
    if clock.timer.duration() != params.frame_interval() {
        clock.timer.set_duration(params.frame_interval());
    }
    if trace.max_size != params.trace_capacity {
        trace.max_size = params.trace_capacity;
    }

    let step_requested = std::mem::take(&mut requests.single_step);
    let due = match state.get() {
        PlaybackState::Running => clock.timer.tick(time.delta()).just_finished(),
        PlaybackState::Paused => step_requested,
        PlaybackState::Finished => false,
    };
    if !due {
        return;
    }

    match animation.advance(&params) {
        Ok(FrameStep::Advanced(next)) => {
            *animation = next;
            let reading = next.probe_reading(params.epsilon_0);
            readout.0 = reading;
            trace.push(reading);
            advanced.send(FrameAdvanced { frame: next.frame });
            debug!(
                "Frame {}: R = {:.4} m, Q = {:.3e} C, probe {:.3e} N/C",
                next.frame, next.sphere.radius, next.sphere.charge, reading.field
            );
        }
        Ok(FrameStep::Finished) => {
            next_state.set(PlaybackState::Finished);
            info!(
                "Reached last frame {}, playback stopped.",
                animation.frame
            );
        }
        Err(err) => error!("Skipping frame after {}: {err}", animation.frame),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::sim::resources::PlaybackMode;
    use approx::assert_relative_eq;
    use bevy::math::DVec2;

    fn test_app(params: SphereParameters, animation: SphereAnimation) -> App {
        let mut app = App::new();
        app.init_state::<PlaybackState>()
            .add_event::<FrameAdvanced>()
            .init_resource::<Time>()
            .init_resource::<PlaybackRequests>()
            .insert_resource(FrameClock::new(params.frame_interval()))
            .insert_resource(ProbeReadout(animation.probe_reading(params.epsilon_0)))
            .insert_resource(ProbeTrace::new(params.trace_capacity))
            .insert_resource(animation)
            .insert_resource(params)
            .add_systems(
                Update,
                (apply_playback_requests_system, frame_tick_system).chain(),
            );
        app
    }

    fn default_app() -> App {
        let params = SphereParameters::default();
        let animation = SphereAnimation::initial(&params).unwrap();
        test_app(params, animation)
    }

    fn pause(app: &mut App) {
        app.world
            .resource_mut::<NextState<PlaybackState>>()
            .set(PlaybackState::Paused);
        app.update();
        assert_eq!(
            *app.world.resource::<State<PlaybackState>>().get(),
            PlaybackState::Paused
        );
    }

    fn sent_frames(app: &App) -> Vec<u32> {
        let events = app.world.resource::<Events<FrameAdvanced>>();
        let mut reader = events.get_reader();
        reader.read(events).map(|e| e.frame).collect()
    }

    #[test]
    fn test_no_frame_without_elapsed_time() {
        let mut app = default_app();
        app.update();
        app.update();
        assert_eq!(app.world.resource::<SphereAnimation>().frame, 0);
        assert!(app.world.resource::<ProbeTrace>().is_empty());
    }

    #[test]
    fn test_single_step_while_paused() {
        let mut app = default_app();
        pause(&mut app);

        app.world.resource_mut::<PlaybackRequests>().single_step = true;
        app.update();

        let animation = *app.world.resource::<SphereAnimation>();
        assert_eq!(animation.frame, 1);
        assert_eq!(app.world.resource::<ProbeTrace>().len(), 1);
        assert_eq!(app.world.resource::<ProbeReadout>().0.frame, 1);
        assert_eq!(sent_frames(&app), vec![1]);
        assert!(!app.world.resource::<PlaybackRequests>().single_step);

        // without a new request nothing moves
        app.update();
        assert_eq!(app.world.resource::<SphereAnimation>().frame, 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut app = default_app();
        app.world.resource_mut::<PlaybackRequests>().toggle_pause = true;
        app.update();
        app.update();
        assert_eq!(
            *app.world.resource::<State<PlaybackState>>().get(),
            PlaybackState::Paused
        );

        app.world.resource_mut::<PlaybackRequests>().toggle_pause = true;
        app.update();
        app.update();
        assert_eq!(
            *app.world.resource::<State<PlaybackState>>().get(),
            PlaybackState::Running
        );
    }

    #[test]
    fn test_once_mode_finishes() {
        let params = SphereParameters {
            playback_mode: PlaybackMode::Once,
            frame_count: 2,
            ..SphereParameters::default()
        };
        let animation = SphereAnimation::initial(&params).unwrap();
        let mut app = test_app(params, animation);
        pause(&mut app);

        app.world.resource_mut::<PlaybackRequests>().single_step = true;
        app.update();
        assert_eq!(app.world.resource::<SphereAnimation>().frame, 1);

        app.world.resource_mut::<PlaybackRequests>().single_step = true;
        app.update();
        app.update();
        assert_eq!(
            *app.world.resource::<State<PlaybackState>>().get(),
            PlaybackState::Finished
        );
        assert_eq!(app.world.resource::<SphereAnimation>().frame, 1);
    }

    #[test]
    fn test_reset_restores_initial_frame() {
        let mut app = default_app();
        pause(&mut app);
        for _ in 0..3 {
            app.world.resource_mut::<PlaybackRequests>().single_step = true;
            app.update();
        }
        assert_eq!(app.world.resource::<SphereAnimation>().frame, 3);

        app.world.resource_mut::<PlaybackRequests>().reset = true;
        app.update();
        app.update();

        let params = SphereParameters::default();
        assert_eq!(
            *app.world.resource::<SphereAnimation>(),
            SphereAnimation::initial(&params).unwrap()
        );
        // only the frame 0 reading survives the reset
        let trace = app.world.resource::<ProbeTrace>();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.readings[0].frame, 0);
        assert_eq!(
            *app.world.resource::<State<PlaybackState>>().get(),
            PlaybackState::Running
        );
    }

    #[test]
    fn test_initial_reading_enters_trace() {
        let mut app = default_app();
        app.add_systems(Startup, record_initial_reading_system);
        app.update();
        let trace = app.world.resource::<ProbeTrace>();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.readings[0], app.world.resource::<ProbeReadout>().0);
    }

    fn edit_app() -> App {
        let params = SphereParameters::default();
        let animation = SphereAnimation::initial(&params).unwrap();
        let mut app = App::new();
        app.insert_resource(DomainGrid(params.sample_grid().unwrap()))
            .insert_resource(ProbeReadout(animation.probe_reading(params.epsilon_0)))
            .insert_resource(animation)
            .insert_resource(params)
            .add_systems(Update, apply_parameter_edits_system);
        app.update();
        app
    }

    #[test]
    fn test_density_edit_rebuilds_sphere_and_readout() {
        let mut app = edit_app();
        let before = *app.world.resource::<SphereAnimation>();
        let reading_before = app.world.resource::<ProbeReadout>().0;
        app.world.resource_mut::<SphereParameters>().charge_density *= 2.0;
        app.update();

        let animation = *app.world.resource::<SphereAnimation>();
        assert_eq!(animation.frame, 0);
        assert_eq!(animation.probe, before.probe);
        assert_relative_eq!(animation.sphere.charge, 2.0 * before.sphere.charge, max_relative = 1e-12);
        let after = app.world.resource::<ProbeReadout>().0;
        assert_relative_eq!(after.field, 2.0 * reading_before.field, max_relative = 1e-12);
    }

    #[test]
    fn test_domain_edit_rebuilds_grid_and_keeps_probe_inside() {
        let mut app = edit_app();
        app.world.resource_mut::<SphereAnimation>().probe = ProbePoint::new(0.06, 0.06);
        {
            let mut params = app.world.resource_mut::<SphereParameters>();
            params.domain_half_width = 0.08;
            params.grid_resolution = 50;
        }
        app.update();

        let grid = &app.world.resource::<DomainGrid>().0;
        assert_eq!(grid.width(), 50);
        assert_eq!(grid.half_width(), 0.08);
        // (0.06, 0.06) lies beyond the new bound, so the probe goes back to its start
        let probe = app.world.resource::<SphereAnimation>().probe;
        assert_eq!(probe.position, DVec2::new(0.02, 0.02));
    }

    #[test]
    fn test_invalid_edit_keeps_last_state() {
        let mut app = edit_app();
        let before = *app.world.resource::<SphereAnimation>();
        {
            let mut params = app.world.resource_mut::<SphereParameters>();
            params.base_radius = -1.0;
            params.grid_resolution = 1;
        }
        app.update();
        assert_eq!(*app.world.resource::<SphereAnimation>(), before);
        assert_eq!(app.world.resource::<DomainGrid>().0.width(), 200);
    }
}
