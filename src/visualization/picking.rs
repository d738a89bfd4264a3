// src/visualization/picking.rs
use crate::physics::sim::animation::SphereAnimation;
use crate::physics::sim::probe::ProbeReadout;
use crate::physics::sim::resources::SphereParameters;
use crate::setup::PlotFrame;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_window::PrimaryWindow;

/// Cursor position converted to domain meters, `None` while the cursor is
/// outside the window.
pub fn cursor_to_domain(window: &Window, plot: &PlotFrame) -> Option<DVec2> {
    let cursor = window.cursor_position()?;
    Some(plot.screen_to_world(cursor, Vec2::new(window.width(), window.height())))
}

/// Whether egui panels held the pointer during the last update. Clicks on
/// panels must not reach the plot.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerOverUi(pub bool);

pub fn track_pointer_over_ui_system(mut contexts: EguiContexts, mut over: ResMut<PointerOverUi>) {
    let ctx = contexts.ctx_mut();
    let wants = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    if over.0 != wants {
        over.0 = wants;
    }
}

/// Moves the probe to a left click when it lands inside the domain bound and
/// refreshes the readout right away.
pub fn probe_click_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    plot: Res<PlotFrame>,
    params: Res<SphereParameters>,
    mut animation: ResMut<SphereAnimation>,
    mut readout: ResMut<ProbeReadout>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(click) = cursor_to_domain(window, &plot) else {
        return;
    };

    let moved = animation.with_click(click, plot.half_width); // Grenze des gezeichneten Gebiets
    if moved.probe == animation.probe {
        debug!("Ignored click at ({:.4}, {:.4}): outside the domain", click.x, click.y);
        return;
    }
    *animation = moved;
    readout.0 = moved.probe_reading(params.epsilon_0);
    debug!("Probe moved: {}", readout.0.label());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::WINDOW_SIZE;

    fn test_app() -> App {
        let params = SphereParameters::default();
        let animation = SphereAnimation::initial(&params).unwrap();
        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .insert_resource(PlotFrame::new(params.domain_half_width))
            .insert_resource(ProbeReadout(animation.probe_reading(params.epsilon_0)))
            .insert_resource(animation)
            .insert_resource(params)
            .add_systems(Update, probe_click_system);
        app.world.spawn((
            Window {
                resolution: bevy_window::WindowResolution::new(WINDOW_SIZE.0, WINDOW_SIZE.1),
                ..default()
            },
            PrimaryWindow,
        ));
        app
    }

    fn click_at(app: &mut App, world: DVec2) {
        let plot = *app.world.resource::<PlotFrame>();
        let screen = plot.world_to_screen(world, Vec2::new(WINDOW_SIZE.0, WINDOW_SIZE.1));
        let mut windows = app.world.query::<&mut Window>();
        for mut window in windows.iter_mut(&mut app.world) {
            window.set_cursor_position(Some(screen));
        }
        let mut buttons = app.world.resource_mut::<ButtonInput<MouseButton>>();
        buttons.release(MouseButton::Left);
        buttons.clear();
        buttons.press(MouseButton::Left);
        app.update();
    }

    #[test]
    fn test_click_inside_moves_probe() {
        let mut app = test_app();
        click_at(&mut app, DVec2::new(0.03, 0.04));

        let probe = app.world.resource::<SphereAnimation>().probe.position;
        assert!((probe - DVec2::new(0.03, 0.04)).length() < 1e-4);
        let readout = app.world.resource::<ProbeReadout>().0;
        assert_eq!(readout.position, probe);
        assert_eq!(readout.label(), "E @ (0.03, 0.04) = 1.88e+03 N/C");
    }

    #[test]
    fn test_click_outside_bound_is_ignored() {
        let mut app = test_app();
        let before = *app.world.resource::<SphereAnimation>();
        click_at(&mut app, DVec2::new(0.09, 0.12));
        assert_eq!(*app.world.resource::<SphereAnimation>(), before);
    }

    #[test]
    fn test_click_bound_follows_plotted_domain() {
        let mut app = test_app();
        // the grid shrank to ±0.05 m while the parameters may still say otherwise
        app.world.insert_resource(PlotFrame::new(0.05));
        let before = *app.world.resource::<SphereAnimation>();
        click_at(&mut app, DVec2::new(0.06, 0.0));
        assert_eq!(*app.world.resource::<SphereAnimation>(), before);

        click_at(&mut app, DVec2::new(0.04, 0.0));
        let probe = app.world.resource::<SphereAnimation>().probe.position;
        assert!((probe - DVec2::new(0.04, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_no_click_no_change() {
        let mut app = test_app();
        let before = *app.world.resource::<SphereAnimation>();
        app.update();
        assert_eq!(*app.world.resource::<SphereAnimation>(), before);
    }
}
