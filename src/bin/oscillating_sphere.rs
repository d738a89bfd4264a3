// ./src/bin/oscillating_sphere.rs
use bevy::ecs::schedule::common_conditions::resource_equals;
use bevy::input::common_conditions::input_toggle_active;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use sphere_field::math::FieldError;
use sphere_field::physics::sim::animation::SphereAnimation;
use sphere_field::physics::sim::history::ProbeTrace;
use sphere_field::physics::sim::probe::ProbeReadout;
use sphere_field::physics::sim::resources::*;
use sphere_field::physics::sim::state::PlaybackState;
use sphere_field::physics::sim::systems::*;
use sphere_field::setup::{PlotFrame, setup_camera, sync_plot_frame_system, window_plugin};
use sphere_field::visualization::colormap::Colormap;
use sphere_field::visualization::heatmap::{ContourLayers, redraw_contour_layer_system};
use sphere_field::visualization::overlay::*;
use sphere_field::visualization::picking::{
    PointerOverUi, probe_click_system, track_pointer_over_ui_system,
};
use sphere_field::visualization::ui::*;

fn main() -> Result<(), FieldError> {
    let params = SphereParameters::default();
    params.validate()?;
    let grid = params.sample_grid()?;
    let animation = SphereAnimation::initial(&params)?;

    App::new()
        .add_plugins(DefaultPlugins.set(window_plugin("Charged Sphere: Oscillating Radius")))
        .add_plugins(EguiPlugin)
        .add_plugins(
            ResourceInspectorPlugin::<SphereParameters>::default()
                .run_if(input_toggle_active(false, KeyCode::F1)),
        )
        .register_type::<SphereParameters>()
        .register_type::<PlaybackMode>()
        .register_type::<Colormap>()
        .init_state::<PlaybackState>()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(PlotFrame::new(params.domain_half_width))
        .insert_resource(DomainGrid(grid))
        .insert_resource(FrameClock::new(params.frame_interval()))
        .insert_resource(ProbeReadout(animation.probe_reading(params.epsilon_0)))
        .insert_resource(ProbeTrace::new(params.trace_capacity)) // Frame 0 kommt beim Start hinein
        .insert_resource(animation)
        .insert_resource(params)
        .init_resource::<PlaybackRequests>()
        .init_resource::<PointerOverUi>()
        .init_resource::<ContourLayers>()
        .add_event::<FrameAdvanced>()
        .add_systems(
            Startup,
            (
                setup_camera,
                request_initial_frame_system,
                record_initial_reading_system, // Messwert von Frame 0 in die Spur
            ),
        )
        .add_systems(
            Update,
            (
                // Block 1: Änderungen aus dem Inspector (F1) übernehmen
                apply_parameter_edits_system,
                sync_plot_frame_system, // Klickgrenze und Kamera folgen dem Gebiet
                // Block 2: Eingabe, Klicks auf egui-Panels bleiben bei egui
                track_pointer_over_ui_system,
                probe_click_system.run_if(resource_equals(PointerOverUi(false))),
                // Block 3: Wiedergabe und Frame-Vorschub
                apply_playback_requests_system,
                frame_tick_system,
                // Block 4: Feld neu zeichnen, danach alles, was darüber liegt
                redraw_contour_layer_system,
                (
                    draw_plot_frame_system,
                    draw_iso_lines_system,
                    draw_sphere_boundary_system,
                    draw_probe_marker_system,
                ),
                (
                    colorbar_ui_system,
                    plot_axes_ui_system,
                    probe_readout_ui_system,
                    playback_controls_ui_system,
                )
                    .chain(),
            )
                .chain(), // feste Reihenfolge für den ganzen Update-Block
        )
        .run();
    Ok(())
}
