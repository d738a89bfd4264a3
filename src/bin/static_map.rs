// ./src/bin/static_map.rs
use bevy::input::common_conditions::input_toggle_active;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use sphere_field::math::FieldError;
use sphere_field::physics::sim::animation::SphereAnimation;
use sphere_field::physics::sim::resources::{
    DomainGrid, FrameAdvanced, PlaybackMode, SphereParameters,
};
use sphere_field::physics::sim::systems::{
    apply_parameter_edits_system, request_initial_frame_system,
};
use sphere_field::setup::{PlotFrame, setup_camera, sync_plot_frame_system, window_plugin};
use sphere_field::visualization::colormap::Colormap;
use sphere_field::visualization::heatmap::{ContourLayers, redraw_contour_layer_system};
use sphere_field::visualization::overlay::{draw_iso_lines_system, draw_plot_frame_system};
use sphere_field::visualization::ui::{colorbar_ui_system, plot_axes_ui_system};

fn main() -> Result<(), FieldError> {
    let params = SphereParameters::static_map();
    params.validate()?;
    let grid = params.sample_grid()?;
    let sphere = SphereAnimation::initial(&params)?;

    App::new()
        .add_plugins(DefaultPlugins.set(window_plugin("Charged Sphere: Static Field Map")))
        .add_plugins(EguiPlugin)
        .add_plugins(
            ResourceInspectorPlugin::<SphereParameters>::default()
                .run_if(input_toggle_active(false, KeyCode::F1)),
        )
        .register_type::<SphereParameters>()
        .register_type::<PlaybackMode>()
        .register_type::<Colormap>()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(PlotFrame::new(params.domain_half_width)) // Pixel <-> Meter
        .insert_resource(DomainGrid(grid))
        .insert_resource(sphere)
        .insert_resource(params)
        .init_resource::<ContourLayers>()
        .add_event::<FrameAdvanced>()
        .add_systems(Startup, (setup_camera, request_initial_frame_system))
        .add_systems(
            Update,
            (
                // Inspector-Änderungen vor dem Neuzeichnen übernehmen
                (apply_parameter_edits_system, sync_plot_frame_system).chain(),
                redraw_contour_layer_system,
                // Overlays und Panels lesen das frisch gezeichnete Feld
                (draw_plot_frame_system, draw_iso_lines_system),
                (colorbar_ui_system, plot_axes_ui_system).chain(),
            )
                .chain(),
        )
        .run();
    Ok(())
}
