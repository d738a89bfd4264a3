// ./src/setup.rs
use crate::physics::sim::resources::DomainGrid;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_window::{Window, WindowPlugin, WindowResolution};

/// Edge length of the plotted domain on screen, in logical pixels.
pub const PLOT_SIZE_PX: f32 = 600.0;
/// Width reserved on the right for the color bar panel.
pub const COLORBAR_PANEL_PX: f32 = 160.0;
pub const WINDOW_SIZE: (f32, f32) = (960.0, 760.0);

/// Maps between domain meters and window pixels.
///
/// The world is laid out in meters, so the camera projection scale equals
/// `meters_per_pixel`. The camera sits right of the origin so the plot is
/// centered in the space left of the color bar.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub half_width: f64,
    pub meters_per_pixel: f32,
}

#[derive(Component, Debug, Default)]
pub struct PlotCamera;

impl PlotFrame {
    pub fn new(half_width: f64) -> Self {
        Self {
            half_width,
            meters_per_pixel: (2.0 * half_width) as f32 / PLOT_SIZE_PX,
        }
    }

    /// World position the camera looks at.
    pub fn camera_center(&self) -> Vec2 {
        Vec2::new(0.5 * COLORBAR_PANEL_PX * self.meters_per_pixel, 0.0)
    }

    /// Axis tick positions, a quarter of the half width apart.
    pub fn ticks(&self) -> Vec<f64> {
        (-4..=4).map(|i| self.half_width * i as f64 / 4.0).collect()
    }

    /// Window position (top-left origin, y down) of a domain point.
    pub fn world_to_screen(&self, world: DVec2, window_size: Vec2) -> Vec2 {
        let relative = world.as_vec2() - self.camera_center();
        Vec2::new(
            0.5 * window_size.x + relative.x / self.meters_per_pixel,
            0.5 * window_size.y - relative.y / self.meters_per_pixel,
        )
    }

    pub fn screen_to_world(&self, screen: Vec2, window_size: Vec2) -> DVec2 {
        let relative = Vec2::new(
            screen.x - 0.5 * window_size.x,
            0.5 * window_size.y - screen.y,
        ) * self.meters_per_pixel;
        (relative + self.camera_center()).as_dvec2()
    }
}

pub fn window_plugin(title: &str) -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            resolution: WindowResolution::new(WINDOW_SIZE.0, WINDOW_SIZE.1),
            ..default()
        }),
        ..default()
    }
}

pub fn setup_camera(mut commands: Commands, plot: Res<PlotFrame>) {
    let mut camera = Camera2dBundle::default();
    camera.projection.scale = plot.meters_per_pixel;
    let center = plot.camera_center();
    camera.transform.translation.x = center.x;
    camera.transform.translation.y = center.y;
    commands.spawn((camera, PlotCamera));
    info!(
        "Plot camera: {:.3e} m per pixel, domain ±{} m",
        plot.meters_per_pixel, plot.half_width
    );
}

/// Follows a domain resize from the inspector: new pixel scale, camera re-aimed.
pub fn sync_plot_frame_system(
    grid: Res<DomainGrid>,
    mut plot: ResMut<PlotFrame>,
    mut cameras: Query<(&mut OrthographicProjection, &mut Transform), With<PlotCamera>>,
) {
    if !grid.is_changed() || grid.0.half_width() == plot.half_width {
        return;
    }
    *plot = PlotFrame::new(grid.0.half_width());
    let center = plot.camera_center();
    for (mut projection, mut transform) in &mut cameras {
        projection.scale = plot.meters_per_pixel; // Meter pro Pixel
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
    info!(
        "Plot rescaled: {:.3e} m per pixel, domain ±{} m",
        plot.meters_per_pixel, plot.half_width
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plot_spans_configured_pixels() {
        let plot = PlotFrame::new(0.1);
        let window = Vec2::new(WINDOW_SIZE.0, WINDOW_SIZE.1);
        let left = plot.world_to_screen(DVec2::new(-0.1, 0.0), window);
        let right = plot.world_to_screen(DVec2::new(0.1, 0.0), window);
        assert_relative_eq!(right.x - left.x, PLOT_SIZE_PX, epsilon = 1e-3);
        // origin sits left of the window center, making room for the color bar
        let origin = plot.world_to_screen(DVec2::ZERO, window);
        assert_relative_eq!(origin.x, 0.5 * (WINDOW_SIZE.0 - COLORBAR_PANEL_PX), epsilon = 1e-3);
        assert_relative_eq!(origin.y, 0.5 * WINDOW_SIZE.1, epsilon = 1e-3);
    }

    #[test]
    fn test_screen_y_points_down() {
        let plot = PlotFrame::new(0.1);
        let window = Vec2::new(800.0, 800.0);
        let top = plot.world_to_screen(DVec2::new(0.0, 0.1), window);
        let bottom = plot.world_to_screen(DVec2::new(0.0, -0.1), window);
        assert!(top.y < bottom.y);
    }

    #[test]
    fn test_screen_world_inverse() {
        let plot = PlotFrame::new(0.1);
        let window = Vec2::new(WINDOW_SIZE.0, WINDOW_SIZE.1);
        let p = DVec2::new(0.03, -0.04);
        let back = plot.screen_to_world(plot.world_to_screen(p, window), window);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-6);
    }

    #[test]
    fn test_domain_resize_moves_camera() {
        let mut app = App::new();
        app.insert_resource(DomainGrid(
            crate::math::grid::SampleGrid::square(0.2, 10).unwrap(),
        ))
        .insert_resource(PlotFrame::new(0.1))
        .add_systems(Update, sync_plot_frame_system);
        let camera = app
            .world
            .spawn((OrthographicProjection::default(), Transform::default(), PlotCamera))
            .id();
        app.update();

        let plot = *app.world.resource::<PlotFrame>();
        assert_eq!(plot, PlotFrame::new(0.2));
        let projection = app.world.get::<OrthographicProjection>(camera).unwrap();
        assert_relative_eq!(projection.scale, plot.meters_per_pixel);
        let transform = app.world.get::<Transform>(camera).unwrap();
        assert_relative_eq!(transform.translation.x, plot.camera_center().x);
    }

    #[test]
    fn test_ticks() {
        let ticks = PlotFrame::new(0.1).ticks();
        assert_eq!(ticks.len(), 9);
        assert_relative_eq!(ticks[0], -0.1);
        assert_relative_eq!(ticks[4], 0.0);
        assert_relative_eq!(ticks[8], 0.1);
    }
}
