// src/visualization/overlay.rs
use crate::physics::sim::animation::SphereAnimation;
use crate::setup::PlotFrame;
use crate::visualization::heatmap::CurrentField;
use bevy::prelude::*;

const GRID_COLOR: Color = Color::rgba(0.69, 0.69, 0.69, 0.6);
const FRAME_COLOR: Color = Color::BLACK;
const ISO_LINE_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.6);
const CIRCLE_SEGMENTS: usize = 128;
/// Probe marker size in pixels.
const PROBE_MARKER_PX: f32 = 4.0;

/// Grid lines at every interior tick, as (start, end) pairs in world space.
pub fn grid_lines(plot: &PlotFrame) -> Vec<(Vec2, Vec2)> {
    let edge = plot.half_width as f32;
    let ticks = plot.ticks();
    let interior = &ticks[1..ticks.len() - 1];
    interior
        .iter()
        .flat_map(|&t| {
            let t = t as f32;
            [
                (Vec2::new(t, -edge), Vec2::new(t, edge)),
                (Vec2::new(-edge, t), Vec2::new(edge, t)),
            ]
        })
        .collect()
}

pub fn draw_plot_frame_system(mut gizmos: Gizmos, plot: Res<PlotFrame>) {
    for (start, end) in grid_lines(&plot) {
        gizmos.line_2d(start, end, GRID_COLOR);
    }
    let side = 2.0 * plot.half_width as f32;
    gizmos.rect_2d(Vec2::ZERO, 0.0, Vec2::splat(side), FRAME_COLOR);
}

/// Unfilled blue outline at the current sphere radius.
pub fn draw_sphere_boundary_system(mut gizmos: Gizmos, animation: Res<SphereAnimation>) {
    gizmos
        .circle_2d(Vec2::ZERO, animation.sphere.radius as f32, Color::BLUE)
        .segments(CIRCLE_SEGMENTS);
}

pub fn draw_probe_marker_system(
    mut gizmos: Gizmos,
    animation: Res<SphereAnimation>,
    plot: Res<PlotFrame>,
) {
    let center = animation.probe.position.as_vec2();
    // concentric rings read as a filled dot at this size
    let mut radius = 0.5 * plot.meters_per_pixel;
    while radius <= PROBE_MARKER_PX * plot.meters_per_pixel {
        gizmos.circle_2d(center, radius, Color::BLACK).segments(16);
        radius += 0.5 * plot.meters_per_pixel;
    }
}

pub fn draw_iso_lines_system(mut gizmos: Gizmos, field: Option<Res<CurrentField>>) {
    let Some(field) = field else {
        return;
    };
    for segment in &field.iso_lines {
        gizmos.line_2d(
            segment.start.as_vec2(),
            segment.end.as_vec2(),
            ISO_LINE_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lines_skip_frame_edges() {
        let plot = PlotFrame::new(0.1);
        let lines = grid_lines(&plot);
        // 7 interior ticks, one vertical and one horizontal line each
        assert_eq!(lines.len(), 14);
        for (start, end) in &lines {
            assert!(start.x.abs() <= 0.1 + 1e-6 && end.y.abs() <= 0.1 + 1e-6);
        }
        assert!(lines.contains(&(Vec2::new(0.0, -0.1), Vec2::new(0.0, 0.1))));
    }
}
