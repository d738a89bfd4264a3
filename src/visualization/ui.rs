// src/visualization/ui.rs
use crate::math::utils::comparison::inverse_lerp;
use crate::math::utils::format::{fixed, scientific};
use crate::physics::sim::animation::SphereAnimation;
use crate::physics::sim::history::ProbeTrace;
use crate::physics::sim::probe::{ProbeReading, ProbeReadout};
use crate::physics::sim::resources::{PlaybackMode, PlaybackRequests, SphereParameters};
use crate::physics::sim::state::PlaybackState;
use crate::setup::{COLORBAR_PANEL_PX, PlotFrame};
use crate::visualization::colormap::Colormap;
use crate::visualization::heatmap::CurrentField;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use egui::epaint::TextShape;
use egui::{
    Align2, Color32, FontId, Id, LayerId, Order, Painter, Pos2, Rect, Rounding, Slider, Stroke,
};
use std::f32::consts::FRAC_PI_2;

pub const PLOT_TITLE: &str = "Electric Field of a Charged Sphere (2D Map)";
pub const X_AXIS_LABEL: &str = "x (meters)";
pub const Y_AXIS_LABEL: &str = "y (meters)";
pub const COLORBAR_LABEL: &str = "Electric Field Strength (N/C)";
/// Domain position of the probe readout box's lower-left corner.
pub const READOUT_ANCHOR: DVec2 = DVec2::new(0.01, 0.08);

const TEXT_COLOR: Color32 = Color32::BLACK;
const TICK_LENGTH: f32 = 5.0;
const COLORBAR_WIDTH: f32 = 20.0;
const COLORBAR_TICKS: usize = 6;

fn plot_painter(ctx: &egui::Context, name: &'static str) -> Painter {
    ctx.layer_painter(LayerId::new(Order::Background, Id::new(name)))
}

/// Screen rectangle covered by the plotted domain.
fn plot_rect(ctx: &egui::Context, plot: &PlotFrame) -> Rect {
    let screen = ctx.screen_rect().size();
    let window = Vec2::new(screen.x, screen.y);
    let hw = plot.half_width;
    let top_left = plot.world_to_screen(DVec2::new(-hw, hw), window);
    let bottom_right = plot.world_to_screen(DVec2::new(hw, -hw), window);
    Rect::from_min_max(
        Pos2::new(top_left.x, top_left.y),
        Pos2::new(bottom_right.x, bottom_right.y),
    )
}

/// Paints `text` rotated a quarter turn so it reads bottom to top, centered
/// vertically on `center_y` with its left edge at `left`.
fn vertical_text(painter: &Painter, left: f32, center_y: f32, text: &str, font: FontId) {
    let galley = painter.layout_no_wrap(text.to_string(), font, TEXT_COLOR);
    let pos = Pos2::new(left, center_y + 0.5 * galley.size().x);
    let mut shape = TextShape::new(pos, galley, TEXT_COLOR);
    shape.angle = -FRAC_PI_2;
    painter.add(shape);
}

/// Title, axis ticks and axis labels around the heat map.
pub fn plot_axes_ui_system(mut contexts: EguiContexts, plot: Res<PlotFrame>) {
    let ctx = contexts.ctx_mut();
    let painter = plot_painter(ctx, "plot_axes");
    let rect = plot_rect(ctx, &plot);
    let tick_font = FontId::proportional(12.0);
    let stroke = Stroke::new(1.0, TEXT_COLOR);

    painter.text(
        Pos2::new(rect.center().x, rect.top() - 14.0),
        Align2::CENTER_BOTTOM,
        PLOT_TITLE,
        FontId::proportional(17.0),
        TEXT_COLOR,
    );

    for tick in plot.ticks() {
        let t = inverse_lerp(-plot.half_width, plot.half_width, tick) as f32;
        let label = fixed(tick, 3);

        let x = rect.left() + t * rect.width();
        painter.line_segment(
            [Pos2::new(x, rect.bottom()), Pos2::new(x, rect.bottom() + TICK_LENGTH)],
            stroke,
        );
        painter.text(
            Pos2::new(x, rect.bottom() + TICK_LENGTH + 2.0),
            Align2::CENTER_TOP,
            &label,
            tick_font.clone(),
            TEXT_COLOR,
        );

        let y = rect.bottom() - t * rect.height();
        painter.line_segment(
            [Pos2::new(rect.left() - TICK_LENGTH, y), Pos2::new(rect.left(), y)],
            stroke,
        );
        painter.text(
            Pos2::new(rect.left() - TICK_LENGTH - 3.0, y),
            Align2::RIGHT_CENTER,
            &label,
            tick_font.clone(),
            TEXT_COLOR,
        );
    }

    painter.text(
        Pos2::new(rect.center().x, rect.bottom() + 30.0),
        Align2::CENTER_TOP,
        X_AXIS_LABEL,
        FontId::proportional(14.0),
        TEXT_COLOR,
    );
    vertical_text(
        &painter,
        rect.left() - 80.0,
        rect.center().y,
        Y_AXIS_LABEL,
        FontId::proportional(14.0),
    );
}

/// Color bar values, evenly spaced from the minimum to the maximum.
pub fn colorbar_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => (0..count)
            .map(|i| min + (max - min) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}

/// Right-hand panel with the banded color scale of the frame on screen.
pub fn colorbar_ui_system(
    mut contexts: EguiContexts,
    plot: Res<PlotFrame>,
    params: Res<SphereParameters>,
    field: Option<Res<CurrentField>>,
) {
    let ctx = contexts.ctx_mut();
    let rect = plot_rect(ctx, &plot);
    egui::SidePanel::right("colorbar")
        .exact_width(COLORBAR_PANEL_PX)
        .resizable(false)
        .show_separator_line(false)
        .frame(egui::Frame::none().fill(Color32::WHITE))
        .show(ctx, |ui| {
            let Some(field) = field else {
                return;
            };
            let painter = ui.painter();
            let panel = ui.max_rect();
            let bar = Rect::from_min_max(
                Pos2::new(panel.left() + 16.0, rect.top()),
                Pos2::new(panel.left() + 16.0 + COLORBAR_WIDTH, rect.bottom()),
            );
            let levels = &field.levels;
            let band_height = bar.height() / levels.count() as f32;
            for band in 0..levels.count() {
                let bottom = bar.bottom() - band as f32 * band_height;
                painter.rect_filled(
                    Rect::from_min_max(
                        Pos2::new(bar.left(), bottom - band_height),
                        Pos2::new(bar.right(), bottom),
                    ),
                    Rounding::ZERO,
                    params.colormap.color32(levels.band_fraction(band)),
                );
            }
            painter.rect_stroke(bar, Rounding::ZERO, Stroke::new(1.0, TEXT_COLOR));

            for value in colorbar_ticks(levels.min(), levels.max(), COLORBAR_TICKS) {
                let t = inverse_lerp(levels.min(), levels.max(), value) as f32;
                let y = bar.bottom() - t * bar.height();
                painter.line_segment(
                    [Pos2::new(bar.right(), y), Pos2::new(bar.right() + TICK_LENGTH, y)],
                    Stroke::new(1.0, TEXT_COLOR),
                );
                painter.text(
                    Pos2::new(bar.right() + TICK_LENGTH + 3.0, y),
                    Align2::LEFT_CENTER,
                    scientific(value, 2),
                    FontId::proportional(12.0),
                    TEXT_COLOR,
                );
            }
            vertical_text(
                painter,
                panel.right() - 40.0,
                bar.center().y,
                COLORBAR_LABEL,
                FontId::proportional(14.0),
            );
        });
}

/// Probe annotation in a half-transparent white box.
pub fn probe_readout_ui_system(
    mut contexts: EguiContexts,
    plot: Res<PlotFrame>,
    readout: Res<ProbeReadout>,
) {
    let ctx = contexts.ctx_mut();
    let painter = plot_painter(ctx, "probe_readout");
    let screen = ctx.screen_rect().size();
    let anchor = plot.world_to_screen(READOUT_ANCHOR, Vec2::new(screen.x, screen.y));

    let galley = painter.layout_no_wrap(readout.0.label(), FontId::proportional(14.0), TEXT_COLOR);
    let min = Pos2::new(anchor.x, anchor.y - galley.size().y);
    let text_rect = Rect::from_min_size(min, galley.size());
    painter.rect_filled(
        text_rect.expand(4.0),
        Rounding::same(3.0),
        Color32::from_rgba_unmultiplied(255, 255, 255, 128),
    );
    painter.galley(min, galley, TEXT_COLOR);
}

fn probe_region(reading: &ProbeReading) -> &'static str {
    if reading.inside_sphere {
        "Probe inside the sphere (E grows with r)"
    } else {
        "Probe outside the sphere (E falls with 1/r²)"
    }
}

/// Pause, step, reset and display toggles for the animation.
#[allow(clippy::too_many_arguments)]
pub fn playback_controls_ui_system(
    mut contexts: EguiContexts,
    state: Res<State<PlaybackState>>,
    animation: Res<SphereAnimation>,
    trace: Res<ProbeTrace>,
    readout: Res<ProbeReadout>,
    mut requests: ResMut<PlaybackRequests>,
    mut params: ResMut<SphereParameters>,
) {
    let current = *state.get();
    egui::Window::new("Playback")
        .anchor(Align2::LEFT_BOTTOM, [8.0, -8.0])
        .default_open(false)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(format!(
                "Frame {} / {}",
                animation.frame + 1,
                params.frame_count
            ));
            ui.label(format!("R = {} m", fixed(animation.sphere.radius, 4)));
            ui.label(format!("Q = {} C", scientific(animation.sphere.charge, 3)));
            ui.label(probe_region(&readout.0)); // wechselt, sobald R die Sonde überstreicht

            ui.horizontal(|ui| {
                let pause_label = match current {
                    PlaybackState::Running => "⏸ Pause",
                    PlaybackState::Paused | PlaybackState::Finished => "▶ Play",
                };
                if ui
                    .add_enabled(current != PlaybackState::Finished, egui::Button::new(pause_label))
                    .clicked()
                {
                    requests.toggle_pause = true;
                }
                if ui
                    .add_enabled(current == PlaybackState::Paused, egui::Button::new("Step ▶"))
                    .clicked()
                {
                    requests.single_step = true;
                }
                if ui.button("↺ Reset").clicked() {
                    requests.reset = true;
                }
            });

            ui.separator();

            // write back only on change so the redraw is not retriggered every frame
            let mut looping = params.playback_mode == PlaybackMode::Loop;
            if ui.checkbox(&mut looping, "Loop").changed() {
                params.playback_mode = if looping {
                    PlaybackMode::Loop
                } else {
                    PlaybackMode::Once
                };
            }
            ui.horizontal(|ui| {
                for map in [Colormap::Inferno, Colormap::Viridis] {
                    let selected = params.colormap == map;
                    if ui.selectable_label(selected, map.name()).clicked() && !selected {
                        params.colormap = map;
                    }
                }
            });
            let mut show_iso_lines = params.show_iso_lines;
            if ui.checkbox(&mut show_iso_lines, "Iso-lines").changed() {
                params.show_iso_lines = show_iso_lines;
            }
            let mut iso_line_count = params.iso_line_count;
            if ui
                .add_enabled(
                    show_iso_lines,
                    Slider::new(&mut iso_line_count, 1..=30).text("lines"),
                )
                .changed()
            {
                params.iso_line_count = iso_line_count;
            }

            ui.collapsing("Probe trace", |ui| {
                ui.label(format!("{} readings", trace.len()));
                match trace.field_range() {
                    Some((lo, hi)) => {
                        ui.label(format!("min {} N/C", scientific(lo, 2)));
                        ui.label(format!("max {} N/C", scientific(hi, 2)));
                    }
                    None => {
                        ui.label("No readings yet.");
                    }
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_region_follows_sphere_edge() {
        use crate::physics::electrostatics::sphere::ChargedSphere;
        use crate::physics::sim::probe::ProbePoint;

        let sphere = ChargedSphere::new(0.05, 1e-9).unwrap();
        let near = ProbeReading::measure(&sphere, ProbePoint::new(0.01, 0.0), 8.854e-12, 0);
        let far = ProbeReading::measure(&sphere, ProbePoint::new(0.08, 0.0), 8.854e-12, 0);
        assert!(probe_region(&near).contains("inside"));
        assert!(probe_region(&far).contains("outside"));
    }

    #[test]
    fn test_colorbar_ticks_span_range() {
        let ticks = colorbar_ticks(0.0, 2500.0, 6);
        assert_eq!(ticks, vec![0.0, 500.0, 1000.0, 1500.0, 2000.0, 2500.0]);
        assert_eq!(colorbar_ticks(3.0, 9.0, 1), vec![3.0]);
        assert!(colorbar_ticks(3.0, 9.0, 0).is_empty());
    }

    #[test]
    fn test_colorbar_tick_labels() {
        let labels: Vec<String> = colorbar_ticks(0.0, 2500.0, 3)
            .into_iter()
            .map(|v| scientific(v, 2))
            .collect();
        assert_eq!(labels, vec!["0.00e+00", "1.25e+03", "2.50e+03"]);
    }
}
