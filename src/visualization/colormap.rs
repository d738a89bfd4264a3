// src/visualization/colormap.rs

use bevy::prelude::*;
use egui::Color32;

type Rgb = (u8, u8, u8);

// Evenly spaced anchors of the perceptual maps, interpolated linearly in between.
const INFERNO: [Rgb; 9] = [
    (0, 0, 4),
    (31, 12, 72),
    (85, 15, 109),
    (136, 34, 106),
    (186, 54, 85),
    (227, 89, 51),
    (249, 140, 10),
    (249, 201, 50),
    (252, 255, 164),
];

const VIRIDIS: [Rgb; 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Black, red, yellow, white
    #[default]
    Inferno,
    /// Dark blue, teal, green, yellow
    Viridis,
}

impl Colormap {
    fn anchors(&self) -> &'static [Rgb] {
        match self {
            Colormap::Inferno => &INFERNO,
            Colormap::Viridis => &VIRIDIS,
        }
    }

    /// Opaque RGBA for `t` in `[0, 1]`; values outside are clamped, NaN maps to 0.
    pub fn sample_rgba(&self, t: f64) -> [u8; 4] {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (anchors.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(anchors.len() - 2);
        let f = scaled - i as f64;
        let (a, b) = (anchors[i], anchors[i + 1]);
        let mix = |lo: u8, hi: u8| (lo as f64 + (hi as f64 - lo as f64) * f).round() as u8;
        [mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2), u8::MAX]
    }

    pub fn color32(&self, t: f64) -> Color32 {
        let [r, g, b, a] = self.sample_rgba(t);
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Inferno => "inferno",
            Colormap::Viridis => "viridis",
        }
    }
}
