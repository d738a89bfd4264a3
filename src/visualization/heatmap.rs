// src/visualization/heatmap.rs

use crate::math::contour::ContourLevels;
use crate::math::marching_squares::{IsoSegment, MarchingSquares};
use crate::math::scalar_field::{FieldSamples, ScalarField2D};
use crate::physics::electrostatics::evaluate_on_grid;
use crate::physics::sim::animation::SphereAnimation;
use crate::physics::sim::resources::{DomainGrid, FrameAdvanced, SphereParameters};
use crate::visualization::colormap::Colormap;
use bevy::prelude::*;
use bevy_render::render_asset::RenderAssetUsages;
use bevy_render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_render::texture::ImageSampler;

/// Marks an entity that belongs to the filled-contour layer of the frame on screen.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContourLayer;

/// Tracks the contour entities currently on screen.
///
/// Starting a frame through [`ContourLayers::begin_frame`] despawns everything
/// the previous frame spawned, so at most one frame's layer is ever alive. The
/// despawned sprites drop their image handles, which frees the textures.
#[derive(Resource, Debug, Default)]
pub struct ContourLayers {
    live: Vec<Entity>,
}

/// Spawner for the layer of a single frame, handed out by `begin_frame`.
pub struct FrameLayer<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    live: &'a mut Vec<Entity>,
}

impl ContourLayers {
    pub fn begin_frame<'a, 'w, 's>(
        &'a mut self,
        commands: &'a mut Commands<'w, 's>,
    ) -> FrameLayer<'a, 'w, 's> {
        for entity in self.live.drain(..) {
            if let Some(entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn_recursive();
            }
        }
        FrameLayer {
            commands,
            live: &mut self.live,
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl FrameLayer<'_, '_, '_> {
    pub fn spawn(&mut self, bundle: impl Bundle) -> Entity {
        let entity = self
            .commands
            .spawn((bundle, ContourLayer))
            .id();
        self.live.push(entity);
        entity
    }
}

/// Field of the frame on screen, read by the color bar and the iso-line overlay.
#[derive(Resource, Debug, Clone)]
pub struct CurrentField {
    pub samples: FieldSamples,
    pub levels: ContourLevels,
    /// Empty unless iso-lines are switched on.
    pub iso_lines: Vec<IsoSegment>,
}

/// Rasterizes the banded field into an RGBA texture, one texel per sample.
pub fn field_image(samples: &FieldSamples, levels: &ContourLevels, colormap: Colormap) -> Image {
    let (width, height) = (samples.width(), samples.height());
    let mut data = Vec::with_capacity(width * height * 4);
    // texture rows run top-down, sample rows bottom-up
    for row in (0..height).rev() {
        for col in 0..width {
            let band = levels.band_index(samples.get_value(col, row));
            data.extend_from_slice(&colormap.sample_rgba(levels.band_fraction(band)));
        }
    }

    let mut image = Image::new(
        Extent3d {
            width: width as u32,
            height: height as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    // keep the band edges crisp
    image.sampler = ImageSampler::nearest();
    image
}

/// Boundary values at which `lines` iso-lines are drawn, spread evenly over the bands.
pub fn iso_line_values(levels: &ContourLevels, lines: usize) -> Vec<f64> {
    let count = levels.count();
    let lines = lines.min(count.saturating_sub(1));
    (1..=lines)
        .map(|k| levels.boundary(k * count / (lines + 1)))
        .collect()
}

pub fn iso_segments(samples: &FieldSamples, levels: &ContourLevels, lines: usize) -> Vec<IsoSegment> {
    iso_line_values(levels, lines)
        .into_iter()
        .flat_map(|value| MarchingSquares::extract_segments(samples, value))
        .collect()
}

/// Replaces the contour layer whenever a new frame is shown or the parameters change.
#[allow(clippy::too_many_arguments)]
pub fn redraw_contour_layer_system(
    mut commands: Commands,
    mut frames: EventReader<FrameAdvanced>,
    params: Res<SphereParameters>,
    grid: Res<DomainGrid>,
    animation: Res<SphereAnimation>,
    mut layers: ResMut<ContourLayers>,
    mut images: ResMut<Assets<Image>>,
) {
    let advanced = frames.read().count() > 0;
    if !advanced && !params.is_changed() {
        return;
    }

    let frame = animation.frame;
    let mut layer = layers.begin_frame(&mut commands);

    let samples = evaluate_on_grid(&grid.0, &animation.sphere, params.epsilon_0);
    let levels = match ContourLevels::uniform(samples.min(), samples.max(), params.contour_levels) {
        Ok(levels) => levels,
        Err(err) => {
            error!("Frame {frame} not drawn: {err}");
            // nothing on screen, so nothing for the color bar or iso-lines either
            commands.remove_resource::<CurrentField>();
            return;
        }
    };

    let texture = images.add(field_image(&samples, &levels, params.colormap));
    let side = 2.0 * grid.0.half_width() as f32;
    layer.spawn(SpriteBundle {
        texture,
        sprite: Sprite {
            custom_size: Some(Vec2::splat(side)),
            ..default()
        },
        ..default()
    });

    let iso_lines = if params.show_iso_lines {
        iso_segments(&samples, &levels, params.iso_line_count)
    } else {
        Vec::new()
    };
    debug!(
        "Frame {frame}: field range [{:.3e}, {:.3e}] N/C, {} iso segments",
        samples.min(),
        samples.max(),
        iso_lines.len()
    );
    commands.insert_resource(CurrentField {
        samples,
        levels,
        iso_lines,
    });
}
