// src/math/marching_squares.rs

use crate::math::scalar_field::ScalarField2D;
use crate::math::utils::constants;
use bevy::math::DVec2;

/// One straight piece of an iso-line, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoSegment {
    pub start: DVec2,
    pub end: DVec2,
}

/// Cell edges, counter-clockwise from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

/// Walks every lattice cell of a `ScalarField2D` and yields the iso-line segments
/// at `threshold`.
///
/// Corner bits: 1 bottom-left, 2 bottom-right, 4 top-right, 8 top-left, where
/// "bottom" is the lower row index. Saddle cells (5, 10) are split using the
/// average of the four corners.
pub struct MarchingSquaresIterator<'a, F: ScalarField2D + ?Sized> {
    field: &'a F,
    threshold: f64,
    current_x: usize,
    current_y: usize,
    pending: Vec<IsoSegment>,
}

impl<'a, F: ScalarField2D + ?Sized> MarchingSquaresIterator<'a, F> {
    pub fn new(field: &'a F, threshold: f64) -> Self {
        Self {
            field,
            threshold,
            current_x: 0,
            current_y: 0,
            pending: Vec::with_capacity(2),
        }
    }

    fn corners(&self, x: usize, y: usize) -> [f64; 4] {
        [
            self.field.get_value(x, y),
            self.field.get_value(x + 1, y),
            self.field.get_value(x + 1, y + 1),
            self.field.get_value(x, y + 1),
        ]
    }

    fn cell_configuration(&self, values: &[f64; 4]) -> usize {
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v >= self.threshold)
            .fold(0, |acc, (bit, _)| acc | (1 << bit))
    }

    fn edge_pairs(&self, config: usize, values: &[f64; 4]) -> &'static [(Edge, Edge)] {
        use Edge::*;
        let center_above = values.iter().sum::<f64>() * 0.25 >= self.threshold;
        match config {
            1 | 14 => &[(Left, Bottom)],
            2 | 13 => &[(Bottom, Right)],
            3 | 12 => &[(Left, Right)],
            4 | 11 => &[(Right, Top)],
            6 | 9 => &[(Bottom, Top)],
            7 | 8 => &[(Left, Top)],
            5 if center_above => &[(Left, Top), (Bottom, Right)],
            5 => &[(Left, Bottom), (Right, Top)],
            10 if center_above => &[(Left, Bottom), (Right, Top)],
            10 => &[(Bottom, Right), (Left, Top)],
            _ => &[],
        }
    }

    fn interpolate(&self, v1: f64, v2: f64, p1: DVec2, p2: DVec2) -> DVec2 {
        if (v1 - v2).abs() < constants::EPSILON {
            return (p1 + p2) * 0.5;
        }
        let t = ((self.threshold - v1) / (v2 - v1)).clamp(0.0, 1.0);
        p1.lerp(p2, t)
    }

    fn edge_point(&self, edge: Edge, x: usize, y: usize, values: &[f64; 4]) -> DVec2 {
        let bl = self.field.node_to_world(x, y);
        let br = self.field.node_to_world(x + 1, y);
        let tr = self.field.node_to_world(x + 1, y + 1);
        let tl = self.field.node_to_world(x, y + 1);
        let [v_bl, v_br, v_tr, v_tl] = *values;
        match edge {
            Edge::Bottom => self.interpolate(v_bl, v_br, bl, br),
            Edge::Right => self.interpolate(v_br, v_tr, br, tr),
            Edge::Top => self.interpolate(v_tl, v_tr, tl, tr),
            Edge::Left => self.interpolate(v_bl, v_tl, bl, tl),
        }
    }

    fn advance_cell(&mut self) -> Option<(usize, usize)> {
        let cells_x = self.field.width().saturating_sub(1);
        let cells_y = self.field.height().saturating_sub(1);
        if self.current_y >= cells_y || cells_x == 0 {
            return None;
        }
        let cell = (self.current_x, self.current_y);
        self.current_x += 1;
        if self.current_x >= cells_x {
            self.current_x = 0;
            self.current_y += 1;
        }
        Some(cell)
    }
}

impl<'a, F: ScalarField2D + ?Sized> Iterator for MarchingSquaresIterator<'a, F> {
    type Item = IsoSegment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(segment) = self.pending.pop() {
                return Some(segment);
            }
            let (x, y) = self.advance_cell()?;
            let values = self.corners(x, y);
            let config = self.cell_configuration(&values);
            for &(a, b) in self.edge_pairs(config, &values) {
                let segment = IsoSegment {
                    start: self.edge_point(a, x, y, &values),
                    end: self.edge_point(b, x, y, &values),
                };
                self.pending.push(segment);
            }
        }
    }
}

pub struct MarchingSquares;

impl MarchingSquares {
    pub fn extract_segments<F: ScalarField2D + ?Sized>(
        field: &F,
        threshold: f64,
    ) -> Vec<IsoSegment> {
        if field.width() <= 1 || field.height() <= 1 {
            return Vec::new();
        }
        MarchingSquaresIterator::new(field, threshold).collect()
    }
}
