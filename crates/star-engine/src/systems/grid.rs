//! Faint grid pushed away from a lagging pointer.

use glam::Vec2;

use crate::api::config::GridConfig;
use crate::api::types::Viewport;
use crate::renderer::{DrawList, Stroke};

/// Pointer position that trails the real one, normalized like the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOverlay {
    lagged: Vec2,
}

impl GridOverlay {
    pub fn new() -> Self {
        Self {
            lagged: Vec2::splat(0.5),
        }
    }

    /// One fixed step toward the real pointer.
    pub fn step(&mut self, pointer: Vec2, lag: f32) {
        self.lagged += (pointer - self.lagged) * lag;
    }

    pub fn lagged(&self) -> Vec2 {
        self.lagged
    }

    /// Stroke every grid row, then every column.
    pub fn draw(&self, viewport: Viewport, config: &GridConfig, list: &mut DrawList) {
        if config.cell <= 0.0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        let center = self.lagged * viewport.size();
        let cols = (viewport.width / config.cell).ceil() as usize + 1;
        let rows = (viewport.height / config.cell).ceil() as usize + 1;
        let stroke = Stroke {
            color: config.color.with_alpha(config.alpha),
            width: 1.0,
        };
        let warp = |c: usize, r: usize| {
            warp_vertex(Vec2::new(c as f32, r as f32) * config.cell, center, config)
        };

        for r in 0..rows {
            list.polyline((0..cols).map(|c| warp(c, r)).collect(), stroke, None);
        }
        for c in 0..cols {
            list.polyline((0..rows).map(|r| warp(c, r)).collect(), stroke, None);
        }
    }
}

impl Default for GridOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Push a grid vertex radially away from `center`, strongest at the centre
/// and zero at the configured radius.
pub fn warp_vertex(vertex: Vec2, center: Vec2, config: &GridConfig) -> Vec2 {
    let delta = vertex - center;
    let d = delta.length();
    if d > 0.0 && d < config.radius {
        let push = (1.0 - d / config.radius) * config.push;
        vertex + delta / d * push
    } else {
        vertex
    }
}
