use glam::Vec2;

use crate::api::types::Viewport;

/// Last known pointer position, normalized to [0, 1]² of the viewport.
/// Starts at the centre so the sky idles until the first move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    normalized: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            normalized: Vec2::splat(0.5),
        }
    }

    /// Record a move. Non-finite coordinates are ignored; others are clamped.
    pub fn set(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.normalized = Vec2::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
        }
    }

    pub fn normalized(&self) -> Vec2 {
        self.normalized
    }

    /// Offset from the viewport centre in normalized units.
    pub fn offset_from_center(&self) -> Vec2 {
        self.normalized - Vec2::splat(0.5)
    }

    pub fn to_pixels(&self, viewport: Viewport) -> Vec2 {
        self.normalized * viewport.size()
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}
