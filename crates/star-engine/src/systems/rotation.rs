use glam::Vec2;

use crate::api::config::SkyConfig;

/// Sphere orientation. Angles accumulate forever; velocity is smoothed
/// toward a pointer-derived target, never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    /// Rotation about X (x) and Y (y), radians.
    pub angle: Vec2,
    pub velocity: Vec2,
}

impl RotationState {
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            angle: Vec2::from(config.initial_rotation),
            velocity: Vec2::ZERO,
        }
    }

    /// One fixed step. `offset` is the pointer offset from the viewport
    /// centre in normalized units.
    pub fn step(&mut self, offset: Vec2, config: &SkyConfig) {
        let magnitude = offset.length();
        let (target, smoothing) = if magnitude > config.steer_deadzone {
            // Vertical pointer offset tilts about X, horizontal spins about Y
            (
                Vec2::new(offset.y, offset.x) / magnitude * config.steer_speed,
                config.steer_smoothing,
            )
        } else {
            (Vec2::from(config.idle_drift), config.idle_smoothing)
        };
        self.velocity += (target - self.velocity) * smoothing;
        self.angle += self.velocity;
    }
}
