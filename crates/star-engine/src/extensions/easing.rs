// extensions/easing.rs
//
// Pure easing curves and interpolation helpers used by the intro timeline,
// hover visuals and the zoom.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Fast start, slow end.
    CubicOut,
    /// Slow start and end.
    CubicInOut,
}

impl Easing {
    /// Apply the easing curve to `t`, clamped to [0, 1] first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Progress of `t` through the window starting at `start` lasting `duration`,
/// clamped to [0, 1]. A zero-length window is complete once reached.
#[inline]
pub fn window(t: f32, start: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if t >= start { 1.0 } else { 0.0 };
    }
    ((t - start) / duration).clamp(0.0, 1.0)
}
