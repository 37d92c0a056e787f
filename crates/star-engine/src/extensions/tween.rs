// extensions/tween.rs
//
// One-shot scalar tween driven by frame deltas. Used for the globe zoom and
// the overlay fade.
//
// Usage:
//   let mut zoom = Tween::new(0.28, 0.95, 2.2, Easing::CubicInOut);
//   let scale = zoom.advance(dt);

use super::easing::{ease, Easing};

/// A scalar animated from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the new value.
    /// Negative or non-finite deltas don't move the tween.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration.max(0.0));
        }
        self.value()
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        ease(self.from, self.to, self.progress(), self.easing)
    }

    /// Linear progress (0.0 to 1.0).
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Eased progress (0.0 to 1.0).
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}
