use std::f32::consts::TAU;

use crate::api::types::Rgb;
use crate::core::rng::Rng;

use super::sky_point::SkyPoint;

/// B-V index assumed when the catalog has none (a sun-like star).
pub const DEFAULT_COLOR_INDEX: f32 = 0.6;

/// One catalog star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: SkyPoint,
    /// Visual magnitude; lower is brighter.
    pub magnitude: f32,
    /// B-V color index.
    pub color_index: f32,
    pub color: Rgb,
    /// Twinkle phase in radians. Advances every step, never wraps.
    pub twinkle_phase: f32,
    /// Phase advance per step.
    pub twinkle_speed: f32,
}

impl Star {
    pub fn new(position: SkyPoint, magnitude: f32, color_index: f32, color: Rgb) -> Self {
        Self {
            position,
            magnitude,
            color_index,
            color,
            twinkle_phase: 0.0,
            twinkle_speed: 0.0,
        }
    }

    /// Random starting phase in [0, 2π) and speed in [0.008, 0.022).
    pub fn with_random_twinkle(mut self, rng: &mut Rng) -> Self {
        self.twinkle_phase = rng.range(0.0, TAU);
        self.twinkle_speed = rng.range(0.008, 0.022);
        self
    }

    pub fn advance_twinkle(&mut self) {
        self.twinkle_phase += self.twinkle_speed;
    }

    /// Brightness multiplier in [0.76, 1.0].
    pub fn twinkle(&self) -> f32 {
        0.88 + 0.12 * self.twinkle_phase.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_twinkle_ranges() {
        let mut rng = Rng::new(3);
        for _ in 0..200 {
            let s = Star::new(SkyPoint::from_ra_dec(0.0, 0.0), 1.0, 0.6, Rgb::WHITE)
                .with_random_twinkle(&mut rng);
            assert!((0.0..TAU).contains(&s.twinkle_phase));
            assert!((0.008..0.022).contains(&s.twinkle_speed));
        }
    }

    #[test]
    fn phase_is_monotonic() {
        let mut s = Star::new(SkyPoint::from_ra_dec(0.0, 0.0), 1.0, 0.6, Rgb::WHITE);
        s.twinkle_speed = 0.01;
        let mut last = s.twinkle_phase;
        for _ in 0..1000 {
            s.advance_twinkle();
            assert!(s.twinkle_phase > last);
            last = s.twinkle_phase;
        }
    }

    #[test]
    fn twinkle_bounds() {
        let mut s = Star::new(SkyPoint::from_ra_dec(0.0, 0.0), 1.0, 0.6, Rgb::WHITE);
        for i in 0..64 {
            s.twinkle_phase = i as f32 * 0.1;
            let tw = s.twinkle();
            assert!((0.76 - 1e-6..=1.0 + 1e-6).contains(&tw));
        }
    }
}
