//! Star pass: discs, glow halos, diffraction spikes and hover ignition.

use glam::Vec2;

use crate::components::{ConstellationLine, Star};
use crate::renderer::{DrawList, Projected};

use super::hover::hover_intensity;

/// Glow halo around a bright star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarGlow {
    pub radius: f32,
    pub alpha: f32,
}

/// Cross-shaped spikes on the brightest stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpikes {
    /// Half-length of each arm.
    pub length: f32,
    pub alpha: f32,
}

/// Width of each spike stroke.
pub const SPIKE_WIDTH: f32 = 0.8;

/// How one star looks this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarAppearance {
    pub radius: f32,
    pub alpha: f32,
    pub glow: Option<StarGlow>,
    pub spikes: Option<StarSpikes>,
}

/// Size, opacity and extras from magnitude, twinkle and depth alpha.
pub fn star_appearance(magnitude: f32, twinkle: f32, depth_alpha: f32) -> StarAppearance {
    let radius = ((4.2 - magnitude * 0.55) * twinkle * depth_alpha).max(0.35);
    let alpha = (((7.5 - magnitude) / 7.5).max(0.08) * depth_alpha).min(1.0);

    let bright = magnitude < 2.0;
    let glow = (magnitude < 4.0 && depth_alpha > 0.15).then(|| {
        if bright {
            StarGlow { radius: radius * 7.0, alpha: alpha * 0.55 }
        } else {
            StarGlow { radius: radius * 4.5, alpha: alpha * 0.28 }
        }
    });
    let spikes = (glow.is_some() && bright && depth_alpha > 0.4).then(|| StarSpikes {
        length: radius * 9.0,
        alpha: alpha * 0.18,
    });

    StarAppearance { radius, alpha, glow, spikes }
}

/// Draw every visible star. `projected[i]` belongs to `stars[i]`.
pub fn draw_stars(stars: &[Star], projected: &[Projected], list: &mut DrawList) {
    for (star, p) in stars.iter().zip(projected) {
        if !p.visible {
            continue;
        }
        let look = star_appearance(star.magnitude, star.twinkle(), p.alpha);
        list.fill_circle(p.pos, look.radius, star.color.with_alpha(look.alpha));

        if let Some(glow) = look.glow {
            list.glow_disc(p.pos, glow.radius, star.color.with_alpha(glow.alpha), star.color);
        }
        if let Some(spikes) = look.spikes {
            let color = star.color.with_alpha(spikes.alpha);
            let dx = Vec2::new(spikes.length, 0.0);
            let dy = Vec2::new(0.0, spikes.length);
            list.line(p.pos - dx, p.pos + dx, color, SPIKE_WIDTH);
            list.line(p.pos - dy, p.pos + dy, color, SPIKE_WIDTH);
        }
    }
}

/// Boosted glow on the real stars under a hovered constellation's nodes.
pub fn draw_ignition(
    constellations: &[ConstellationLine],
    stars: &[Star],
    projected: &[Projected],
    list: &mut DrawList,
) {
    for con in constellations {
        let h = hover_intensity(con);
        if h <= 0.02 {
            continue;
        }
        for &idx in &con.ignited_stars {
            let (Some(star), Some(p)) = (stars.get(idx), projected.get(idx)) else {
                continue;
            };
            if !p.visible || p.alpha <= 0.0 {
                continue;
            }
            let look = star_appearance(star.magnitude, star.twinkle(), p.alpha);
            let radius = look.radius.max(1.0) * (6.0 + 8.0 * h);
            let alpha = (0.25 + 0.45 * h) * p.alpha;
            list.glow_disc(p.pos, radius, star.color.with_alpha(alpha), star.color);
            let core = star.color.with_alpha(look.alpha.max(h * p.alpha));
            list.fill_circle(p.pos, look.radius * (1.0 + 0.6 * h), core);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rgb;
    use crate::components::SkyPoint;
    use crate::renderer::DrawCommand;

    #[test]
    fn sirius_gets_top_tier() {
        let look = star_appearance(-1.46, 1.0, 1.0);
        assert!((look.radius - (4.2 + 1.46 * 0.55)).abs() < 1e-5);
        assert_eq!(look.alpha, 1.0);
        let glow = look.glow.unwrap();
        assert!((glow.radius - look.radius * 7.0).abs() < 1e-5);
        assert!((glow.alpha - 0.55).abs() < 1e-6);
        let spikes = look.spikes.unwrap();
        assert!((spikes.length - look.radius * 9.0).abs() < 1e-5);
    }

    #[test]
    fn limiting_magnitude_is_plain() {
        let look = star_appearance(6.0, 1.0, 1.0);
        assert!((look.radius - 0.9).abs() < 1e-5);
        assert!((look.alpha - 0.2).abs() < 1e-6);
        assert!(look.glow.is_none());
        assert!(look.spikes.is_none());
    }

    #[test]
    fn mid_magnitude_gets_small_glow_only() {
        let look = star_appearance(3.0, 1.0, 1.0);
        let glow = look.glow.unwrap();
        assert!((glow.radius - look.radius * 4.5).abs() < 1e-5);
        assert!(look.spikes.is_none());
    }

    #[test]
    fn floors_apply_near_limb() {
        let look = star_appearance(7.0, 0.76, 0.01);
        assert_eq!(look.radius, 0.35);
        assert!((look.alpha - 0.08 * 0.01).abs() < 1e-7);
        assert!(look.glow.is_none());
    }

    #[test]
    fn spikes_need_depth() {
        let look = star_appearance(0.0, 1.0, 0.3);
        assert!(look.glow.is_some());
        assert!(look.spikes.is_none());
    }

    #[test]
    fn draw_skips_hidden_and_emits_spikes() {
        let star = Star::new(SkyPoint::from_ra_dec(90.0, 0.0), -1.46, 0.0, Rgb::WHITE);
        let visible = Projected { pos: Vec2::new(10.0, 10.0), depth: 1.0, visible: true, alpha: 1.0 };
        let mut list = DrawList::new();
        draw_stars(&[star.clone(), star], &[visible, Projected::HIDDEN], &mut list);
        let lines = list
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 2);
        // disc + glow + two spikes, nothing for the hidden star
        assert_eq!(list.len(), 4);
    }
}
