//! Constellation hover picking and progress.
//!
//! The hovered constellation is the owner of the single visible vertex
//! nearest the pointer, provided it lies within the hover radius. Vertices
//! are scanned in catalog order with a strict `<`, so on an exact tie the
//! first constellation scanned keeps the hover.

use glam::Vec2;

use crate::api::config::SkyConfig;
use crate::components::ConstellationLine;
use crate::extensions::Easing;
use crate::renderer::Projected;

/// Index of the hovered constellation, if any.
/// `projected[c][s][v]` is vertex `v` of segment `s` of constellation `c`.
pub fn find_hovered(projected: &[Vec<Vec<Projected>>], pointer_px: Vec2, radius: f32) -> Option<usize> {
    let mut nearest = f32::INFINITY;
    let mut hovered = None;
    for (idx, segments) in projected.iter().enumerate() {
        for p in segments.iter().flatten().filter(|p| p.visible) {
            let d = p.pos.distance(pointer_px);
            if d < nearest {
                nearest = d;
                hovered = if d < radius { Some(idx) } else { None };
            }
        }
    }
    hovered
}

/// Advance hover progress and pulse phase by `steps` fixed steps.
pub fn advance_hover(
    constellations: &mut [ConstellationLine],
    hovered: Option<usize>,
    steps: u32,
    config: &SkyConfig,
) {
    for (idx, con) in constellations.iter_mut().enumerate() {
        let active = hovered == Some(idx);
        for _ in 0..steps {
            let delta = if active { config.hover_rise } else { -config.hover_fall };
            con.hover = (con.hover + delta).clamp(0.0, 1.0);
            if active || con.hover > 0.0 {
                con.pulse_phase += config.pulse_speed;
            }
        }
    }
}

/// Eased hover intensity used by every hover visual.
#[inline]
pub fn hover_intensity(con: &ConstellationLine) -> f32 {
    Easing::CubicOut.apply(con.hover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SkyPoint;

    fn vis(x: f32, y: f32) -> Projected {
        Projected {
            pos: Vec2::new(x, y),
            depth: 1.0,
            visible: true,
            alpha: 1.0,
        }
    }

    fn hidden(x: f32, y: f32) -> Projected {
        Projected {
            visible: false,
            ..vis(x, y)
        }
    }

    #[test]
    fn nearest_visible_vertex_wins() {
        let projected = vec![
            vec![vec![vis(150.0, 100.0)]],
            vec![vec![hidden(100.0, 100.0), vis(130.0, 100.0)]],
        ];
        assert_eq!(find_hovered(&projected, Vec2::new(100.0, 100.0), 90.0), Some(1));
    }

    #[test]
    fn outside_radius_is_none() {
        let projected = vec![vec![vec![vis(300.0, 300.0)]]];
        assert_eq!(find_hovered(&projected, Vec2::ZERO, 90.0), None);
    }

    #[test]
    fn tie_keeps_first_in_catalog_order() {
        let projected = vec![vec![vec![vis(10.0, 0.0)]], vec![vec![vis(-10.0, 0.0)]]];
        assert_eq!(find_hovered(&projected, Vec2::ZERO, 90.0), Some(0));
    }

    #[test]
    fn radius_is_exclusive() {
        let projected = vec![vec![vec![vis(90.0, 0.0)]]];
        assert_eq!(find_hovered(&projected, Vec2::ZERO, 90.0), None);
        let projected = vec![vec![vec![vis(89.5, 0.0)]]];
        assert_eq!(find_hovered(&projected, Vec2::ZERO, 90.0), Some(0));
    }

    #[test]
    fn progress_stays_in_bounds() {
        let cfg = SkyConfig::default();
        let p = SkyPoint::from_ra_dec(0.0, 0.0);
        let mut cons = vec![
            ConstellationLine::new("A", vec![vec![p]]),
            ConstellationLine::new("B", vec![vec![p]]),
        ];
        for frame in 0..300 {
            let hovered = if (frame / 40) % 2 == 0 { Some(0) } else { Some(1) };
            advance_hover(&mut cons, hovered, 1 + frame % 3, &cfg);
            for c in &cons {
                assert!((0.0..=1.0).contains(&c.hover));
            }
        }
    }

    #[test]
    fn rise_and_fall_rates() {
        let cfg = SkyConfig::default();
        let mut cons = vec![ConstellationLine::new("A", vec![])];
        advance_hover(&mut cons, Some(0), 1, &cfg);
        assert!((cons[0].hover - 0.06).abs() < 1e-6);
        assert!((cons[0].pulse_phase - 0.07).abs() < 1e-6);
        advance_hover(&mut cons, None, 1, &cfg);
        assert!((cons[0].hover - 0.025).abs() < 1e-6);
        advance_hover(&mut cons, None, 1, &cfg);
        assert_eq!(cons[0].hover, 0.0);
        let phase = cons[0].pulse_phase;
        advance_hover(&mut cons, None, 5, &cfg);
        assert_eq!(cons[0].pulse_phase, phase);
    }
}
