//! Constellation labels. Hidden while the globe is zoomed out, then faded in
//! with the projection scale. Hovered labels are drawn after (above) idle ones.

use glam::Vec2;

use crate::api::config::{LabelText, SkyConfig};
use crate::api::types::{Rgb, Rgba};
use crate::components::ConstellationLine;
use crate::renderer::{DrawCommand, DrawList, Font, Glow, Projected, TextAlign, TextBaseline};

use super::hover::hover_intensity;

const IDLE_FILL: Rgb = Rgb::new(180, 205, 255);
const IDLE_GLOW: Rgb = Rgb::new(100, 150, 255);
/// Anchors dimmer than this are skipped.
const MIN_ANCHOR_ALPHA: f32 = 0.08;
/// Hover progress above which a label counts as hovered.
const HOVER_THRESHOLD: f32 = 0.02;
/// Labels sit this many pixels above their anchor.
const LIFT: f32 = 7.0;

/// Fade factor for labels at this projection scale; None while hidden.
pub fn label_opacity(scale: f32, config: &SkyConfig) -> Option<f32> {
    if scale <= config.label_scale_min {
        return None;
    }
    let span = config.label_scale_span.max(f32::EPSILON);
    Some(((scale - config.label_scale_min) / span).min(1.0))
}

/// Where a label goes: the projected anchor when visible, otherwise the
/// centroid of the visible vertices. None when nothing is visible.
pub fn label_anchor(anchor: Option<Projected>, vertices: &[Vec<Projected>]) -> Option<Projected> {
    if let Some(p) = anchor.filter(|p| p.visible) {
        return Some(p);
    }
    let (sum, alpha, n) = vertices
        .iter()
        .flatten()
        .filter(|p| p.visible)
        .fold((Vec2::ZERO, 0.0, 0u32), |(s, a, n), p| (s + p.pos, a + p.alpha, n + 1));
    (n > 0).then(|| Projected {
        pos: sum / n as f32,
        depth: 0.0,
        visible: true,
        alpha: alpha / n as f32,
    })
}

fn label_command(text: &str, pos: Vec2, fill: Rgba, glow: Glow) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_string(),
        pos: pos - Vec2::new(0.0, LIFT),
        font: Font::label(),
        align: TextAlign::Center,
        baseline: TextBaseline::Bottom,
        fill: Some(fill),
        stroke: None,
        glow: Some(glow),
    }
}

/// Draw idle labels, then hovered labels on top.
/// `anchors[i]` is the projected label anchor of constellation `i`.
pub fn draw_labels(
    constellations: &[ConstellationLine],
    anchors: &[Option<Projected>],
    projected: &[Vec<Vec<Projected>>],
    scale: f32,
    mode: LabelText,
    config: &SkyConfig,
    list: &mut DrawList,
) {
    let Some(fade) = label_opacity(scale, config) else {
        return;
    };

    let placed: Vec<Option<Projected>> = constellations
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let anchor = anchors.get(i).copied().flatten();
            let vertices = projected.get(i).map(Vec::as_slice).unwrap_or(&[]);
            label_anchor(anchor, vertices).filter(|p| p.alpha >= MIN_ANCHOR_ALPHA)
        })
        .collect();

    for (con, at) in constellations.iter().zip(&placed) {
        let Some(at) = at else { continue };
        if con.hover > HOVER_THRESHOLD {
            continue;
        }
        let fa = (at.alpha * 1.6).min(1.0) * fade;
        let glow = Glow { color: IDLE_GLOW.with_alpha(fa * 0.5), blur: 8.0 };
        list.push(label_command(con.label_text(mode), at.pos, IDLE_FILL.with_alpha(fa * 0.48), glow));
    }

    for (con, at) in constellations.iter().zip(&placed) {
        let Some(at) = at else { continue };
        if con.hover <= HOVER_THRESHOLD {
            continue;
        }
        let h = hover_intensity(con);
        let fa = (at.alpha * 1.6).min(1.0) * fade * h;
        let label = con.colors.label;
        let glow = Glow { color: con.colors.node.with_alpha(fa * 0.95), blur: 16.0 };
        list.push(label_command(con.label_text(mode), at.pos, label.with_alpha(fa), glow));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ConstellationColors, SkyPoint};

    fn vis(x: f32, y: f32, alpha: f32) -> Projected {
        Projected { pos: Vec2::new(x, y), depth: alpha, visible: true, alpha }
    }

    #[test]
    fn threshold_and_fade() {
        let cfg = SkyConfig::default();
        assert_eq!(label_opacity(0.28, &cfg), None);
        assert_eq!(label_opacity(0.5, &cfg), None);
        assert!((label_opacity(0.675, &cfg).unwrap() - 0.5).abs() < 1e-5);
        assert_eq!(label_opacity(0.95, &cfg), Some(1.0));
    }

    #[test]
    fn anchor_falls_back_to_centroid() {
        let verts = vec![vec![vis(0.0, 0.0, 0.2), Projected::HIDDEN, vis(10.0, 20.0, 0.6)]];
        let hidden_anchor = Some(Projected::HIDDEN);
        let p = label_anchor(hidden_anchor, &verts).unwrap();
        assert_eq!(p.pos, Vec2::new(5.0, 10.0));
        assert!((p.alpha - 0.4).abs() < 1e-6);

        let explicit = vis(100.0, 100.0, 0.9);
        assert_eq!(label_anchor(Some(explicit), &verts), Some(explicit));
    }

    #[test]
    fn no_visible_points_no_label() {
        assert_eq!(label_anchor(None, &[vec![Projected::HIDDEN]]), None);
    }

    #[test]
    fn hovered_labels_drawn_last_in_their_color() {
        let cfg = SkyConfig::default();
        let p = SkyPoint::from_ra_dec(90.0, 0.0);
        let mut hovered = ConstellationLine::new("Ori", vec![vec![p]]);
        hovered.hover = 1.0;
        hovered.colors = ConstellationColors::from_node(Rgb::new(200, 120, 80));
        let idle = ConstellationLine::new("Lyr", vec![vec![p]]);
        let cons = vec![hovered, idle];
        let projected = vec![vec![vec![vis(10.0, 10.0, 1.0)]], vec![vec![vis(50.0, 50.0, 1.0)]]];
        let mut list = DrawList::new();
        draw_labels(&cons, &[None, None], &projected, 0.95, LabelText::Id, &cfg, &mut list);

        let texts: Vec<(&str, Rgb)> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, fill: Some(fill), .. } => Some((text.as_str(), fill.rgb)),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![("Lyr", IDLE_FILL), ("Ori", cons[0].colors.label)]);
    }

    #[test]
    fn nothing_when_zoomed_out() {
        let cfg = SkyConfig::default();
        let cons = vec![ConstellationLine::new("Ori", vec![])];
        let mut list = DrawList::new();
        draw_labels(&cons, &[Some(vis(0.0, 0.0, 1.0))], &[vec![]], 0.4, LabelText::Id, &cfg, &mut list);
        assert!(list.is_empty());
    }
}
