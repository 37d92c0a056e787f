//! Constellation passes: idle strokes, hover glow strokes, node dots and
//! pulse blobs.

use glam::Vec2;

use crate::api::types::Rgb;
use crate::components::ConstellationLine;
use crate::renderer::{
    mean_visible_alpha, DrawCommand, DrawList, Glow, GradientStop, Projected, Projector, Stroke,
};

use super::hover::hover_intensity;

pub const IDLE_LINE: Rgb = Rgb::new(160, 190, 255);
pub const IDLE_LINE_ALPHA: f32 = 0.38;
pub const LINE_WIDTH: f32 = 0.9;

const NODE_COOL: Rgb = Rgb::new(215, 230, 255);
const NODE_WARM: Rgb = Rgb::new(100, 60, 255);
const NODE_HALO_EDGE: Rgb = Rgb::new(100, 130, 255);

/// Thin strokes for every figure.
pub fn draw_idle_lines(projected: &[Vec<Vec<Projected>>], projector: &Projector, list: &mut DrawList) {
    for segment in projected.iter().flatten() {
        if segment.len() < 2 {
            continue;
        }
        let alpha = mean_visible_alpha(segment) * IDLE_LINE_ALPHA;
        let stroke = Stroke { color: IDLE_LINE.with_alpha(alpha), width: LINE_WIDTH };
        for run in projector.visible_runs(segment) {
            list.polyline(run, stroke, None);
        }
    }
}

/// Thicker strokes in the constellation's own tint with a blurred shadow.
pub fn draw_glow_lines(
    constellations: &[ConstellationLine],
    projected: &[Vec<Vec<Projected>>],
    projector: &Projector,
    list: &mut DrawList,
) {
    for (con, segments) in constellations.iter().zip(projected) {
        let h = hover_intensity(con);
        if h <= 0.0 {
            continue;
        }
        let glow = Glow {
            color: con.colors.node.with_alpha(h * 0.85),
            blur: 14.0 * h,
        };
        for segment in segments {
            if segment.len() < 2 {
                continue;
            }
            let avg = mean_visible_alpha(segment);
            let stroke = Stroke {
                color: con.colors.line.with_alpha(avg * (0.38 + 0.62 * h)),
                width: LINE_WIDTH + 2.0 * h,
            };
            for run in projector.visible_runs(segment) {
                list.polyline(run, stroke, Some(glow));
            }
        }
    }
}

/// Node dots that swell toward the pointer, plus hover pulses.
pub fn draw_nodes(
    constellations: &[ConstellationLine],
    projected: &[Vec<Vec<Projected>>],
    pointer_px: Vec2,
    pop_radius: f32,
    pulses: bool,
    list: &mut DrawList,
) {
    for (con, segments) in constellations.iter().zip(projected) {
        let h = hover_intensity(con);
        for p in segments.iter().flatten().filter(|p| p.visible) {
            draw_node(p, pointer_px, pop_radius, list);
            if pulses && h > 0.02 {
                draw_pulse(p, con, h, list);
            }
        }
    }
}

fn draw_node(p: &Projected, pointer_px: Vec2, pop_radius: f32, list: &mut DrawList) {
    let pop = if pop_radius > 0.0 {
        (1.0 - p.pos.distance(pointer_px) / pop_radius).max(0.0)
    } else {
        0.0
    };
    let radius = (1.3 * p.alpha + pop * 3.5).max(0.5);
    let alpha = (0.65 * p.alpha + pop * 0.5).min(1.0);
    let tint = NODE_COOL.mix(NODE_WARM, pop);

    if pop > 0.15 {
        list.glow_disc(
            p.pos,
            radius * 5.0 + pop * 10.0,
            tint.with_alpha(alpha * 0.4),
            NODE_HALO_EDGE,
        );
    }
    list.fill_circle(p.pos, radius, tint.with_alpha(alpha));
}

fn draw_pulse(p: &Projected, con: &ConstellationLine, h: f32, list: &mut DrawList) {
    let node = con.colors.node;
    let pulse = 0.5 + 0.5 * con.pulse_phase.sin();
    let radius = (2.5 + 5.0 * h + 4.5 * h * pulse) * p.alpha;
    let alpha = h * 0.8 * p.alpha;

    if radius > 0.0 && alpha > 0.0 {
        list.push(DrawCommand::RadialGradient {
            center: p.pos,
            inner_radius: radius * 0.2,
            outer_radius: radius,
            stops: vec![
                GradientStop::new(0.0, node.with_alpha(alpha)),
                GradientStop::new(0.5, node.with_alpha(alpha * 0.4)),
                GradientStop::new(1.0, node.with_alpha(0.0)),
            ],
        });
    }

    // Bright centre
    list.fill_circle(p.pos, 2.0 * h * p.alpha, node.with_alpha(h * p.alpha));

    // Expanding ring, fading as it grows
    let ring_scale = 0.5 + 0.5 * (con.pulse_phase * 0.5).sin();
    let ring = radius * 1.7 * ring_scale;
    if ring > 1.0 {
        list.stroke_circle(
            p.pos,
            ring,
            node.with_alpha(h * 0.22 * p.alpha * (1.0 - ring_scale)),
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ProjectionMode;
    use crate::api::types::Viewport;
    use crate::components::{ConstellationColors, SkyPoint};

    fn projector() -> Projector {
        Projector::new(ProjectionMode::Sphere, Vec2::ZERO, Viewport::new(800.0, 600.0), 0.95, -0.05)
    }

    fn figure() -> (ConstellationLine, Vec<Vec<Projected>>) {
        let pts = vec![SkyPoint::from_ra_dec(85.0, 0.0), SkyPoint::from_ra_dec(95.0, 5.0)];
        let proj = projector();
        let projected = vec![pts.iter().map(|p| proj.project(p)).collect()];
        let mut con = ConstellationLine::new("T", vec![pts]);
        con.colors = ConstellationColors::from_node(Rgb::new(255, 200, 120));
        (con, projected)
    }

    #[test]
    fn idle_lines_use_fixed_blue() {
        let (_, projected) = figure();
        let mut list = DrawList::new();
        draw_idle_lines(&[projected], &projector(), &mut list);
        assert_eq!(list.len(), 1);
        match &list.commands()[0] {
            DrawCommand::Polyline { stroke, glow, .. } => {
                assert_eq!(stroke.color.rgb, IDLE_LINE);
                assert!(glow.is_none());
                assert!(stroke.color.a > 0.3 && stroke.color.a <= 0.38);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn glow_lines_only_when_hovered() {
        let (mut con, projected) = figure();
        let mut list = DrawList::new();
        draw_glow_lines(std::slice::from_ref(&con), &[projected.clone()], &projector(), &mut list);
        assert!(list.is_empty());

        con.hover = 1.0;
        draw_glow_lines(std::slice::from_ref(&con), &[projected], &projector(), &mut list);
        match &list.commands()[0] {
            DrawCommand::Polyline { stroke, glow: Some(glow), .. } => {
                assert_eq!(stroke.color.rgb, con.colors.line);
                assert_eq!(glow.color.rgb, con.colors.node);
                assert!((stroke.width - 2.9).abs() < 1e-5);
                assert!((glow.blur - 14.0).abs() < 1e-5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn pulse_uses_node_color() {
        let (mut con, projected) = figure();
        con.hover = 1.0;
        let mut list = DrawList::new();
        draw_nodes(std::slice::from_ref(&con), &[projected], Vec2::new(-1000.0, -1000.0), 140.0, true, &mut list);
        let gradient_colors: Vec<Rgb> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::RadialGradient { stops, .. } => Some(stops[0].color.rgb),
                _ => None,
            })
            .collect();
        assert_eq!(gradient_colors, vec![con.colors.node; 2]);
    }

    #[test]
    fn pulses_can_be_disabled() {
        let (mut con, projected) = figure();
        con.hover = 1.0;
        let mut list = DrawList::new();
        draw_nodes(std::slice::from_ref(&con), &[projected], Vec2::new(-1000.0, -1000.0), 140.0, false, &mut list);
        // Just the two node dots
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn node_pops_near_pointer() {
        let (con, projected) = figure();
        let at = projected[0][0].pos;
        let mut list = DrawList::new();
        draw_nodes(std::slice::from_ref(&con), &[projected], at, 140.0, true, &mut list);
        // First node: halo then a warm dot
        match (&list.commands()[0], &list.commands()[1]) {
            (DrawCommand::RadialGradient { .. }, DrawCommand::FillCircle { color, radius, .. }) => {
                assert_eq!(color.rgb, NODE_WARM);
                assert!(*radius > 3.5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
