//! Splash layer draw pass. Glyphs are drawn one at a time so letter spacing
//! can be animated.

use glam::Vec2;

use crate::api::types::{Rgb, Rgba, Viewport};
use crate::renderer::{DrawCommand, DrawList, Font, Rect, Stroke, TextAlign, TextBaseline};

use super::intro::{logo_font, IntroChoreographer, IntroMode};

/// Draw the splash layer for the intro's current state.
pub fn draw_splash(intro: &IntroChoreographer, viewport: Viewport, list: &mut DrawList) {
    match intro.mode() {
        IntroMode::Splash => draw_reveal(intro, viewport, list),
        IntroMode::Travel => draw_travel(intro, list),
        IntroMode::Done => {}
    }
}

/// Centred logo scaled about the viewport centre: outline glyphs, filled
/// glyphs clipped to the reveal band, two guide lines.
fn draw_reveal(intro: &IntroChoreographer, viewport: Viewport, list: &mut DrawList) {
    let s = intro.state();
    let sc = s.scale;
    let c = viewport.center();
    let font = logo_font(intro.config(), s.font_size * sc);
    let spacing = s.letter_spacing * sc;
    let width = intro.text_width(s.font_size, s.letter_spacing) * sc;

    let centres: Vec<(&str, Vec2)> = {
        let mut x = c.x - width / 2.0;
        intro
            .glyphs()
            .iter()
            .map(|g| {
                let w = intro.glyph_advance(g, s.font_size) * sc;
                let at = Vec2::new(x + w / 2.0, c.y);
                x += w + spacing;
                (g.text.as_str(), at)
            })
            .collect()
    };

    if s.opacity > 0.0 {
        // The outline carries the layer opacity twice, so it trails the fill
        let outline = Stroke {
            color: Rgb::WHITE.with_alpha(s.opacity * s.opacity),
            width: intro.config().stroke_width * sc,
        };
        for &(text, pos) in &centres {
            list.push(glyph(text, pos, &font, TextAlign::Center, TextBaseline::Middle, None, Some(outline)));
        }

        let half_band = s.clip_fraction * s.font_size * 0.75 * sc;
        if half_band > 0.0 {
            list.push(DrawCommand::PushClip(Rect {
                x: 0.0,
                y: c.y - half_band,
                width: viewport.width,
                height: half_band * 2.0,
            }));
            let fill = Some(Rgb::WHITE.with_alpha(s.opacity));
            for &(text, pos) in &centres {
                list.push(glyph(text, pos, &font, TextAlign::Center, TextBaseline::Middle, fill, None));
            }
            list.push(DrawCommand::PopClip);
        }
    }

    if s.line_opacity > 0.0 {
        let stroke = Stroke {
            color: Rgb::WHITE.with_alpha(s.line_opacity),
            width: sc,
        };
        let (x0, x1) = (c.x - c.x * sc, c.x + (viewport.width - c.x) * sc);
        for y in [c.y - s.line_offset * sc, c.y + s.line_offset * sc] {
            list.push(DrawCommand::FadedLine { x0, x1, y, stroke });
        }
    }
}

/// Left/top aligned glyphs at the travelling position.
fn draw_travel(intro: &IntroChoreographer, list: &mut DrawList) {
    let s = intro.state();
    if s.opacity <= 0.0 {
        return;
    }
    let font = logo_font(intro.config(), s.font_size);
    let fill = Some(s.fill_color.with_alpha(s.opacity));
    let outline = (s.stroke_width > 0.05).then(|| Stroke {
        color: Rgb::WHITE.with_alpha(s.opacity),
        width: s.stroke_width,
    });

    let mut x = s.position.x;
    for g in intro.glyphs() {
        let pos = Vec2::new(x, s.position.y);
        list.push(glyph(&g.text, pos, &font, TextAlign::Left, TextBaseline::Top, fill, outline));
        x += intro.glyph_advance(g, s.font_size) + s.letter_spacing;
    }
}

fn glyph(
    text: &str,
    pos: Vec2,
    font: &Font,
    align: TextAlign,
    baseline: TextBaseline,
    fill: Option<Rgba>,
    stroke: Option<Stroke>,
) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_string(),
        pos,
        font: font.clone(),
        align,
        baseline,
        fill,
        stroke,
        glow: None,
    }
}
