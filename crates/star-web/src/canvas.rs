//! Canvas 2D backend: replays engine draw lists onto a `<canvas>`.

use std::f64::consts::TAU;

use star_engine::{DrawCommand, DrawList, Glow, Rect, Renderer, Rgba, Stroke, TextAlign, TextBaseline};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct Canvas2dRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    /// Replay failures already reported; only the first is logged.
    failed: bool,
}

impl Canvas2dRenderer {
    /// Bind to the canvas with `id`.
    pub fn from_id(document: &Document, id: &str) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{id}")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            width: canvas.width(),
            height: canvas.height(),
            canvas,
            ctx,
            failed: false,
        })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn replay(&self, cmd: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCommand::FillCircle { center, radius, color } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawCommand::StrokeCircle { center, radius, stroke } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                self.apply_stroke(stroke);
                ctx.stroke();
            }
            DrawCommand::RadialGradient { center, inner_radius, outer_radius, stops } => {
                let (x, y) = (center.x as f64, center.y as f64);
                let gradient =
                    ctx.create_radial_gradient(x, y, *inner_radius as f64, x, y, *outer_radius as f64)?;
                for stop in stops {
                    gradient.add_color_stop(stop.offset, &stop.color.to_css())?;
                }
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.begin_path();
                ctx.arc(x, y, *outer_radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::Polyline { points, stroke, glow } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                self.apply_glow(glow.as_ref());
                self.apply_stroke(stroke);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.stroke();
                self.apply_glow(None);
            }
            DrawCommand::Line { from, to, stroke } => {
                self.apply_stroke(stroke);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::FadedLine { x0, x1, y, stroke } => {
                let gradient = ctx.create_linear_gradient(*x0 as f64, 0.0, *x1 as f64, 0.0);
                let clear = Rgba::transparent(stroke.color.rgb).to_css();
                let solid = stroke.color.to_css();
                for (offset, css) in [(0.0, &clear), (0.08, &solid), (0.92, &solid), (1.0, &clear)] {
                    gradient.add_color_stop(offset, css)?;
                }
                ctx.set_stroke_style_canvas_gradient(&gradient);
                ctx.set_line_width(stroke.width as f64);
                ctx.begin_path();
                ctx.move_to(*x0 as f64, *y as f64);
                ctx.line_to(*x1 as f64, *y as f64);
                ctx.stroke();
            }
            DrawCommand::Text { text, pos, font, align, baseline, fill, stroke, glow } => {
                let (x, y) = (pos.x as f64, pos.y as f64);
                ctx.set_font(&font.to_css());
                ctx.set_text_align(text_align(*align));
                ctx.set_text_baseline(text_baseline(*baseline));
                self.apply_glow(glow.as_ref());
                if let Some(stroke) = stroke {
                    self.apply_stroke(stroke);
                    ctx.set_line_join("round");
                    ctx.stroke_text(text, x, y)?;
                }
                if let Some(fill) = fill {
                    ctx.set_fill_style_str(&fill.to_css());
                    ctx.fill_text(text, x, y)?;
                }
                self.apply_glow(None);
            }
            DrawCommand::PushClip(Rect { x, y, width, height }) => {
                ctx.save();
                ctx.begin_path();
                ctx.rect(*x as f64, *y as f64, *width as f64, *height as f64);
                ctx.clip();
            }
            DrawCommand::PopClip => ctx.restore(),
        }
        Ok(())
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
    }

    fn apply_glow(&self, glow: Option<&Glow>) {
        match glow {
            Some(g) => {
                self.ctx.set_shadow_color(&g.color.to_css());
                self.ctx.set_shadow_blur(g.blur as f64);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }
}

impl Renderer for Canvas2dRenderer {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn draw(&mut self, list: &DrawList) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        for cmd in list.iter() {
            if let Err(err) = self.replay(cmd) {
                if !self.failed {
                    log::warn!("canvas replay failed: {:?}", err);
                    self.failed = true;
                }
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

fn text_align(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
    }
}

fn text_baseline(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "top",
        TextBaseline::Middle => "middle",
        TextBaseline::Bottom => "bottom",
    }
}
