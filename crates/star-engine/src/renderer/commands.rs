//! Backend-neutral 2D draw commands.
//!
//! Every pass appends to a [`DrawList`]; a backend replays the list in order
//! once per frame. Coordinates are CSS pixels with the origin top-left.

use glam::Vec2;

use crate::api::types::{Rgb, Rgba};

/// Canvas-style font description.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub weight: u16,
    pub size_px: f32,
    pub family: String,
}

impl Font {
    pub fn new(weight: u16, size_px: f32, family: impl Into<String>) -> Self {
        Self {
            weight,
            size_px,
            family: family.into(),
        }
    }

    /// Constellation label font.
    pub fn label() -> Self {
        Self::new(300, 16.0, "'Inter','Helvetica Neue',sans-serif")
    }

    pub fn with_size(&self, size_px: f32) -> Self {
        Self {
            size_px,
            ..self.clone()
        }
    }

    /// CSS shorthand, e.g. `700 80px Montserrat`.
    pub fn to_css(&self) -> String {
        format!("{} {}px {}", self.weight, self.size_px, self.family)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Blurred shadow behind a stroke or glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        stroke: Stroke,
    },
    /// Disc of `outer_radius` filled with a radial gradient.
    RadialGradient {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
    Polyline {
        points: Vec<Vec2>,
        stroke: Stroke,
        glow: Option<Glow>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    /// Horizontal line whose ends fade out over the outer 8% of its length.
    FadedLine {
        x0: f32,
        x1: f32,
        y: f32,
        stroke: Stroke,
    },
    Text {
        text: String,
        pos: Vec2,
        font: Font,
        align: TextAlign,
        baseline: TextBaseline,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
        glow: Option<Glow>,
    },
    /// Restrict following commands to `rect` until the matching `PopClip`.
    PushClip(Rect),
    PopClip,
}

/// Ordered list of draw commands for one frame.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // -- Helpers --

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius > 0.0 && color.is_visible() {
            self.push(DrawCommand::FillCircle { center, radius, color });
        }
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
        if radius > 0.0 && color.is_visible() {
            self.push(DrawCommand::StrokeCircle {
                center,
                radius,
                stroke: Stroke { color, width },
            });
        }
    }

    /// Soft disc fading from `color` at the centre to transparent at `radius`.
    pub fn glow_disc(&mut self, center: Vec2, radius: f32, color: Rgba, edge: Rgb) {
        if radius <= 0.0 || !color.is_visible() {
            return;
        }
        self.push(DrawCommand::RadialGradient {
            center,
            inner_radius: 0.0,
            outer_radius: radius,
            stops: vec![
                GradientStop::new(0.0, color),
                GradientStop::new(1.0, Rgba::transparent(edge)),
            ],
        });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, stroke: Stroke, glow: Option<Glow>) {
        if points.len() >= 2 && stroke.color.is_visible() && stroke.width > 0.0 {
            self.push(DrawCommand::Polyline { points, stroke, glow });
        }
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        if color.is_visible() && width > 0.0 {
            self.push(DrawCommand::Line {
                from,
                to,
                stroke: Stroke { color, width },
            });
        }
    }
}
