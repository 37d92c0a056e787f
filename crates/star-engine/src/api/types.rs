use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color, the unit every catalog color is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unit-range channels, clamping and rounding each one.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: unit_to_u8(r),
            g: unit_to_u8(g),
            b: unit_to_u8(b),
        }
    }

    /// Blend `t` of the way toward `other` (t clamped to [0, 1]).
    pub fn mix(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
        }
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self, a)
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// RGB plus an alpha in [0, 1]. Alpha is clamped on construction so a draw
/// call never receives an out-of-range opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    pub fn new(rgb: Rgb, a: f32) -> Self {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        Self { rgb, a }
    }

    pub const fn transparent(rgb: Rgb) -> Self {
        Self { rgb, a: 0.0 }
    }

    /// CSS `rgba()` string for canvas style setters.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }

    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }
}

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_unit_clamps_and_rounds() {
        assert_eq!(Rgb::from_unit(-0.5, 0.5, 2.0), Rgb::new(0, 128, 255));
        assert_eq!(Rgb::from_unit(f32::NAN, 1.0, 0.0), Rgb::new(0, 255, 0));
    }

    #[test]
    fn mix_endpoints() {
        let a = Rgb::new(0, 100, 200);
        assert_eq!(a.mix(Rgb::WHITE, 0.0), a);
        assert_eq!(a.mix(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(a.mix(Rgb::WHITE, 0.5), Rgb::new(128, 178, 228));
    }

    #[test]
    fn rgba_clamps_alpha() {
        assert_eq!(Rgba::new(Rgb::WHITE, 1.7).a, 1.0);
        assert_eq!(Rgba::new(Rgb::WHITE, -0.2).a, 0.0);
        assert_eq!(Rgba::new(Rgb::WHITE, f32::NAN).a, 0.0);
    }

    #[test]
    fn css_formatting() {
        let c = Rgb::new(160, 190, 255).with_alpha(0.38);
        assert_eq!(c.to_css(), "rgba(160,190,255,0.380)");
    }

    #[test]
    fn viewport_center_and_min_side() {
        let vp = Viewport::new(1600.0, 900.0);
        assert_eq!(vp.center(), Vec2::new(800.0, 450.0));
        assert_eq!(vp.min_side(), 900.0);
    }
}
