//! Intro timeline: logo reveal, globe zoom, overlay fade, layout settle wait,
//! logo travel and hand-off.
//!
//! The choreographer is one-shot and strictly forward. Browser work it needs
//! (text measurement, reading the destination element) goes through the
//! [`TextMetrics`] and [`LayoutProbe`] traits; everything the page must do in
//! response comes back as [`IntroEvent`]s.

use glam::Vec2;

use crate::api::config::IntroConfig;
use crate::api::types::{Rgb, Viewport};
use crate::extensions::{ease, lerp, lerp_vec2, window, Easing, Tween};
use crate::renderer::Font;

/// Measures rendered text.
pub trait TextMetrics {
    fn text_width(&self, text: &str, font: &Font) -> f32;
}

/// Reads the bounding box of the element the logo travels to.
pub trait LayoutProbe {
    /// None when the element doesn't exist.
    fn measure(&mut self) -> Option<LogoTarget>;
}

/// Destination box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoTarget {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    /// Computed font size of the element, when it could be read.
    pub font_size: Option<f32>,
}

impl LogoTarget {
    fn close_to(&self, other: &LogoTarget, epsilon: f32) -> bool {
        (self.left - other.left).abs() <= epsilon
            && (self.top - other.top).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroMode {
    Splash,
    Travel,
    Done,
}

/// Everything the splash pass needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroState {
    pub opacity: f32,
    pub scale: f32,
    pub font_size: f32,
    pub letter_spacing: f32,
    /// Fraction of the fill band revealed, 0 to 1.
    pub clip_fraction: f32,
    pub line_opacity: f32,
    /// Distance of each guide line from the vertical centre.
    pub line_offset: f32,
    /// Top-left of the text block while travelling.
    pub position: Vec2,
    pub fill_color: Rgb,
    pub stroke_width: f32,
    pub mode: IntroMode,
}

/// Things the page must do as the timeline advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntroEvent {
    /// Splash finished; the hero content can settle into place.
    HeroSettled,
    /// New opacity for the cover overlay.
    OverlayOpacity(f32),
    /// Overlay fully transparent; hide it.
    OverlayHidden,
    /// Show the real logo element, hide the splash layer, reveal the nav.
    Handoff,
}

/// Result of one layout poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleStatus {
    Waiting,
    Settled(LogoTarget),
    Missing,
}

/// Waits for two successive measurements that agree, giving up after a
/// fixed number of polls and using the latest one.
#[derive(Debug, Clone)]
pub struct SettleWatcher {
    last: Option<LogoTarget>,
    polls: u32,
    epsilon: f32,
    max_polls: u32,
}

impl SettleWatcher {
    pub fn new(epsilon: f32, max_polls: u32) -> Self {
        Self {
            last: None,
            polls: 0,
            epsilon,
            max_polls: max_polls.max(1),
        }
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn poll(&mut self, measured: Option<LogoTarget>) -> SettleStatus {
        let Some(current) = measured else {
            return SettleStatus::Missing;
        };
        self.polls += 1;
        let settled = self
            .last
            .is_some_and(|prev| prev.close_to(&current, self.epsilon));
        self.last = Some(current);
        if settled {
            SettleStatus::Settled(current)
        } else if self.polls >= self.max_polls {
            log::warn!("logo destination never settled; travelling after {} polls", self.polls);
            SettleStatus::Settled(current)
        } else {
            SettleStatus::Waiting
        }
    }
}

/// Font used for the logo at `size_px`.
pub fn logo_font(config: &IntroConfig, size_px: f32) -> Font {
    Font::new(config.font_weight, size_px, config.font_family.clone())
}

/// Splash font size for a viewport this wide: a fraction of the width,
/// clamped, then shrunk so the widest frame (starting letter spacing) fits.
pub fn splash_font_size(viewport_width: f32, config: &IntroConfig, metrics: &dyn TextMetrics) -> f32 {
    let mut size = (viewport_width * config.font_width_fraction).clamp(config.font_min, config.font_max);
    let glyphs = config.text.chars().count().saturating_sub(1) as f32;
    let total = metrics.text_width(&config.text, &logo_font(config, size))
        + glyphs * config.letter_spacing_start;
    let limit = viewport_width * config.max_text_width_fraction;
    if total > limit && total > 0.0 {
        size *= limit / total;
    }
    size
}

/// Splash parameters at `t` seconds.
pub fn splash_state(t: f32, font_size: f32, config: &IntroConfig) -> IntroState {
    let split = Easing::CubicInOut.apply(window(t, config.split_start, config.split_duration));
    let line_in = Easing::CubicOut.apply(window(t, config.line_in_start, config.line_in_duration));

    IntroState {
        opacity: (split * 1.2).min(1.0),
        scale: lerp(config.scale_start, config.scale_end, split),
        font_size,
        letter_spacing: lerp(config.letter_spacing_start, config.letter_spacing_end, split),
        clip_fraction: split,
        line_opacity: (line_in * (1.0 - split)).max(0.0),
        line_offset: split * font_size * 0.75,
        position: Vec2::ZERO,
        fill_color: Rgb::WHITE,
        stroke_width: config.stroke_width,
        mode: IntroMode::Splash,
    }
}

/// One glyph of the logo with its advance at the base font size.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub advance: f32,
}

#[derive(Debug, Clone)]
struct Travel {
    from: Vec2,
    to: Vec2,
    from_font: f32,
    to_font: f32,
    elapsed: f32,
}

#[derive(Debug, Clone)]
enum Phase {
    Splash,
    OverlayFade(Tween),
    AwaitLayout(SettleWatcher),
    Travel(Travel),
    Done,
}

pub struct IntroChoreographer {
    config: IntroConfig,
    viewport: Viewport,
    /// Font size the splash was laid out at.
    base_font: f32,
    glyphs: Vec<Glyph>,
    elapsed: f32,
    phase: Phase,
    zoom: Option<Tween>,
    state: IntroState,
}

impl IntroChoreographer {
    pub fn new(config: IntroConfig, viewport: Viewport, metrics: &dyn TextMetrics) -> Self {
        let base_font = splash_font_size(viewport.width, &config, metrics);
        let font = logo_font(&config, base_font);
        let glyphs = config
            .text
            .chars()
            .map(|c| {
                let text = c.to_string();
                let advance = metrics.text_width(&text, &font);
                Glyph { text, advance }
            })
            .collect();
        let state = splash_state(0.0, base_font, &config);
        Self {
            config,
            viewport,
            base_font,
            glyphs,
            elapsed: 0.0,
            phase: Phase::Splash,
            zoom: None,
            state,
        }
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    pub fn state(&self) -> &IntroState {
        &self.state
    }

    pub fn mode(&self) -> IntroMode {
        self.state.mode
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Glyph advance at `font_size`; widths scale with the font.
    pub fn glyph_advance(&self, glyph: &Glyph, font_size: f32) -> f32 {
        if self.base_font > 0.0 {
            glyph.advance * font_size / self.base_font
        } else {
            glyph.advance
        }
    }

    /// Width of the logo at `font_size` with `spacing` between glyphs.
    pub fn text_width(&self, font_size: f32, spacing: f32) -> f32 {
        let advances: f32 = self.glyphs.iter().map(|g| self.glyph_advance(g, font_size)).sum();
        advances + spacing * self.glyphs.len().saturating_sub(1) as f32
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Globe projection scale for this frame.
    pub fn projection_scale(&self) -> f32 {
        self.zoom
            .as_ref()
            .map_or(self.config.zoom_from, Tween::value)
    }

    /// Advance by `dt` seconds and return what the page must do now.
    pub fn advance(&mut self, dt: f32, probe: &mut dyn LayoutProbe) -> Vec<IntroEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = Vec::new();

        if let Some(zoom) = self.zoom.as_mut() {
            zoom.advance(dt);
        }

        let phase = std::mem::replace(&mut self.phase, Phase::Done);
        self.phase = match phase {
            Phase::Splash => self.advance_splash(dt, &mut events),
            Phase::OverlayFade(mut fade) => {
                let opacity = fade.advance(dt);
                events.push(IntroEvent::OverlayOpacity(opacity));
                if fade.is_complete() {
                    events.push(IntroEvent::OverlayHidden);
                    let watcher = SettleWatcher::new(self.config.settle_epsilon, self.config.max_settle_polls);
                    self.poll_layout(watcher, probe, &mut events)
                } else {
                    Phase::OverlayFade(fade)
                }
            }
            Phase::AwaitLayout(watcher) => self.poll_layout(watcher, probe, &mut events),
            Phase::Travel(travel) => self.advance_travel(travel, dt, &mut events),
            Phase::Done => Phase::Done,
        };
        events
    }

    fn advance_splash(&mut self, dt: f32, events: &mut Vec<IntroEvent>) -> Phase {
        self.elapsed += dt;
        self.state = splash_state(self.elapsed, self.base_font, &self.config);
        if self.elapsed < self.config.splash_end {
            return Phase::Splash;
        }

        self.zoom = Some(Tween::new(
            self.config.zoom_from,
            self.config.zoom_to,
            self.config.zoom_duration,
            Easing::CubicInOut,
        ));
        events.push(IntroEvent::HeroSettled);
        events.push(IntroEvent::OverlayOpacity(1.0));
        Phase::OverlayFade(Tween::new(1.0, 0.0, self.config.overlay_fade_duration, Easing::CubicOut))
    }

    fn poll_layout(
        &mut self,
        mut watcher: SettleWatcher,
        probe: &mut dyn LayoutProbe,
        events: &mut Vec<IntroEvent>,
    ) -> Phase {
        match watcher.poll(probe.measure()) {
            SettleStatus::Waiting => Phase::AwaitLayout(watcher),
            SettleStatus::Missing => {
                log::info!("logo destination missing; skipping travel");
                self.finish(events)
            }
            SettleStatus::Settled(target) => self.start_travel(target),
        }
    }

    fn start_travel(&mut self, target: LogoTarget) -> Phase {
        let from_font = self.base_font;
        let width = self.text_width(from_font, self.config.letter_spacing_end);
        let center = self.viewport.center();
        let from = Vec2::new(center.x - width / 2.0, center.y - from_font * 0.75);
        let to_font = target
            .font_size
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(self.config.fallback_font_size);

        self.state = IntroState {
            opacity: 1.0,
            scale: 1.0,
            font_size: from_font,
            letter_spacing: self.config.letter_spacing_end,
            clip_fraction: 1.0,
            line_opacity: 0.0,
            line_offset: 0.0,
            position: from,
            fill_color: Rgb::WHITE,
            stroke_width: self.config.stroke_width,
            mode: IntroMode::Travel,
        };
        Phase::Travel(Travel {
            from,
            to: Vec2::new(target.left, target.top),
            from_font,
            to_font,
            elapsed: 0.0,
        })
    }

    fn advance_travel(&mut self, mut travel: Travel, dt: f32, events: &mut Vec<IntroEvent>) -> Phase {
        travel.elapsed += dt;
        let p = window(travel.elapsed, 0.0, self.config.travel_duration);
        let e = Easing::CubicInOut.apply(p);

        self.state.position = lerp_vec2(travel.from, travel.to, e);
        self.state.font_size = lerp(travel.from_font, travel.to_font, e);
        self.state.stroke_width = ease(self.config.stroke_width, 0.0, p, Easing::CubicInOut);
        self.state.fill_color = Rgb::WHITE.mix(self.config.travel_color, e);
        self.state.opacity = lerp(1.0, self.config.travel_opacity_end, e);

        if p >= 1.0 {
            self.finish(events)
        } else {
            Phase::Travel(travel)
        }
    }

    fn finish(&mut self, events: &mut Vec<IntroEvent>) -> Phase {
        self.state.mode = IntroMode::Done;
        events.push(IntroEvent::Handoff);
        log::info!("intro finished");
        Phase::Done
    }
}
