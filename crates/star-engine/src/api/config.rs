use serde::{Deserialize, Serialize};

use super::types::Rgb;

/// How the rotated celestial sphere is mapped onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Orthographic globe: front hemisphere visible, alpha by depth.
    #[default]
    Sphere,
    /// Equirectangular sheet: everything visible, polylines break at the ra seam.
    Flat,
}

/// Where star display colors come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StarColorSource {
    /// Every star gets the same color.
    Fixed { color: Rgb },
    /// Color derived from the catalog B-V index.
    #[default]
    ColorIndex,
}

/// Which text a constellation label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelText {
    /// Catalog abbreviation, e.g. "Ori".
    #[default]
    Id,
    /// Full name from the names document, falling back to the id.
    Name,
}

/// Distortion grid drawn over the sky.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid cell size in pixels.
    pub cell: f32,
    /// Fraction of the pointer offset the lagged pointer catches up per step.
    pub lag: f32,
    /// Pixel radius around the lagged pointer where vertices are pushed.
    pub radius: f32,
    /// Maximum push in pixels, reached at the pointer itself.
    pub push: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell: 18.0,
            lag: 0.04,
            radius: 190.0,
            push: 48.0,
            color: Rgb::new(90, 130, 255),
            alpha: 0.04,
        }
    }
}

/// Configuration for the sky renderer.
///
/// Every per-step constant lives here so hosts can tune the look from JSON
/// without touching code. Defaults reproduce the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub projection: ProjectionMode,
    pub star_color: StarColorSource,
    /// Glow strokes, ignition and pulse blobs on hovered constellations.
    pub hover_glow: bool,
    pub grid_overlay: bool,
    pub grid: GridConfig,
    pub label_text: LabelText,
    /// Fixed step length in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Cap on simulation steps per animation frame.
    pub max_steps_per_frame: u32,
    /// Seed for twinkle phases and speeds.
    pub seed: u64,
    /// Starting rotation angles (x, y) in radians.
    pub initial_rotation: [f32; 2],
    /// Velocity the sphere drifts toward with the pointer near the centre.
    pub idle_drift: [f32; 2],
    /// Pointer offset from centre (normalized units) below which the idle drift applies.
    pub steer_deadzone: f32,
    /// Angular speed per step when steering with the pointer.
    pub steer_speed: f32,
    pub steer_smoothing: f32,
    pub idle_smoothing: f32,
    /// Rotated depth above which a point counts as visible on the globe.
    pub visibility_cutoff: f32,
    /// Pixel radius for picking the hovered constellation.
    pub hover_radius: f32,
    pub hover_rise: f32,
    pub hover_fall: f32,
    pub pulse_speed: f32,
    /// Pixel radius of the node pop around the pointer.
    pub node_pop_radius: f32,
    /// Labels appear once the projection scale exceeds this value.
    pub label_scale_min: f32,
    /// Scale range over which labels fade in past `label_scale_min`.
    pub label_scale_span: f32,
    /// Squared chord distance for matching stars to constellation vertices.
    pub color_match_distance_sq: f32,
    /// Squared chord distance within which a star counts as the one under a
    /// node and ignites on hover.
    pub ignition_distance_sq: f32,
    /// Projection scale used until a host drives it.
    pub initial_scale: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Sphere,
            star_color: StarColorSource::ColorIndex,
            hover_glow: true,
            grid_overlay: true,
            grid: GridConfig::default(),
            label_text: LabelText::Id,
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 4,
            seed: 0x5EED_57A2,
            initial_rotation: [0.15, 0.0],
            idle_drift: [-0.00045, 0.001],
            steer_deadzone: 0.05,
            steer_speed: 0.0018,
            steer_smoothing: 0.07,
            idle_smoothing: 0.025,
            visibility_cutoff: -0.05,
            hover_radius: 90.0,
            hover_rise: 0.06,
            hover_fall: 0.035,
            pulse_speed: 0.07,
            node_pop_radius: 140.0,
            label_scale_min: 0.5,
            label_scale_span: 0.35,
            color_match_distance_sq: 0.08,
            ignition_distance_sq: 1e-5,
            initial_scale: 0.95,
        }
    }
}

impl SkyConfig {
    /// Parse from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Timeline constants for the logo reveal and hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub text: String,
    pub font_family: String,
    pub font_weight: u16,
    pub letter_spacing_start: f32,
    pub letter_spacing_end: f32,
    pub scale_start: f32,
    pub scale_end: f32,
    /// Guide-line fade-in window, seconds from start.
    pub line_in_start: f32,
    pub line_in_duration: f32,
    /// Split window driving spacing, scale, clip band and line offset.
    pub split_start: f32,
    pub split_duration: f32,
    /// End of the splash phase.
    pub splash_end: f32,
    pub zoom_from: f32,
    pub zoom_to: f32,
    pub zoom_duration: f32,
    pub overlay_fade_duration: f32,
    pub travel_duration: f32,
    pub travel_color: Rgb,
    pub travel_opacity_end: f32,
    pub stroke_width: f32,
    /// Font size as a fraction of viewport width, before clamping.
    pub font_width_fraction: f32,
    pub font_min: f32,
    pub font_max: f32,
    /// The widest splash frame must fit in this fraction of the viewport width.
    pub max_text_width_fraction: f32,
    /// Destination font size when the element reports none.
    pub fallback_font_size: f32,
    /// Two measurements closer than this (px) count as settled.
    pub settle_epsilon: f32,
    /// Polls before travel starts regardless of layout movement.
    pub max_settle_polls: u32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            text: "yahayabb".to_string(),
            font_family: "'Proxima Nova', 'Montserrat', 'Helvetica Neue', Helvetica, Arial, sans-serif"
                .to_string(),
            font_weight: 700,
            letter_spacing_start: 100.0,
            letter_spacing_end: 2.0,
            scale_start: 1.5,
            scale_end: 1.0,
            line_in_start: 0.0,
            line_in_duration: 0.35,
            split_start: 0.35,
            split_duration: 2.2,
            splash_end: 3.0,
            zoom_from: 0.28,
            zoom_to: 0.95,
            zoom_duration: 2.2,
            overlay_fade_duration: 0.6,
            travel_duration: 0.75,
            travel_color: Rgb::new(210, 225, 252),
            travel_opacity_end: 0.88,
            stroke_width: 1.5,
            font_width_fraction: 0.13,
            font_min: 48.0,
            font_max: 110.0,
            max_text_width_fraction: 0.92,
            fallback_font_size: 40.0,
            settle_epsilon: 0.5,
            max_settle_polls: 90,
        }
    }
}

impl IntroConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
