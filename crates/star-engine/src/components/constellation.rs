use crate::api::config::LabelText;
use crate::api::types::Rgb;

use super::sky_point::SkyPoint;

/// Tints derived from the brightest star under a constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstellationColors {
    /// Hover glow stroke color.
    pub line: Rgb,
    /// Node pulse and glow shadow color.
    pub node: Rgb,
    /// Hovered label color.
    pub label: Rgb,
}

impl ConstellationColors {
    /// Off-white the line tint leans toward.
    pub const LINE_TINT: Rgb = Rgb::new(235, 240, 255);

    /// Blue-white used when no star sits under any vertex.
    pub const FALLBACK: Self = Self {
        line: Rgb::new(180, 210, 255),
        node: Rgb::new(180, 210, 255),
        label: Rgb::new(180, 210, 255),
    };

    /// Derive all three tints from the matched star's color.
    pub fn from_node(node: Rgb) -> Self {
        Self {
            line: node.mix(Self::LINE_TINT, 0.6),
            node,
            label: node.mix(Rgb::WHITE, 0.2),
        }
    }
}

impl Default for ConstellationColors {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// One constellation figure plus its per-view hover state.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationLine {
    /// Catalog abbreviation, e.g. "UMa".
    pub id: String,
    /// Full name from the names document, when it had one.
    pub name: Option<String>,
    /// Polylines of vertices.
    pub segments: Vec<Vec<SkyPoint>>,
    /// Explicit label anchor from the names document.
    pub label_anchor: Option<SkyPoint>,
    /// Hover progress in [0, 1].
    pub hover: f32,
    /// Pulse phase in radians; advances while hovered or fading.
    pub pulse_phase: f32,
    pub colors: ConstellationColors,
    /// Indices into the star list of stars matched under vertices.
    pub ignited_stars: Vec<usize>,
}

impl ConstellationLine {
    pub fn new(id: impl Into<String>, segments: Vec<Vec<SkyPoint>>) -> Self {
        Self {
            id: id.into(),
            name: None,
            segments,
            label_anchor: None,
            hover: 0.0,
            pulse_phase: 0.0,
            colors: ConstellationColors::FALLBACK,
            ignited_stars: Vec::new(),
        }
    }

    pub fn with_label(mut self, anchor: Option<SkyPoint>, name: Option<String>) -> Self {
        self.label_anchor = anchor;
        self.name = name;
        self
    }

    pub fn vertices(&self) -> impl Iterator<Item = &SkyPoint> {
        self.segments.iter().flatten()
    }

    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn label_text(&self, mode: LabelText) -> &str {
        match (mode, self.name.as_deref()) {
            (LabelText::Name, Some(name)) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}
