//! GeoJSON-like sky documents.
//!
//! Each document is a feature collection. A malformed feature is skipped with
//! a warning; only a document that isn't a feature collection at all fails.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::api::config::StarColorSource;
use crate::components::{ConstellationLine, SkyPoint, Star, DEFAULT_COLOR_INDEX};
use crate::core::rng::Rng;
use crate::systems::color::bv_to_rgb;

use super::error::CatalogError;

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Value>,
}

/// Feature ids are strings in the published data, numbers in some mirrors.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureId {
    Text(String),
    Number(serde_json::Number),
}

impl FeatureId {
    fn into_string(self) -> String {
        match self {
            FeatureId::Text(s) => s,
            FeatureId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct LineFeature {
    id: FeatureId,
    geometry: LineGeometry,
}

#[derive(Deserialize)]
struct LineGeometry {
    coordinates: Vec<Vec<[f32; 2]>>,
}

#[derive(Deserialize)]
struct NameFeature {
    id: FeatureId,
    geometry: Option<PointGeometry>,
    #[serde(default)]
    properties: NameProperties,
}

#[derive(Deserialize, Default)]
struct NameProperties {
    name: Option<String>,
}

#[derive(Deserialize)]
struct PointGeometry {
    coordinates: [f32; 2],
}

#[derive(Deserialize)]
struct StarFeature {
    geometry: PointGeometry,
    properties: StarProperties,
}

#[derive(Deserialize)]
struct StarProperties {
    mag: f32,
    #[serde(default, deserialize_with = "lenient_f32")]
    bv: Option<f32>,
}

/// Accepts a number or a numeric string; anything else reads as missing.
fn lenient_f32<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().map(|v| v as f32),
        Some(Value::String(s)) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/// Label anchor and display name for one constellation.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    pub point: SkyPoint,
    pub name: Option<String>,
}

fn features(json: &str) -> Result<Vec<Value>, CatalogError> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    Ok(collection.features)
}

/// Deserialize every feature, dropping (and counting) the malformed ones.
fn typed_features<T: for<'de> Deserialize<'de>>(json: &str, what: &str) -> Result<Vec<T>, CatalogError> {
    let raw = features(json)?;
    let total = raw.len();
    let parsed: Vec<T> = raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    let skipped = total - parsed.len();
    if skipped > 0 {
        log::warn!("{}: skipped {} malformed of {} features", what, skipped, total);
    }
    Ok(parsed)
}

fn point(coords: [f32; 2]) -> Option<SkyPoint> {
    let [lon, lat] = coords;
    if lon.is_finite() && lat.is_finite() {
        Some(SkyPoint::from_lon_lat(lon, lat))
    } else {
        None
    }
}

/// Parse the constellation line document. Labels and colors are left unset.
pub fn parse_constellation_lines(json: &str) -> Result<Vec<ConstellationLine>, CatalogError> {
    let features: Vec<LineFeature> = typed_features(json, "constellation lines")?;
    Ok(features
        .into_iter()
        .map(|f| {
            let segments = f
                .geometry
                .coordinates
                .into_iter()
                .map(|line| line.into_iter().filter_map(point).collect::<Vec<_>>())
                .filter(|seg| !seg.is_empty())
                .collect();
            ConstellationLine::new(f.id.into_string(), segments)
        })
        .collect())
}

/// Parse the names document into anchors keyed by constellation id.
/// Features without coordinates are ignored.
pub fn parse_label_anchors(json: &str) -> Result<HashMap<String, LabelAnchor>, CatalogError> {
    let features: Vec<NameFeature> = typed_features(json, "constellation names")?;
    Ok(features
        .into_iter()
        .filter_map(|f| {
            let point = point(f.geometry?.coordinates)?;
            Some((
                f.id.into_string(),
                LabelAnchor {
                    point,
                    name: f.properties.name,
                },
            ))
        })
        .collect())
}

/// Parse the star catalog, coloring each star and seeding its twinkle.
pub fn parse_stars(
    json: &str,
    color_source: StarColorSource,
    rng: &mut Rng,
) -> Result<Vec<Star>, CatalogError> {
    let features: Vec<StarFeature> = typed_features(json, "star catalog")?;
    Ok(features
        .into_iter()
        .filter(|f| f.properties.mag.is_finite())
        .filter_map(|f| {
            let position = point(f.geometry.coordinates)?;
            let bv = f.properties.bv.unwrap_or(DEFAULT_COLOR_INDEX);
            let color = match color_source {
                StarColorSource::Fixed { color } => color,
                StarColorSource::ColorIndex => bv_to_rgb(bv),
            };
            Some(Star::new(position, f.properties.mag, bv, color).with_random_twinkle(rng))
        })
        .collect())
}
