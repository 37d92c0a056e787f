use serde::{Deserialize, Serialize};
use star_engine::{IntroConfig, SkyConfig};
use wasm_bindgen::JsValue;

/// Page-level settings: catalog sources, element ids and the engine configs.
/// Every field has a default, so the host page only passes what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub lines_url: String,
    pub names_url: String,
    pub stars_url: String,
    /// Full-viewport canvas for the globe.
    pub sky_canvas_id: String,
    /// Canvas above everything for the logo reveal.
    pub splash_canvas_id: String,
    /// Black cover faded out after the splash.
    pub overlay_id: String,
    /// Container that moves from the centre to its resting place.
    pub content_id: String,
    /// Class added to the container once the splash finishes.
    pub settled_class: String,
    /// Element the logo travels to.
    pub logo_id: String,
    pub nav_id: String,
    /// Skip the logo reveal and start at the final zoom.
    pub skip_intro: bool,
    pub sky: SkyConfig,
    pub intro: IntroConfig,
}

const CDN: &str = "https://cdn.jsdelivr.net/gh/ofrohn/d3-celestial@master/data";

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            lines_url: format!("{CDN}/constellations.lines.json"),
            names_url: format!("{CDN}/constellations.json"),
            stars_url: format!("{CDN}/stars.6.json"),
            sky_canvas_id: "hero-sky".to_string(),
            splash_canvas_id: "hero-splash".to_string(),
            overlay_id: "hero-overlay".to_string(),
            content_id: "hero-content".to_string(),
            settled_class: "settled".to_string(),
            logo_id: "hero-logo".to_string(),
            nav_id: "hero-nav".to_string(),
            skip_intro: false,
            sky: SkyConfig::default(),
            intro: IntroConfig::default(),
        }
    }
}

impl HeroConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a plain JS object from the host page. `undefined` and `null`
    /// give the defaults.
    pub fn from_js(value: &JsValue) -> Result<Self, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let json: String = js_sys::JSON::stringify(value)?.into();
        Self::from_json(&json).map_err(|err| JsValue::from_str(&format!("hero config: {err}")))
    }
}
