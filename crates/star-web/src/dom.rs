//! DOM reads and writes the intro needs.

use star_engine::{Font, LayoutProbe, LogoTarget, TextMetrics};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlElement, Window};

/// Measures the logo's destination element by id.
pub struct DomLayoutProbe {
    window: Window,
    document: Document,
    element_id: String,
}

impl DomLayoutProbe {
    pub fn new(window: Window, document: Document, element_id: impl Into<String>) -> Self {
        Self {
            window,
            document,
            element_id: element_id.into(),
        }
    }

    fn font_size(&self, element: &web_sys::Element) -> Option<f32> {
        let style = self.window.get_computed_style(element).ok()??;
        parse_px(&style.get_property_value("font-size").ok()?)
    }
}

impl LayoutProbe for DomLayoutProbe {
    fn measure(&mut self) -> Option<LogoTarget> {
        let element = self.document.get_element_by_id(&self.element_id)?;
        let rect = element.get_bounding_client_rect();
        Some(LogoTarget {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
            font_size: self.font_size(&element),
        })
    }
}

/// `measureText` on a 2D context.
pub struct CanvasTextMetrics<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasTextMetrics<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMetrics for CanvasTextMetrics<'_> {
    fn text_width(&self, text: &str, font: &Font) -> f32 {
        self.ctx.set_font(&font.to_css());
        match self.ctx.measure_text(text) {
            Ok(m) => m.width() as f32,
            Err(err) => {
                log::warn!("measureText failed: {:?}", err);
                0.0
            }
        }
    }
}

/// Style writes on elements looked up by id. Missing elements are skipped.
pub struct Page {
    document: Document,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    pub fn set_style(&self, id: &str, property: &str, value: &str) {
        let Some(el) = self.element(id) else {
            log::debug!("#{} not found", id);
            return;
        };
        if let Err(err) = el.style().set_property(property, value) {
            log::warn!("#{}: setting {} failed: {:?}", id, property, err);
        }
    }

    pub fn add_class(&self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            if let Err(err) = el.class_list().add_1(class) {
                log::warn!("#{}: adding class {} failed: {:?}", id, class, err);
            }
        }
    }
}

/// Parse a computed length such as `48px`.
pub fn parse_px(value: &str) -> Option<f32> {
    let v: f32 = value.trim().strip_suffix("px")?.trim().parse().ok()?;
    (v.is_finite() && v > 0.0).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_values() {
        assert_eq!(parse_px("48px"), Some(48.0));
        assert_eq!(parse_px(" 40.5px "), Some(40.5));
        assert_eq!(parse_px("2em"), None);
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("0px"), None);
    }
}
