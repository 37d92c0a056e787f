//! DOM event listeners removed on drop, plus pointer normalization.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, TouchEvent, Window};

pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("removing {} listener failed: {:?}", self.kind, err);
        }
    }
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &Window) -> (f32, f32) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (read(window.inner_width()), read(window.inner_height()))
}

/// Client coordinates of a mouse move or the first touch.
pub fn pointer_client_pos(event: &Event) -> Option<(f32, f32)> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some((mouse.client_x() as f32, mouse.client_y() as f32));
    }
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((touch.client_x() as f32, touch.client_y() as f32))
}

/// Client coordinates to [0, 1] of the viewport. None for an empty viewport.
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> Option<(f32, f32)> {
    (width > 0.0 && height > 0.0).then(|| ((x / width).clamp(0.0, 1.0), (y / height).clamp(0.0, 1.0)))
}
