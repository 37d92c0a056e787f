//! `requestAnimationFrame` loop that stops when dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Calls `on_frame(dt_seconds)` once per animation frame. The first frame
/// reports a zero delta.
pub struct AnimationLoop {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f32) + 'static) -> Result<Self, JsValue> {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let next = Rc::clone(&callback);
        let pending_id = Rc::clone(&pending);
        let mut last: Option<f64> = None;
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            pending_id.set(None);
            let dt = frame_delta(last, now);
            last = Some(now);
            on_frame(dt);

            if let Some(cb) = next.borrow().as_ref() {
                match request_frame(cb) {
                    Ok(id) => pending_id.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            pending.set(Some(request_frame(cb)?));
        }
        Ok(Self { callback, pending })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
            if let Err(err) = window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        // Breaks the closure's reference to itself
        self.callback.borrow_mut().take();
    }
}

fn request_frame(cb: &FrameCallback) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(cb.as_ref().unchecked_ref())
}

/// Seconds between two animation-frame timestamps (milliseconds).
fn frame_delta(last: Option<f64>, now: f64) -> f32 {
    match last {
        Some(prev) if now >= prev => ((now - prev) / 1000.0) as f32,
        _ => 0.0,
    }
}
