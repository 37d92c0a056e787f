//! Renderer trait for draw-list backends.
//!
//! The engine only produces [`DrawList`]s. A backend owns a surface and
//! replays lists onto it; the browser bridge ships a Canvas 2D backend.

use super::commands::DrawList;

/// Renderer trait for 2D backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct RecordingRenderer {
///     frames: usize,
/// }
///
/// impl Renderer for RecordingRenderer {
///     fn backend(&self) -> &'static str { "recording" }
///     fn draw(&mut self, list: &DrawList) { self.frames += 1; }
///     fn resize(&mut self, width: u32, height: u32) {}
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "canvas2d").
    fn backend(&self) -> &'static str;

    /// Clear the surface and replay `list` in order.
    fn draw(&mut self, list: &DrawList);

    /// Resize the backing surface in pixels.
    fn resize(&mut self, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rgb;
    use glam::Vec2;

    #[derive(Default)]
    struct Recording {
        frames: Vec<usize>,
        size: (u32, u32),
    }

    impl Renderer for Recording {
        fn backend(&self) -> &'static str {
            "recording"
        }

        fn draw(&mut self, list: &DrawList) {
            self.frames.push(list.len());
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    #[test]
    fn trait_object_dispatch() {
        let mut rec = Recording::default();
        let mut list = DrawList::new();
        list.fill_circle(Vec2::ZERO, 1.0, Rgb::WHITE.with_alpha(1.0));
        {
            let r: &mut dyn Renderer = &mut rec;
            r.resize(640, 480);
            r.draw(&list);
            assert_eq!(r.backend(), "recording");
        }
        assert_eq!(rec.frames, vec![1]);
        assert_eq!(rec.size, (640, 480));
    }
}
