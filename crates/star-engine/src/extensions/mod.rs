// extensions/mod.rs
//
// Animation helpers shared by the sky passes and the intro timeline.
// Pure math: nothing here knows about stars or the DOM.

pub mod easing;
pub mod tween;

pub use easing::{ease, lerp, lerp_vec2, window, Easing};
pub use tween::Tween;
