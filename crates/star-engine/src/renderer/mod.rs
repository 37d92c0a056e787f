pub mod commands;
pub mod projection;
pub mod traits;

pub use commands::{
    DrawCommand, DrawList, Font, Glow, GradientStop, Rect, Stroke, TextAlign, TextBaseline,
};
pub use projection::{mean_visible_alpha, rotate_x, rotate_y, Projected, Projector};
pub use traits::Renderer;
