pub mod color;
pub mod constellations;
pub mod grid;
pub mod hover;
pub mod intro;
pub mod labels;
pub mod rotation;
pub mod splash;
pub mod stars;

pub use color::bv_to_rgb;
pub use grid::GridOverlay;
pub use hover::{advance_hover, find_hovered, hover_intensity};
pub use intro::{
    IntroChoreographer, IntroEvent, IntroMode, IntroState, LayoutProbe, LogoTarget, TextMetrics,
};
pub use rotation::RotationState;
pub use splash::draw_splash;
