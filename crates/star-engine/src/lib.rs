pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{GridConfig, IntroConfig, LabelText, ProjectionMode, SkyConfig, StarColorSource};
pub use api::sky::SkyRenderer;
pub use api::types::{Rgb, Rgba, Viewport};
pub use assets::{CatalogDocument, CatalogError, CatalogLoader, CatalogUpdate};
pub use components::{ConstellationColors, ConstellationLine, SkyPoint, Star};
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::commands::{DrawCommand, DrawList, Font, Glow, GradientStop, Rect, Stroke, TextAlign, TextBaseline};
pub use renderer::projection::{Projected, Projector};
pub use renderer::traits::Renderer;
pub use systems::intro::{
    IntroChoreographer, IntroEvent, IntroMode, IntroState, LayoutProbe, LogoTarget, TextMetrics,
};
pub use systems::splash::draw_splash;

// Extensions: decoupled helpers
pub use extensions::{ease, lerp, lerp_vec2, Easing, Tween};
