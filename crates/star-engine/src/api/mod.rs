pub mod config;
pub mod sky;
pub mod types;

pub use config::{IntroConfig, SkyConfig};
pub use sky::SkyRenderer;
pub use types::{Rgb, Rgba, Viewport};
