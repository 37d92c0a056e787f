pub mod catalog;
pub mod error;
pub mod loader;

pub use catalog::{parse_constellation_lines, parse_label_anchors, parse_stars, LabelAnchor};
pub use error::{CatalogDocument, CatalogError};
pub use loader::{assign_constellation_colors, CatalogLoader, CatalogUpdate};
