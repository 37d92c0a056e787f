pub mod constellation;
pub mod sky_point;
pub mod star;

pub use constellation::{ConstellationColors, ConstellationLine};
pub use sky_point::{lon_lat_to_ra_dec, ra_dec_to_xyz, SkyPoint};
pub use star::{Star, DEFAULT_COLOR_INDEX};
