use glam::Vec3;

/// A direction on the celestial sphere, stored as a unit vector.
///
/// Axis convention: `y` points to the celestial north pole, `x` toward
/// ra = 0°, `z` toward ra = 90°. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPoint(Vec3);

impl SkyPoint {
    /// Build from right ascension and declination in degrees.
    pub fn from_ra_dec(ra_deg: f32, dec_deg: f32) -> Self {
        Self(ra_dec_to_xyz(ra_deg, dec_deg))
    }

    /// Build from catalog longitude/latitude in degrees.
    pub fn from_lon_lat(lon: f32, lat: f32) -> Self {
        let (ra, dec) = lon_lat_to_ra_dec(lon, lat);
        Self::from_ra_dec(ra, dec)
    }

    pub fn vec(&self) -> Vec3 {
        self.0
    }

    /// Squared chord distance to another point (0 to 4).
    pub fn distance_sq(&self, other: &SkyPoint) -> f32 {
        self.0.distance_squared(other.0)
    }
}

/// Catalog longitudes run the opposite way to right ascension.
/// Returns `(ra, dec)` with `ra` in [0, 360).
pub fn lon_lat_to_ra_dec(lon: f32, lat: f32) -> (f32, f32) {
    let ra = (-lon).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    let ra = if ra >= 360.0 { 0.0 } else { ra };
    (ra, lat)
}

/// Unit vector for (ra, dec) in degrees.
pub fn ra_dec_to_xyz(ra_deg: f32, dec_deg: f32) -> Vec3 {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    Vec3::new(dec.cos() * ra.cos(), dec.sin(), dec.cos() * ra.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lon_maps_to_ra() {
        assert_eq!(lon_lat_to_ra_dec(-90.0, 10.0), (90.0, 10.0));
        assert_eq!(lon_lat_to_ra_dec(90.0, -5.0), (270.0, -5.0));
        assert_eq!(lon_lat_to_ra_dec(0.0, 0.0), (0.0, 0.0));
        assert_eq!(lon_lat_to_ra_dec(180.0, 0.0), (180.0, 0.0));
    }

    #[test]
    fn ra_always_in_range() {
        for lon in [-720.0, -360.0, -1e-7, 0.0, 359.9, 360.0, 1080.5] {
            let (ra, _) = lon_lat_to_ra_dec(lon, 0.0);
            assert!((0.0..360.0).contains(&ra), "lon {} gave ra {}", lon, ra);
        }
    }

    #[test]
    fn norm_preserved_everywhere() {
        let mut ra = 0.0;
        while ra < 360.0 {
            let mut dec = -90.0;
            while dec <= 90.0 {
                let len = ra_dec_to_xyz(ra, dec).length();
                assert!((len - 1.0).abs() < 1e-5, "ra {} dec {} len {}", ra, dec, len);
                dec += 7.5;
            }
            ra += 11.25;
        }
    }

    #[test]
    fn cardinal_directions() {
        let p = ra_dec_to_xyz(90.0, 0.0);
        assert!(p.abs_diff_eq(Vec3::Z, 1e-6));
        let n = ra_dec_to_xyz(0.0, 90.0);
        assert!(n.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn distance_between_identical_points_is_zero() {
        let a = SkyPoint::from_lon_lat(-101.3, -16.7);
        assert_eq!(a.distance_sq(&a), 0.0);
    }
}
