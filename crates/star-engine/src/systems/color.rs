//! B-V color index to display color.
//!
//! Piecewise polynomial fit of blackbody tints over the catalog's range,
//! followed by a saturation boost so the blue/orange split reads on a dark
//! background.

use crate::api::types::Rgb;

/// Range the color index is clamped to before evaluation.
pub const COLOR_INDEX_MIN: f32 = -0.4;
pub const COLOR_INDEX_MAX: f32 = 2.0;

/// How far channels are pushed away from their mean.
const SATURATION: f32 = 1.55;

/// Map a B-V index to an 8-bit display color.
pub fn bv_to_rgb(bv: f32) -> Rgb {
    let t = if bv.is_nan() {
        crate::components::DEFAULT_COLOR_INDEX
    } else {
        bv.clamp(COLOR_INDEX_MIN, COLOR_INDEX_MAX)
    };

    let r = if t < 0.4 {
        0.55 + 0.08 * t + 0.08 * t * t
    } else if t < 1.5 {
        0.78 + 0.22 * (t - 0.4) / 1.1
    } else {
        1.0
    };

    let g = if t < 0.0 {
        0.60 + 0.05 * t + 0.9 * t * t
    } else if t < 0.4 {
        0.82 + 0.6 * t - t * t
    } else if t < 1.6 {
        0.96 - 0.32 * (t - 0.4) / 1.2
    } else {
        (0.64 - (t - 1.6)).max(0.0)
    };

    let b = if t < 0.4 {
        1.0
    } else if t < 1.5 {
        (1.0 - (t - 0.4) / 1.1).max(0.0)
    } else {
        0.0
    };

    let (r, g, b) = (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0));
    let mean = (r + g + b) / 3.0;
    let boost = |c: f32| (mean + (c - mean) * SATURATION).clamp(0.0, 1.0);
    Rgb::from_unit(boost(r), boost(g), boost(b))
}
