//! Sky-to-screen projection.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};

use crate::api::config::ProjectionMode;
use crate::api::types::Viewport;
use crate::components::SkyPoint;

/// Rotate about the X axis.
#[inline]
pub fn rotate_x(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// Rotate about the Y axis.
#[inline]
pub fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
}

/// A point after rotation and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in pixels.
    pub pos: Vec2,
    /// Rotated depth; positive faces the viewer.
    pub depth: f32,
    pub visible: bool,
    /// Depth-derived opacity in [0, 1].
    pub alpha: f32,
}

impl Projected {
    pub const HIDDEN: Self = Self {
        pos: Vec2::ZERO,
        depth: -1.0,
        visible: false,
        alpha: 0.0,
    };
}

/// Per-frame projector: rotation, surface size and zoom baked in.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    mode: ProjectionMode,
    rotation: Vec2,
    center: Vec2,
    /// Pixels per unit (sphere) or per radian (flat).
    scale_px: f32,
    cutoff: f32,
}

impl Projector {
    pub fn new(
        mode: ProjectionMode,
        rotation: Vec2,
        viewport: Viewport,
        scale: f32,
        cutoff: f32,
    ) -> Self {
        let radius = viewport.min_side() * scale.max(0.0);
        let scale_px = match mode {
            ProjectionMode::Sphere => radius,
            // Declination ±90° spans the same height as the globe
            ProjectionMode::Flat => radius / FRAC_PI_2,
        };
        Self {
            mode,
            rotation,
            center: viewport.center(),
            scale_px,
            cutoff,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn rotate(&self, v: Vec3) -> Vec3 {
        rotate_y(rotate_x(v, self.rotation.x), self.rotation.y)
    }

    pub fn project(&self, point: &SkyPoint) -> Projected {
        let v = self.rotate(point.vec());
        match self.mode {
            ProjectionMode::Sphere => Projected {
                pos: Vec2::new(
                    self.center.x + v.x * self.scale_px,
                    self.center.y - v.y * self.scale_px,
                ),
                depth: v.z,
                visible: v.z > self.cutoff,
                alpha: v.z.max(0.0),
            },
            ProjectionMode::Flat => {
                // ra measured so the sphere's front (+z) sits mid-screen
                let ra = v.x.atan2(v.z);
                let dec = v.y.clamp(-1.0, 1.0).asin();
                Projected {
                    pos: Vec2::new(
                        self.center.x + ra * self.scale_px,
                        self.center.y - dec * self.scale_px,
                    ),
                    depth: v.z,
                    visible: true,
                    alpha: ((v.z + 1.0) / 2.0).clamp(0.0, 1.0),
                }
            }
        }
    }

    /// Horizontal jump beyond which two consecutive flat-projected vertices
    /// straddle the ra seam. None for the globe.
    pub fn seam_threshold(&self) -> Option<f32> {
        match self.mode {
            ProjectionMode::Sphere => None,
            ProjectionMode::Flat => Some(self.scale_px * PI),
        }
    }

    /// Split a projected polyline into drawable runs: invisible vertices and
    /// seam crossings both end the current run. Runs of one point are dropped.
    pub fn visible_runs(&self, points: &[Projected]) -> Vec<Vec<Vec2>> {
        let seam = self.seam_threshold();
        let mut runs = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        for p in points {
            if !p.visible {
                flush_run(&mut runs, &mut current);
                continue;
            }
            if let (Some(limit), Some(last)) = (seam, current.last()) {
                if (p.pos.x - last.x).abs() > limit {
                    flush_run(&mut runs, &mut current);
                }
            }
            current.push(p.pos);
        }
        flush_run(&mut runs, &mut current);
        runs
    }
}

fn flush_run(runs: &mut Vec<Vec<Vec2>>, current: &mut Vec<Vec2>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Mean alpha over the visible points, 0 when none are visible.
pub fn mean_visible_alpha(points: &[Projected]) -> f32 {
    let (sum, n) = points
        .iter()
        .filter(|p| p.visible)
        .fold((0.0, 0u32), |(s, n), p| (s + p.alpha, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f32
    }
}
