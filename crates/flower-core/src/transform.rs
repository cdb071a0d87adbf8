//! CPU reference of the per-point petal distortion.
//!
//! `shaders/flower.wgsl` evaluates the same expressions on the GPU; keep the
//! two in lockstep. `z` of the input is the point's phase (`atan2(y, x)` at
//! construction), not a depth.

use crate::constants::POINT_SIZE_SCALE;
use crate::params::FlowerUniforms;
use glam::Vec3;

/// Displace one point of the field for the given uniforms.
#[inline]
pub fn petal_transform(pos: Vec3, u: &FlowerUniforms) -> Vec3 {
    let angle = u.progression * u.degree_a;
    let (s, c) = angle.sin_cos();
    let rx = pos.x * c - pos.y * s;
    let ry = pos.x * s + pos.y * c;

    let q = ((pos.z * (u.progression * u.degree_b).sin() * u.degree_c).cos() - u.progression).sin();

    Vec3::new(
        rx * q,
        ry * q,
        (u.progression * u.degree_a * q).tan() * u.degree_d,
    )
}

/// Sprite diameter in framebuffer pixels for a point at view-space depth `view_z`.
///
/// `view_z` is negative in front of the camera. Points at or behind the eye
/// give zero or negative sizes, which the rasterizer culls.
#[inline]
pub fn point_size(degree_e: f32, view_z: f32) -> f32 {
    POINT_SIZE_SCALE * (degree_e / -view_z)
}

/// Axis-aligned bounds of the displaced field, ignoring non-finite points.
///
/// Returns `None` when no point is finite (e.g. every `tan()` diverged).
pub fn transformed_bounds(points: &[[f32; 3]], u: &FlowerUniforms) -> Option<(Vec3, Vec3)> {
    let mut bounds: Option<(Vec3, Vec3)> = None;
    for p in points {
        let t = petal_transform(Vec3::from_array(*p), u);
        if !t.is_finite() {
            continue;
        }
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
            None => (t, t),
        });
    }
    bounds
}
