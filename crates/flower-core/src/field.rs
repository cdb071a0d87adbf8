//! The point field: a fixed ring of points plus the uniform set and rigid
//! transform that the renderer reads every frame.

use crate::constants::*;
use crate::params::{FlowerUniforms, ParameterSnapshot};
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// How the ring of points is laid out at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointLayout {
    /// Angle stepped by `3 · 2π/N`: the ring is walked three times and,
    /// when `N` is a multiple of three, points land on `N/3` distinct angles.
    #[default]
    Legacy,
    /// Exactly `N` points evenly spaced around the circle.
    Uniform,
}

/// Number of points for a viewport of the given CSS width.
#[inline]
pub fn point_count_for_width(width: f32) -> usize {
    if width < NARROW_VIEWPORT_WIDTH {
        SMALL_POINT_COUNT
    } else {
        LARGE_POINT_COUNT
    }
}

/// Flat `x, y, z` buffer of `count` points on the unit circle, `z = atan2(y, x)`.
pub fn generate_points(count: usize, layout: PointLayout) -> Vec<f32> {
    let mut vertices = vec![0.0_f32; count * 3];
    if count == 0 {
        return vertices;
    }
    // Computed in f64 and narrowed on store, as a Float32Array would.
    let step = std::f64::consts::TAU / count as f64;
    let stride = match layout {
        PointLayout::Legacy => LEGACY_ANGLE_STRIDE,
        PointLayout::Uniform => 1,
    };
    // The legacy loop ran to `count * 3` but writes past the buffer were
    // dropped, so only the first `count` iterations ever landed.
    for (i, v) in vertices.chunks_exact_mut(3).enumerate() {
        let rad = step * (i * stride) as f64;
        let (y, x) = rad.sin_cos();
        v[0] = x as f32;
        v[1] = y as f32;
        v[2] = y.atan2(x) as f32;
    }
    vertices
}

/// Position, Euler rotation and uniform scale applied to the whole field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: DEFAULT_SIZE,
        }
    }
}

impl RigidTransform {
    /// `T · R · S`, rotation applied as X then Y then Z (intrinsic XYZ).
    pub fn model_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rot, self.position)
    }
}

pub struct PointField {
    count: usize,
    vertices: Vec<f32>,
    uniforms: FlowerUniforms,
    transform: RigidTransform,
}

impl PointField {
    pub fn new(count: usize, layout: PointLayout) -> Self {
        log::info!("[field] building {} points ({:?} layout)", count, layout);
        Self {
            count,
            vertices: generate_points(count, layout),
            uniforms: FlowerUniforms::default(),
            transform: RigidTransform::default(),
        }
    }

    /// Size the field from the viewport width, once.
    pub fn for_viewport(width: f32, layout: PointLayout) -> Self {
        Self::new(point_count_for_width(width), layout)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Points as `[x, y, z]` triples.
    #[inline]
    pub fn points(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn uniforms(&self) -> &FlowerUniforms {
        &self.uniforms
    }

    #[inline]
    pub fn transform(&self) -> &RigidTransform {
        &self.transform
    }

    /// Copy a snapshot into the field's uniforms and rigid transform.
    ///
    /// This is the only writer of the field's per-frame state. Returns
    /// `false` when the snapshot was already applied.
    pub fn apply(&mut self, snapshot: &ParameterSnapshot) -> bool {
        let transform = RigidTransform {
            position: snapshot.transforms.position,
            rotation: snapshot.transforms.rotation,
            scale: snapshot.size,
        };
        if self.uniforms == snapshot.uniforms && self.transform == transform {
            return false;
        }
        self.uniforms = snapshot.uniforms;
        self.transform = transform;
        true
    }
}

impl std::fmt::Debug for PointField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointField")
            .field("count", &self.count)
            .field("uniforms", &self.uniforms)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}
