//! Orbiting perspective camera shared by the web and native hosts.
//!
//! The eye sits on a sphere around `target`; yaw turns around +Y, pitch
//! tilts towards the poles. With zero yaw and pitch the eye is on +Z.

use crate::constants::*;
use glam::{Mat4, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: CAMERA_TARGET,
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_DISTANCE,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-4), self.znear, self.zfar)
    }

    /// Rotate by a pointer drag of `(dx, dy)` pixels on a viewport `height` px tall.
    pub fn rotate_by_drag(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.yaw -= ORBIT_ROTATE_SPEED * dx / h;
        self.pitch = (self.pitch + ORBIT_ROTATE_SPEED * dy / h)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Dolly in (negative delta) or out (positive delta) like a scroll wheel.
    pub fn zoom_by_wheel(&mut self, delta_y: f32) {
        let factor = ORBIT_ZOOM_BASE.powf(-delta_y / 100.0);
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}
