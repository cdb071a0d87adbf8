use crate::clock::Playback;
use crate::constants::*;
use crate::error::{FlowerError, Result};
use crate::field::PointLayout;
use serde::{Deserialize, Serialize};

/// Host-independent scene settings. Every field has a default, so an empty
/// JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub layout: PointLayout,
    /// Overrides the width-derived point count when set.
    pub point_count: Option<usize>,
    pub playback: Playback,
    pub clear_color: [f64; 4],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    pub audio_url: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: PointLayout::default(),
            point_count: None,
            playback: Playback::default(),
            clear_color: CLEAR_COLOR,
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            camera_distance: CAMERA_DISTANCE,
            audio_url: None,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(FlowerError::Config(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(FlowerError::Config(format!(
                "need 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if !(self.camera_distance > 0.0) {
            return Err(FlowerError::Config(format!(
                "camera_distance must be positive, got {}",
                self.camera_distance
            )));
        }
        if self.point_count == Some(0) {
            return Err(FlowerError::Config("point_count must be non-zero".into()));
        }
        Ok(())
    }

    /// Orbit camera matching these settings.
    pub fn camera(&self) -> crate::camera::OrbitCamera {
        crate::camera::OrbitCamera {
            distance: self.camera_distance,
            fovy_radians: self.fov_degrees.to_radians(),
            znear: self.near,
            zfar: self.far,
            ..Default::default()
        }
    }

    /// Point count for a viewport of the given CSS width.
    pub fn point_count_for_width(&self, width: f32) -> usize {
        self.point_count
            .unwrap_or_else(|| crate::field::point_count_for_width(width))
    }
}
