//! Parameter snapshot consumed by the point field each frame.
//!
//! The snapshot mirrors the animated object tree of the project state:
//! `uniforms.*` feed the petal shader, `size` and `transforms.*` place the
//! whole field. Values are never clamped; the shader tolerates any finite
//! input (including ones that send `tan()` towards infinity).

use crate::constants::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Shader-facing scalars, laid out for direct upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowerUniforms {
    #[serde(rename = "uProgression")]
    pub progression: f32,
    #[serde(rename = "uDegreeA")]
    pub degree_a: f32,
    #[serde(rename = "uDegreeB")]
    pub degree_b: f32,
    #[serde(rename = "uDegreeC")]
    pub degree_c: f32,
    #[serde(rename = "uDegreeD")]
    pub degree_d: f32,
    #[serde(rename = "uDegreeE")]
    pub degree_e: f32,
}

impl Default for FlowerUniforms {
    fn default() -> Self {
        Self {
            progression: DEFAULT_PROGRESSION,
            degree_a: DEFAULT_DEGREE_A,
            degree_b: DEFAULT_DEGREE_B,
            degree_c: DEFAULT_DEGREE_C,
            degree_d: DEFAULT_DEGREE_D,
            degree_e: DEFAULT_DEGREE_E,
        }
    }
}

/// Rigid placement of the whole field. Rotation is Euler XYZ in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transforms {
    #[serde(with = "xyz")]
    pub position: Vec3,
    #[serde(with = "xyz")]
    pub rotation: Vec3,
}

/// Complete set of parameter values at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSnapshot {
    pub uniforms: FlowerUniforms,
    pub size: f32,
    pub transforms: Transforms,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            uniforms: FlowerUniforms::default(),
            size: DEFAULT_SIZE,
            transforms: Transforms::default(),
        }
    }
}

impl ParameterSnapshot {
    pub fn is_finite(&self) -> bool {
        ParamPath::ALL.iter().all(|p| p.get(self).is_finite())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    fn of_mut(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }
}

/// Address of one animatable scalar inside a [`ParameterSnapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamPath {
    Progression,
    DegreeA,
    DegreeB,
    DegreeC,
    DegreeD,
    DegreeE,
    Size,
    Position(Axis),
    Rotation(Axis),
}

impl ParamPath {
    pub const ALL: [ParamPath; 13] = [
        ParamPath::Progression,
        ParamPath::DegreeA,
        ParamPath::DegreeB,
        ParamPath::DegreeC,
        ParamPath::DegreeD,
        ParamPath::DegreeE,
        ParamPath::Size,
        ParamPath::Position(Axis::X),
        ParamPath::Position(Axis::Y),
        ParamPath::Position(Axis::Z),
        ParamPath::Rotation(Axis::X),
        ParamPath::Rotation(Axis::Y),
        ParamPath::Rotation(Axis::Z),
    ];

    /// Parse a dotted path such as `uniforms.uDegreeC` or `transforms.rotation.y`.
    pub fn parse(path: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == path)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParamPath::Progression => "uniforms.uProgression",
            ParamPath::DegreeA => "uniforms.uDegreeA",
            ParamPath::DegreeB => "uniforms.uDegreeB",
            ParamPath::DegreeC => "uniforms.uDegreeC",
            ParamPath::DegreeD => "uniforms.uDegreeD",
            ParamPath::DegreeE => "uniforms.uDegreeE",
            ParamPath::Size => "size",
            ParamPath::Position(Axis::X) => "transforms.position.x",
            ParamPath::Position(Axis::Y) => "transforms.position.y",
            ParamPath::Position(Axis::Z) => "transforms.position.z",
            ParamPath::Rotation(Axis::X) => "transforms.rotation.x",
            ParamPath::Rotation(Axis::Y) => "transforms.rotation.y",
            ParamPath::Rotation(Axis::Z) => "transforms.rotation.z",
        }
    }

    pub fn get(self, s: &ParameterSnapshot) -> f32 {
        match self {
            ParamPath::Progression => s.uniforms.progression,
            ParamPath::DegreeA => s.uniforms.degree_a,
            ParamPath::DegreeB => s.uniforms.degree_b,
            ParamPath::DegreeC => s.uniforms.degree_c,
            ParamPath::DegreeD => s.uniforms.degree_d,
            ParamPath::DegreeE => s.uniforms.degree_e,
            ParamPath::Size => s.size,
            ParamPath::Position(a) => a.of(s.transforms.position),
            ParamPath::Rotation(a) => a.of(s.transforms.rotation),
        }
    }

    pub fn set(self, s: &mut ParameterSnapshot, value: f32) {
        let slot = match self {
            ParamPath::Progression => &mut s.uniforms.progression,
            ParamPath::DegreeA => &mut s.uniforms.degree_a,
            ParamPath::DegreeB => &mut s.uniforms.degree_b,
            ParamPath::DegreeC => &mut s.uniforms.degree_c,
            ParamPath::DegreeD => &mut s.uniforms.degree_d,
            ParamPath::DegreeE => &mut s.uniforms.degree_e,
            ParamPath::Size => &mut s.size,
            ParamPath::Position(a) => a.of_mut(&mut s.transforms.position),
            ParamPath::Rotation(a) => a.of_mut(&mut s.transforms.rotation),
        };
        *slot = value;
    }
}

/// Anything that can answer "what are the parameters at this sequence position".
pub trait ParameterSource {
    fn snapshot_at(&self, position: f32) -> ParameterSnapshot;
}

/// A fixed snapshot is a valid (static) source.
impl ParameterSource for ParameterSnapshot {
    fn snapshot_at(&self, _position: f32) -> ParameterSnapshot {
        *self
    }
}

// `{x, y, z}` objects as used by the project state, rather than glam's array form.
mod xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize, Default)]
    #[serde(default)]
    struct Xyz {
        x: f32,
        y: f32,
        z: f32,
    }

    pub(super) fn serialize<S: Serializer>(v: &Vec3, s: S) -> Result<S::Ok, S::Error> {
        Xyz {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec3, D::Error> {
        let v = Xyz::deserialize(d)?;
        Ok(Vec3::new(v.x, v.y, v.z))
    }
}
