//! Keyframe timeline: the shipped [`ParameterSource`].
//!
//! A timeline is a static base snapshot plus one keyframe track per animated
//! parameter path. It is loaded from the serialized project state bundled
//! with the app:
//!
//! ```json
//! {
//!   "length": 120.0,
//!   "staticOverrides": { "uniforms": { "uDegreeC": 12.0 }, "size": 1.0 },
//!   "tracks": {
//!     "uniforms.uProgression": [
//!       { "position": 0.0, "value": 0.0, "easing": "ease_in_out" },
//!       { "position": 30.0, "value": 3.2 }
//!     ]
//!   }
//! }
//! ```

use crate::error::{FlowerError, Result};
use crate::params::{ParamPath, ParameterSnapshot, ParameterSource};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const SOLVE_EPSILON: f32 = 1e-6;

/// Interpolation applied from a keyframe towards the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Keep the key's value until the next key.
    Hold,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier([f32; 4]),
}

impl Easing {
    /// Map normalized progress `u ∈ [0, 1]` between two keys.
    pub fn apply(self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Easing::Linear => u,
            Easing::Hold => 0.0,
            Easing::EaseIn => cubic_bezier([0.42, 0.0, 1.0, 1.0], u),
            Easing::EaseOut => cubic_bezier([0.0, 0.0, 0.58, 1.0], u),
            Easing::EaseInOut => cubic_bezier([0.42, 0.0, 0.58, 1.0], u),
            Easing::CubicBezier(handles) => cubic_bezier(handles, u),
        }
    }
}

#[inline]
fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Evaluate a unit cubic bezier easing at `x`, solving for the curve parameter first.
pub fn cubic_bezier(handles: [f32; 4], x: f32) -> f32 {
    let [x1, y1, x2, y2] = handles;
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut t = x;
    let mut solved = false;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier(t, x1, x2) - x;
        if err.abs() < SOLVE_EPSILON {
            solved = true;
            break;
        }
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < SOLVE_EPSILON {
            break;
        }
        t -= err / slope;
    }
    if !solved || !(0.0..=1.0).contains(&t) {
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let v = bezier(t, x1, x2);
            if (v - x).abs() < SOLVE_EPSILON {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
    }
    bezier(t, y1, y2)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub position: f32,
    pub value: f32,
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(position: f32, value: f32, easing: Easing) -> Self {
        Self {
            position,
            value,
            easing,
        }
    }
}

/// Keyframes for one parameter, sorted by position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    keys: SmallVec<[Keyframe; 8]>,
}

impl Track {
    /// Sorts the keys; keys sharing a position keep their input order.
    pub fn from_keys(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keys: SmallVec<[Keyframe; 8]> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn last_position(&self) -> Option<f32> {
        self.keys.last().map(|k| k.position)
    }

    /// Value at `position`, or `None` for an empty track.
    ///
    /// Before the first key the first value holds, after the last key the
    /// last value holds. Between keys the left key's easing shapes the blend.
    pub fn sample(&self, position: f32) -> Option<f32> {
        let first = self.keys.first()?;
        let idx = self.keys.partition_point(|k| k.position <= position);
        if idx == 0 {
            return Some(first.value);
        }
        let prev = &self.keys[idx - 1];
        let Some(next) = self.keys.get(idx) else {
            return Some(prev.value);
        };
        let span = next.position - prev.position;
        let u = prev.easing.apply((position - prev.position) / span);
        Some(prev.value + (next.value - prev.value) * u)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectState {
    #[serde(default)]
    length: Option<f32>,
    #[serde(default)]
    static_overrides: ParameterSnapshot,
    #[serde(default)]
    tracks: FnvHashMap<String, Vec<Keyframe>>,
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    base: ParameterSnapshot,
    tracks: Vec<(ParamPath, Track)>,
    length: Option<f32>,
}

impl Timeline {
    pub fn new(base: ParameterSnapshot) -> Self {
        Self {
            base,
            tracks: Vec::new(),
            length: None,
        }
    }

    /// Add or replace the track animating `path`.
    pub fn with_track(mut self, path: ParamPath, track: Track) -> Self {
        self.tracks.retain(|(p, _)| *p != path);
        self.tracks.push((path, track));
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = Some(length);
        self
    }

    /// Parse the serialized project state.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: ProjectState = serde_json::from_str(json)?;

        for path in ParamPath::ALL {
            if !path.get(&state.static_overrides).is_finite() {
                return Err(FlowerError::NonFiniteValue {
                    path: path.as_str().to_string(),
                    position: 0.0,
                });
            }
        }
        if let Some(len) = state.length {
            if !(len >= 0.0) {
                return Err(FlowerError::NegativeLength(len));
            }
        }

        let mut timeline = Self::new(state.static_overrides);
        timeline.length = state.length;
        // Sort by path so evaluation order does not depend on hash order.
        let mut raw: Vec<(String, Vec<Keyframe>)> = state.tracks.into_iter().collect();
        raw.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, keys) in raw {
            let path = ParamPath::parse(&name).ok_or_else(|| FlowerError::UnknownParameter(name.clone()))?;
            if let Some(bad) = keys
                .iter()
                .find(|k| !k.position.is_finite() || !k.value.is_finite())
            {
                return Err(FlowerError::NonFiniteValue {
                    path: name,
                    position: bad.position,
                });
            }
            timeline = timeline.with_track(path, Track::from_keys(keys));
        }

        log::info!(
            "[timeline] loaded {} tracks, length {:.2}s",
            timeline.tracks.len(),
            timeline.length()
        );
        Ok(timeline)
    }

    pub fn base(&self) -> &ParameterSnapshot {
        &self.base
    }

    pub fn track(&self, path: ParamPath) -> Option<&Track> {
        self.tracks.iter().find(|(p, _)| *p == path).map(|(_, t)| t)
    }

    /// Explicit sequence length, or the position of the last keyframe.
    pub fn length(&self) -> f32 {
        self.length.unwrap_or_else(|| {
            self.tracks
                .iter()
                .filter_map(|(_, t)| t.last_position())
                .fold(0.0, f32::max)
        })
    }
}

impl ParameterSource for Timeline {
    fn snapshot_at(&self, position: f32) -> ParameterSnapshot {
        let mut snapshot = self.base;
        for (path, track) in &self.tracks {
            if let Some(v) = track.sample(position) {
                path.set(&mut snapshot, v);
            }
        }
        snapshot
    }
}
