use glam::Vec3;

// Shared visual tuning constants used by both web and native frontends.

// Field sizing
pub const NARROW_VIEWPORT_WIDTH: f32 = 500.0; // below this the small field is used
pub const SMALL_POINT_COUNT: usize = 5_000;
pub const LARGE_POINT_COUNT: usize = 20_000;
pub const LEGACY_ANGLE_STRIDE: usize = 3; // legacy ring steps the angle by 3 slots per point

// Sprite shape
pub const POINT_SIZE_SCALE: f32 = 2.0; // gl_PointSize = scale * (degreeE / -view_z)
pub const SPRITE_DISCARD_RADIUS: f32 = 0.1; // in point-coord units, center at (0.5, 0.5)
pub const TAU_APPROX: f32 = 6.28318; // the palette shader uses this truncated 2π

// Cosine palette vectors
pub const PALETTE_A: [f32; 3] = [0.5, 0.5, 0.5];
pub const PALETTE_B: [f32; 3] = [0.5, 0.5, 0.5];
pub const PALETTE_C: [f32; 3] = [1.0, 1.0, 1.0];
pub const PALETTE_D: [f32; 3] = [0.0, 0.33, 0.67];
pub const PALETTE_PROGRESSION_SHIFT: f32 = 0.5; // t = |pos| - progression * shift

// Default parameter values (initial timeline object state)
pub const DEFAULT_PROGRESSION: f32 = 0.3;
pub const DEFAULT_DEGREE_A: f32 = 0.3;
pub const DEFAULT_DEGREE_B: f32 = 0.1;
pub const DEFAULT_DEGREE_C: f32 = 12.0;
pub const DEFAULT_DEGREE_D: f32 = 0.1;
pub const DEFAULT_DEGREE_E: f32 = 16.0;
pub const DEFAULT_SIZE: f32 = 1.0;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 2.0; // eye sits on +Z looking at the origin
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

// Orbit controls
pub const ORBIT_ROTATE_SPEED: f32 = std::f32::consts::TAU; // full turn per viewport height dragged
pub const ORBIT_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
pub const ORBIT_ZOOM_BASE: f32 = 0.95; // distance factor per 100 wheel units
pub const ORBIT_MIN_DISTANCE: f32 = 0.1;
pub const ORBIT_MAX_DISTANCE: f32 = 100.0;

// Interaction (inert: tracked but not consumed by the transform)
pub const INITIAL_AMPLITUDE: f32 = 10.0;
pub const WHEEL_AMPLITUDE_FACTOR: f32 = 0.06;
pub const TOUCH_AMPLITUDE_FACTOR: f32 = 0.05;

// Clock
pub const MAX_FRAME_DT_SEC: f32 = 0.25; // clamp after tab suspension

// Surface
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
