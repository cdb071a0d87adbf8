use crate::constants::*;
use glam::{Vec2, Vec3};

/// Cosine palette: `a + b * cos(2π * (c * t + d))`.
#[inline]
pub fn palette(t: f32, a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Vec3 {
    let phase = (c * t + d) * TAU_APPROX;
    a + b * Vec3::new(phase.x.cos(), phase.y.cos(), phase.z.cos())
}

/// Colour of a fragment belonging to a point displaced to `position`.
#[inline]
pub fn flower_color(position: Vec3, progression: f32) -> Vec3 {
    palette(
        position.length() - progression * PALETTE_PROGRESSION_SHIFT,
        Vec3::from_array(PALETTE_A),
        Vec3::from_array(PALETTE_B),
        Vec3::from_array(PALETTE_C),
        Vec3::from_array(PALETTE_D),
    )
}

/// Whether a sprite fragment survives the round-dot cut.
///
/// `point_coord` is in `[0, 1]²` with the sprite centre at `(0.5, 0.5)`.
#[inline]
pub fn keeps_fragment(point_coord: Vec2) -> bool {
    point_coord.distance(Vec2::splat(0.5)) <= SPRITE_DISCARD_RADIUS
}
