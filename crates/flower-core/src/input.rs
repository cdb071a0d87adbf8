//! Pointer, wheel and touch state.
//!
//! None of this feeds the petal transform yet; the values are tracked so
//! interactive variants can read them without rewiring the hosts.

use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionState {
    pub amplitude: f32,
    /// Normalized device coordinates from mouse moves, raw client px from touches.
    pub mouse: Option<Vec2>,
    pub touch_start: Option<Vec2>,
    pub touch_move: Option<Vec2>,
    pub touch_end: Option<Vec2>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            amplitude: INITIAL_AMPLITUDE,
            mouse: Some(Vec2::ZERO),
            touch_start: Some(Vec2::ZERO),
            touch_move: Some(Vec2::ZERO),
            touch_end: Some(Vec2::ZERO),
        }
    }
}

/// Client pixel coordinates to normalized device coordinates (+Y up).
#[inline]
pub fn client_to_ndc(client: Vec2, viewport: Vec2) -> Vec2 {
    let w = viewport.x.max(1.0);
    let h = viewport.y.max(1.0);
    Vec2::new((client.x / w) * 2.0 - 1.0, -(client.y / h) * 2.0 + 1.0)
}

impl InteractionState {
    pub fn on_mouse_move(&mut self, client: Vec2, viewport: Vec2) {
        self.mouse = Some(client_to_ndc(client, viewport));
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.amplitude += delta_y * WHEEL_AMPLITUDE_FACTOR;
    }

    pub fn on_touch_start(&mut self, page: Vec2) {
        self.touch_start = Some(page);
    }

    pub fn on_touch_move(&mut self, page: Vec2, client: Vec2) {
        self.touch_move = Some(page);
        // A move without a recorded start drags from the origin.
        let start = self.touch_start.unwrap_or(Vec2::ZERO);
        let delta = start - page;
        self.touch_end = Some(delta);
        self.amplitude += delta.y * TOUCH_AMPLITUDE_FACTOR;
        self.mouse = Some(client);
    }

    pub fn on_touch_end(&mut self) {
        self.touch_start = None;
        self.touch_move = None;
        self.touch_end = None;
        self.mouse = None;
    }
}
