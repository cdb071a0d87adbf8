use crate::constants::MAX_FRAME_DT_SEC;
use instant::Instant;
use serde::{Deserialize, Serialize};

/// What happens when the sequence position passes the timeline length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Stop on the last frame.
    #[default]
    Once,
    /// Start over from zero.
    Loop,
}

/// Map a raw time in seconds onto `[0, length]`.
///
/// A zero length means "no known end": the time passes through, floored at 0.
#[inline]
pub fn sequence_position(raw_sec: f32, length: f32, playback: Playback) -> f32 {
    let t = raw_sec.max(0.0);
    if length <= 0.0 {
        return t;
    }
    match playback {
        Playback::Once => t.min(length),
        Playback::Loop => t.rem_euclid(length),
    }
}

/// Frame clock driving the sequence position.
///
/// Runs on wall time until the host reports audio playback, after which the
/// audio position is authoritative so visuals stay on the music.
#[derive(Debug)]
pub struct SequenceClock {
    last_instant: Instant,
    elapsed: f32,
    audio_position: Option<f32>,
    held: bool,
    length: f32,
    playback: Playback,
}

impl SequenceClock {
    pub fn new(length: f32, playback: Playback) -> Self {
        Self {
            last_instant: Instant::now(),
            elapsed: 0.0,
            audio_position: None,
            held: false,
            length,
            playback,
        }
    }

    /// Seconds since the previous tick, clamped to survive suspended tabs.
    /// A held clock still measures the frame but does not advance.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        if !self.held {
            self.elapsed += dt;
        }
        dt
    }

    /// Keep the sequence where it is, e.g. until the soundtrack starts.
    pub fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Report the audio playback position, or `None` when audio is not playing.
    pub fn sync_to_audio(&mut self, audio_sec: Option<f32>) {
        self.audio_position = audio_sec;
        if let Some(t) = audio_sec {
            self.elapsed = t;
        }
    }

    pub fn is_audio_synced(&self) -> bool {
        self.audio_position.is_some()
    }

    pub fn position(&self) -> f32 {
        let raw = self.audio_position.unwrap_or(self.elapsed);
        sequence_position(raw, self.length, self.playback)
    }
}
