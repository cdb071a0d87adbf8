//! Soundtrack playback through WebAudio. The sequence clock follows the
//! context's `currentTime` once the track starts.

use anyhow::anyhow;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Fetch and decode the soundtrack at `url`, resolving once it can play.
pub async fn attach(url: &str, looping: bool) -> anyhow::Result<Soundtrack> {
    Soundtrack::load(url, looping).await
}

pub struct Soundtrack {
    ctx: web::AudioContext,
    buffer: web::AudioBuffer,
    source: Option<web::AudioBufferSourceNode>,
    started_at: Option<f64>,
    looping: bool,
}

impl Soundtrack {
    /// Fetch and decode `url`. Nothing plays until [`Soundtrack::play`].
    pub async fn load(url: &str, looping: bool) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let ctx = web::AudioContext::new().map_err(js_err)?;

        let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !resp.ok() {
            anyhow::bail!("fetch {} failed: HTTP {}", url, resp.status());
        }
        let bytes: js_sys::ArrayBuffer =
            JsFuture::from(resp.array_buffer().map_err(js_err)?)
                .await
                .map_err(js_err)?
                .dyn_into()
                .map_err(js_err)?;
        let buffer: web::AudioBuffer =
            JsFuture::from(ctx.decode_audio_data(&bytes).map_err(js_err)?)
                .await
                .map_err(js_err)?
                .dyn_into()
                .map_err(js_err)?;
        log::info!(
            "[audio] music ready: {:.1}s, {} ch @ {} Hz",
            buffer.duration(),
            buffer.number_of_channels(),
            buffer.sample_rate()
        );

        Ok(Self {
            ctx,
            buffer,
            source: None,
            started_at: None,
            looping,
        })
    }

    /// Start from the beginning. Must run inside a user gesture on most browsers.
    pub fn play(&mut self) -> anyhow::Result<()> {
        if self.source.is_some() {
            return Ok(());
        }
        let _ = self.ctx.resume();
        let src = self.ctx.create_buffer_source().map_err(js_err)?;
        src.set_buffer(Some(&self.buffer));
        src.set_loop(self.looping);
        src.connect_with_audio_node(&self.ctx.destination())
            .map_err(js_err)?;
        src.start().map_err(js_err)?;
        self.started_at = Some(self.ctx.current_time());
        self.source = Some(src);
        log::info!("[audio] playback started");
        Ok(())
    }

    /// Seconds into the track, or `None` while nothing is audibly playing.
    pub fn position(&self) -> Option<f32> {
        let t0 = self.started_at?;
        // A suspended context freezes currentTime.
        if self.ctx.state() != web::AudioContextState::Running {
            return None;
        }
        let elapsed = (self.ctx.current_time() - t0).max(0.0);
        let duration = self.buffer.duration();
        let pos = if self.looping && duration > 0.0 {
            elapsed % duration
        } else {
            elapsed.min(duration)
        };
        Some(pos as f32)
    }
}

/// Soundtrack shared between the loader, the start overlay and the frame loop.
/// A start click that lands before decoding finishes is remembered.
#[derive(Default)]
pub struct AudioSlot {
    pub track: Option<Soundtrack>,
    pub play_requested: bool,
    pub failed: bool,
    heard: bool,
}

impl AudioSlot {
    /// The sequence waits at its start until the click, then until the
    /// soundtrack is first audible. A failed load releases it onto wall time,
    /// and a later suspend does not hold it again.
    pub fn holds_sequence(&mut self) -> bool {
        self.heard |= self.position().is_some();
        !self.heard && !(self.play_requested && self.failed)
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    pub fn request_play(&mut self) {
        self.play_requested = true;
        self.try_play();
    }

    pub fn install(&mut self, track: Soundtrack) {
        self.track = Some(track);
        self.try_play();
    }

    pub fn position(&self) -> Option<f32> {
        self.track.as_ref().and_then(Soundtrack::position)
    }

    fn try_play(&mut self) {
        if !self.play_requested {
            return;
        }
        if let Some(track) = self.track.as_mut() {
            if let Err(e) = track.play() {
                log::warn!("[audio] playback failed: {:?}", e);
                self.failed = true;
            }
        }
    }
}
