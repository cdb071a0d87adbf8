use crate::audio::AudioSlot;
use crate::render;
use flower_core::{
    transformed_bounds, InteractionState, OrbitCamera, ParameterFeed, PointField, SequenceClock,
    Timeline,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const STATS_EVERY_FRAMES: u64 = 600;

pub struct FrameContext<'a> {
    pub field: Rc<RefCell<PointField>>,
    pub feed: ParameterFeed<Timeline>,
    pub clock: SequenceClock,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub interaction: Rc<RefCell<InteractionState>>,
    pub audio: Rc<RefCell<AudioSlot>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub frames: u64,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        {
            let mut audio = self.audio.borrow_mut();
            self.clock.set_held(audio.holds_sequence());
            self.clock.tick();
            self.clock.sync_to_audio(audio.position());
        }
        // Subscribers write into `field`.
        self.feed.advance(self.clock.position());

        self.frames += 1;
        if self.frames % STATS_EVERY_FRAMES == 0 && log::log_enabled!(log::Level::Debug) {
            let inter = self.interaction.borrow();
            let field = self.field.borrow();
            let extent = transformed_bounds(field.points(), field.uniforms())
                .map(|(lo, hi)| hi - lo);
            log::debug!(
                "[frame] n={} pos={:.2}s audio={} held={} amplitude={:.2} extent={:?}",
                self.frames,
                self.clock.position(),
                self.clock.is_audio_synced(),
                self.clock.is_held(),
                inter.amplitude,
                extent
            );
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let result = g.render(&self.field.borrow(), &self.camera.borrow());
            match result {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("render error: out of memory, stopping renderer");
                    self.gpu = None;
                }
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
