#![cfg(target_arch = "wasm32")]
mod audio;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use anyhow::anyhow;
use audio::AudioSlot;
use flower_core::{
    InteractionState, ParameterFeed, PointField, SceneConfig, SequenceClock, Timeline,
    DEFAULT_STATE_JSON,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const DEFAULT_AUDIO_URL: &str = "music/kai-engel-snowmen.mp3";

const CREDITS: [&str; 2] = [
    "Original artwork by Toshiya Marukubo -> https://toshiya-marukubo.github.io",
    "Music by Kai Engel -> https://twitter.com/KaiEngelMusic | https://freemusicarchive.org/music/Kai_Engel",
];

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flower-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Scene settings from the canvas' optional `data-config` JSON attribute.
fn scene_config(canvas: &web::HtmlCanvasElement) -> SceneConfig {
    let Some(json) = canvas.get_attribute("data-config") else {
        return SceneConfig::default();
    };
    SceneConfig::from_json(&json).unwrap_or_else(|e| {
        log::warn!("[config] ignoring data-config: {}", e);
        SceneConfig::default()
    })
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!(format!("{:?}", e)))?;
    events::wire_canvas_resize(&window, &canvas);

    let config = scene_config(&canvas);
    let timeline = Timeline::from_json(DEFAULT_STATE_JSON)?;
    let (viewport_w, _) = dom::viewport_size();
    let field = Rc::new(RefCell::new(PointField::new(
        config.point_count_for_width(viewport_w),
        config.layout,
    )));

    // WebGPU surface needs a 'static canvas.
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(leaked_canvas, &field.borrow(), config.clear_color)
        .await
        .map_err(|e| anyhow!("WebGPU init error: {:?}", e))?;

    let mut feed = ParameterFeed::new(timeline);
    {
        let field = field.clone();
        feed.on_values_change(move |snapshot| {
            field.borrow_mut().apply(snapshot);
        });
    }
    let clock = SequenceClock::new(feed.source().length(), config.playback);

    let camera = Rc::new(RefCell::new(config.camera()));
    let interaction = Rc::new(RefCell::new(InteractionState::default()));
    events::wire_mouse(&window, interaction.clone());
    events::wire_wheel(&canvas, interaction.clone(), camera.clone());
    events::wire_touch(&canvas, interaction.clone());
    events::wire_orbit_drag(&canvas, camera.clone());

    let audio = Rc::new(RefCell::new(AudioSlot::default()));
    {
        let audio = audio.clone();
        let document = document.clone();
        let url = config
            .audio_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AUDIO_URL.to_string());
        let looping = config.playback == flower_core::Playback::Loop;
        spawn_local(async move {
            match audio::attach(&url, looping).await {
                Ok(track) => audio.borrow_mut().install(track),
                Err(e) => {
                    log::warn!("[audio] {} unavailable, running unsynced: {:?}", url, e);
                    audio.borrow_mut().mark_failed();
                    overlay::set_status(&document, "Audio unavailable");
                }
            }
        });
    }
    {
        let audio = audio.clone();
        let document_click = document.clone();
        dom::add_click_listener(&document, "overlay-start", move || {
            audio.borrow_mut().request_play();
            overlay::hide(&document_click);
        });
    }
    overlay::show(&document);

    for line in CREDITS {
        log::info!("{}", line);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        field,
        feed,
        clock,
        camera,
        interaction,
        audio,
        canvas,
        gpu: Some(gpu),
        frames: 0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
