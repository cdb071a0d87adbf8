mod cli;

use clap::Parser;
use flower_core::{
    transformed_bounds, GpuUniforms, InteractionState, OrbitCamera, ParameterFeed, PointField,
    PointsPipeline, SequenceClock,
};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

const STATS_EVERY_FRAMES: u64 = 600;

struct GpuState<'w> {
    window: &'w Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points: PointsPipeline,
    clear_color: wgpu::Color,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w Window, field: &PointField, clear: [f64; 4]) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let points = PointsPipeline::new(&device, format, field);
        log::info!(
            "[gpu] {} surface {}x{} {:?}",
            adapter.get_info().name,
            config.width,
            config.height,
            format
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            points,
            clear_color: wgpu::Color {
                r: clear[0],
                g: clear[1],
                b: clear[2],
                a: clear[3],
            },
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self, field: &PointField, camera: &OrbitCamera) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let uniforms = GpuUniforms::new(field, camera, self.config.width, self.config.height);
        self.points
            .encode(&self.queue, &mut encoder, &view, self.clear_color, &uniforms);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[derive(Default, Clone, Copy)]
struct DragState {
    active: bool,
    last: Vec2,
}

/// Scroll amount in browser `deltaY` units (positive scrolls down).
fn wheel_delta_y(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * 100.0,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = cli::Cli::parse();
    let config = cli.scene_config()?;
    let timeline = cli.timeline()?;

    let field = Rc::new(RefCell::new(PointField::new(
        config.point_count_for_width(cli.width as f32),
        config.layout,
    )));
    {
        let f = field.borrow();
        if let Some((lo, hi)) = transformed_bounds(f.points(), f.uniforms()) {
            log::info!("[field] initial extent {:?} .. {:?}", lo, hi);
        }
    }
    let mut feed = ParameterFeed::new(timeline);
    {
        let field = field.clone();
        feed.on_values_change(move |snapshot| {
            field.borrow_mut().apply(snapshot);
        });
    }
    let mut clock = SequenceClock::new(feed.source().length(), config.playback);
    let mut camera = config.camera();
    let mut interaction = InteractionState::default();
    let mut drag = DragState::default();
    let mut frames: u64 = 0;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("petal-field (native)")
        .with_inner_size(LogicalSize::new(cli.width, cli.height))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(
        &window,
        &field.borrow(),
        config.clear_color,
    ))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => drag.active = button_state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => {
                let p = Vec2::new(position.x as f32, position.y as f32);
                let size = state.window.inner_size();
                let viewport = Vec2::new(size.width as f32, size.height as f32);
                interaction.on_mouse_move(p, viewport);
                if drag.active {
                    let delta = p - drag.last;
                    camera.rotate_by_drag(delta.x, delta.y, viewport.y);
                }
                drag.last = p;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = wheel_delta_y(delta);
                interaction.on_wheel(dy);
                camera.zoom_by_wheel(dy);
            }
            _ => {}
        },
        Event::AboutToWait => {
            clock.tick();
            feed.advance(clock.position());
            frames += 1;
            if log::log_enabled!(log::Level::Debug) {
                if let Some(line) = stats_line(frames, clock.position(), &interaction) {
                    log::debug!("{}", line);
                }
            }
            match state.render(&field.borrow(), &camera) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("render error: out of memory");
                    elwt.exit()
                }
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}

/// Periodic frame summary, matching the browser host's debug line.
fn stats_line(frames: u64, position: f32, interaction: &InteractionState) -> Option<String> {
    if frames == 0 || frames % STATS_EVERY_FRAMES != 0 {
        return None;
    }
    Some(format!(
        "[frame] n={} pos={:.2}s amplitude={:.2} mouse={:?}",
        frames, position, interaction.amplitude, interaction.mouse
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_lines_scroll_like_browser() {
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, -1.0)), 100.0);
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, 2.0)), -200.0);
    }

    #[test]
    fn stats_line_reports_interaction_every_interval() {
        let mut interaction = InteractionState::default();
        interaction.on_wheel(-300.0);
        assert!(stats_line(1, 0.0, &interaction).is_none());
        assert!(stats_line(STATS_EVERY_FRAMES - 1, 0.0, &interaction).is_none());

        let line = stats_line(STATS_EVERY_FRAMES, 12.5, &interaction).expect("due");
        assert!(line.contains("n=600"));
        assert!(line.contains("pos=12.50s"));
        assert!(line.contains(&format!("amplitude={:.2}", interaction.amplitude)));
    }
}
