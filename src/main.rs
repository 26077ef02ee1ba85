use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser;
use glam::Vec2;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

mod cli;
mod config;
mod content;
mod error;
mod geometry;
mod i18n;
mod renderer;
mod scene;
mod ui;
mod visual;

use cli::Cli;
use config::Config;
use geometry::SurfaceKind;
use i18n::{Locale, tr};
use renderer::{Camera, CameraMode, GpuState};
use scene::{AnimationClock, FrameBatch, MeshEngine, MeshLibrary, MeshResult};
use ui::{UiActions, UiState, apply_theme, draw_help_overlay, draw_panels};
use visual::{Readout, VisualOutput, VisualizationKind};

#[derive(Default)]
struct InputState {
    forward: f32,
    right: f32,
    up: f32,
    mouse_captured: bool,
    mouse_delta: Vec2,
}

struct App {
    config: Config,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    clock: AnimationClock,
    mesh_engine: MeshEngine,
    library: MeshLibrary,
    mesh_error: Option<String>,
    readouts: Vec<Readout>,

    ui_state: UiState,
    input: InputState,

    last_frame: Instant,
    last_vsync_state: bool,
    last_locale: Locale,
    exit_requested: bool,
}

impl App {
    fn new(config: Config) -> Self {
        let mesh_engine = MeshEngine::new();
        for kind in SurfaceKind::ALL {
            let [u, v] = config.mesh.resolution(kind);
            mesh_engine.build(kind, u, v);
        }

        let ui_state = UiState::from_config(&config);

        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            clock: AnimationClock::new(config.animation_speed),
            mesh_engine,
            library: MeshLibrary::default(),
            mesh_error: None,
            readouts: Vec::new(),

            last_vsync_state: ui_state.vsync_enabled,
            last_locale: ui_state.locale,
            ui_state,
            input: InputState::default(),

            last_frame: Instant::now(),
            exit_requested: false,
            config,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> error::Result<()> {
        let gpu = pollster::block_on(GpuState::new(window.clone(), self.ui_state.vsync_enabled))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    /// Diagram of the chapter on screen, if it has one.
    fn active_visualization(&self) -> Option<VisualizationKind> {
        self.ui_state
            .router
            .current()
            .route()
            .and_then(|route| content::chapter(route).visualization())
    }

    fn receive_meshes(&mut self) {
        while let Some(result) = self.mesh_engine.try_recv_result() {
            match result {
                MeshResult::Built { kind, mesh } => {
                    tracing::debug!(?kind, triangles = mesh.triangle_count(), "mesh ready");
                    self.library.insert(kind, mesh);
                }
                MeshResult::Failed { kind, error } => {
                    tracing::error!(?kind, %error, "mesh build failed");
                    self.mesh_error = Some(format!("{kind:?}: {error}"));
                }
            }
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.receive_meshes();

        self.clock.speed = self.ui_state.animation_speed;
        self.clock.advance(dt);

        self.camera.set_mode(self.ui_state.camera_mode);
        self.camera
            .process_keyboard(self.input.forward, self.input.right, self.input.up, dt);
        if self.input.mouse_captured {
            self.camera.process_mouse_movement(self.input.mouse_delta);
        }
        self.input.mouse_delta = Vec2::ZERO;

        let output = match self.active_visualization() {
            Some(kind) => visual::build(kind, self.clock.time(), &self.library, &self.ui_state.view),
            None => VisualOutput::default(),
        };
        self.readouts = output.readouts;

        if let Some(gpu) = &mut self.gpu {
            gpu.upload_batch(&FrameBatch::from_scene(&output.scene));
        }
    }

    fn render(&mut self) {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let mesh_error = self.mesh_error.clone().or_else(|| self.mesh_engine.last_error());
        let loading = mesh_error.is_none() && self.library.len() < SurfaceKind::ALL.len();
        let is_paused = self.clock.paused;
        let readouts = &self.readouts;

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_panels(ctx, &mut self.ui_state, readouts, &mesh_error, loading, is_paused);
            draw_help_overlay(ctx, self.ui_state.locale, self.ui_state.camera_mode);
        });

        self.handle_ui_actions(ui_actions);
        self.sync_locale();

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("out of GPU memory");
                self.exit_requested = true;
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timeout, frame skipped");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_scene(&view, &mut encoder, self.ui_state.show_grid);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.toggle_pause {
            self.toggle_pause();
        }
        if actions.reset_clock {
            self.clock.reset();
        }
        if actions.reset_camera {
            self.reset_camera();
        }
        if let Some(path) = actions.navigate {
            self.ui_state.router.navigate(&path);
            self.clock.reset();
        }
        if actions.back {
            self.go_back();
        }
    }

    fn sync_locale(&mut self) {
        let locale = self.ui_state.locale;
        if locale == self.last_locale {
            return;
        }
        tracing::info!(?locale, "locale changed");
        self.last_locale = locale;
        if let Some(window) = &self.window {
            window.set_title(tr(locale, "app.title"));
        }
    }

    fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
        tracing::debug!(paused = self.clock.paused, time = self.clock.time(), "animation");
    }

    fn reset_camera(&mut self) {
        self.camera.reset();
        self.ui_state.camera_mode = self.camera.mode;
    }

    fn go_back(&mut self) {
        if self.ui_state.router.back() {
            self.clock.reset();
        }
    }

    fn release_cursor(&mut self) {
        self.input.mouse_captured = false;
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.mesh_engine.stop();
        tracing::info!("worker shutdown");
        event_loop.exit();
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let value = if pressed { 1.0 } else { 0.0 };
        let free = self.ui_state.camera_mode == CameraMode::Free;

        match key {
            KeyCode::KeyW => self.input.forward = value,
            KeyCode::KeyS => self.input.forward = -value,
            KeyCode::KeyA => self.input.right = -value,
            KeyCode::KeyD => self.input.right = value,
            KeyCode::Space if free => self.input.up = value,
            KeyCode::ShiftLeft => self.input.up = -value,
            KeyCode::Space | KeyCode::KeyP if pressed => self.toggle_pause(),
            KeyCode::KeyC if pressed => {
                self.ui_state.camera_mode = match self.ui_state.camera_mode {
                    CameraMode::Orbital => CameraMode::Free,
                    CameraMode::Free => CameraMode::Orbital,
                };
            }
            KeyCode::KeyR if pressed => self.reset_camera(),
            KeyCode::Backspace if pressed => self.go_back(),
            KeyCode::Escape if pressed => self.release_cursor(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(tr(self.ui_state.locale, "app.title"))
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "window creation failed");
                self.shutdown(event_loop);
                return;
            }
        };

        if let Err(e) = self.init_gpu(window) {
            tracing::error!(error = %e, "renderer initialisation failed");
            self.shutdown(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera.set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if !event.repeat || event.state == ElementState::Released {
                        self.handle_key(key, event.state == ElementState::Pressed);
                    }
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                if state == ElementState::Pressed {
                    self.input.mouse_captured = true;
                    if let Some(window) = &self.window {
                        let _ = window.set_cursor_grab(CursorGrabMode::Confined);
                        window.set_cursor_visible(false);
                    }
                } else {
                    self.release_cursor();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                if self.exit_requested {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: winit::event::DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.mouse_captured {
                self.input.mouse_delta.x += delta.0 as f32;
                self.input.mouse_delta.y += delta.1 as f32;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// `RUST_LOG` directives when they parse, otherwise `info` for everything.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    config.apply_overrides(&cli);
    config.validate()?;

    if cli.write_config {
        config.save(&cli.config)?;
        tracing::info!(path = %cli.config.display(), "config written");
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn log_level_follows_rust_log() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }
}
