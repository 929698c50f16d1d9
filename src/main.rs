//! Swarmfield - ambient particle background
//!
//! Opens a window and animates a drifting, loosely connected particle field
//! over a dark background.

use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use swarmfield::config::AppConfig;
use swarmfield::systems::{
    FieldSystem, FrameStats, RenderError, RenderSystem, WindowSystem, WinitHost,
};
use swarmfield_core::FieldParams;
use swarmfield_render::PixelSurface;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    /// None when the GPU could not be initialized
    render: Option<RenderSystem>,
    field: Option<FieldSystem>,
    stats: FrameStats,
}

impl App {
    fn new() -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let interval = Duration::try_from_secs_f32(config.debug.stats_interval_secs)
            .unwrap_or(Duration::from_secs(1));
        let stats = FrameStats::new(interval, Instant::now());

        Self {
            config,
            window: None,
            render: None,
            field: None,
            stats,
        }
    }

    /// Set up GPU presentation and mount the field onto the window
    fn attach(&mut self, window: &WindowSystem) {
        let render = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::warn!("{}; running without animation", e);
                return;
            }
        };

        let params = self.config.field.to_params().unwrap_or_else(|e| {
            log::warn!("{}. Using default field parameters.", e);
            FieldParams::default()
        });

        let redraw_target = window.window().clone();
        let mut field = FieldSystem::new(WinitHost::new(move || redraw_target.request_redraw()));
        let surface = PixelSurface::new(window.layout_probe());
        if field.mount(surface, params, self.config.field.seed) {
            self.stats.reset(Instant::now());
        }

        self.render = Some(render);
        self.field = Some(field);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(field) = &mut self.field {
            field.unmount();
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(field), Some(render)) = (&mut self.field, &mut self.render) else {
            return;
        };

        if let Some(report) = field.redraw() {
            if let Some(sample) = self.stats.record(report, Instant::now()) {
                if self.config.debug.show_stats {
                    if let Some(window) = &self.window {
                        window.update_title(&sample);
                    }
                }
            }
        }

        let Some(canvas) = field.canvas() else {
            return;
        };
        match render.render_frame(canvas) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                render.recover();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                self.shutdown(event_loop);
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        self.attach(&window);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                if let Some(field) = &mut self.field {
                    field.resized();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => self.shutdown(event_loop),
                    PhysicalKey::Code(KeyCode::KeyF) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Swarmfield");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    // Frames are driven by redraw requests from the field
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new();
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
