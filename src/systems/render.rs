//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Present pipeline
//! - Frame presentation of the particle canvas

use std::sync::Arc;
use winit::window::Window;
use swarmfield_math::Rgb;
use swarmfield_render::{ContextError, PixelCanvas, PresentPipeline, PresentUniforms, RenderContext};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Manages GPU presentation of the particle canvas
pub struct RenderSystem {
    context: RenderContext,
    pipeline: PresentPipeline,
    background: Rgb,
    opacity: f32,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let pipeline = PresentPipeline::new(&context.device, context.format());

        let system = Self {
            context,
            pipeline,
            background: config.background_color,
            opacity: config.opacity,
        };
        system.write_uniforms();
        Ok(system)
    }

    /// Handle window resize (physical pixels)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.write_uniforms();
    }

    /// Reconfigure the surface after it was lost
    pub fn recover(&mut self) {
        log::debug!("Reconfiguring lost surface");
        self.context.reconfigure();
    }

    /// Upload `canvas` and present it over the background
    pub fn render_frame(&mut self, canvas: &PixelCanvas) -> Result<(), RenderError> {
        self.pipeline
            .upload(&self.context.device, &self.context.queue, canvas);

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        self.pipeline
            .render(&mut encoder, &view, self.clear_color());

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn write_uniforms(&self) {
        let uniforms = PresentUniforms::new(
            self.background,
            self.opacity,
            self.context.format().is_srgb(),
        )
        .with_target_size(self.context.config.width, self.context.config.height);
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);
    }

    /// Background as a clear color in the surface's encoding
    fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.background.to_f32();
        let encode = |c: f32| {
            let c = c as f64;
            if !self.context.format().is_srgb() {
                c
            } else if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        wgpu::Color {
            r: encode(r),
            g: encode(g),
            b: encode(b),
            a: 1.0,
        }
    }
}
