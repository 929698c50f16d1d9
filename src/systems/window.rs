//! Window management system
//!
//! Handles window creation, fullscreen toggle, layout size and title updates.

use std::sync::Arc;
use swarmfield_core::SurfaceSize;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;
use super::stats::StatsSample;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Displayed size in logical pixels
    pub fn layout_size(&self) -> SurfaceSize {
        layout_size_of(&self.window)
    }

    /// A callback reporting the live layout size, for surfaces sized by the window
    pub fn layout_probe(&self) -> impl Fn() -> SurfaceSize + 'static {
        let window = Arc::clone(&self.window);
        move || layout_size_of(&window)
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Show frame statistics in the title
    pub fn update_title(&self, sample: &StatsSample) {
        self.window.set_title(&stats_title(&self.base_title, sample));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Physical inner size converted to logical pixels
fn layout_size_of(window: &Window) -> SurfaceSize {
    let logical = window
        .inner_size()
        .to_logical::<f64>(window.scale_factor());
    SurfaceSize::new(logical.width.round() as u32, logical.height.round() as u32)
}

fn stats_title(base: &str, sample: &StatsSample) -> String {
    format!("{} - {}", base, sample)
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_title_formatting() {
        // Can't test an actual window without an event loop
        let sample = StatsSample {
            fps: 60.0,
            particles: 40,
            links: 12,
        };
        assert_eq!(
            stats_title("Swarmfield", &sample),
            "Swarmfield - 60 fps | 40 particles | 12 links"
        );
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
