//! Draw-call recording for tests and headless inspection

use swarmfield_math::Vec2;

use crate::surface::{DrawContext, Paint, Surface, SurfaceSize};

/// One captured drawing call
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    Line {
        from: Vec2,
        to: Vec2,
        paint: Paint,
        line_width: f32,
    },
}

/// A [`DrawContext`] that stores every call in order
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recording empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands recorded since the most recent clear (the last frame)
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl DrawContext for RecordingContext {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { x, y, width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::Circle { center, radius, paint });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, paint: Paint, line_width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            paint,
            line_width,
        });
    }
}

/// A [`Surface`] backed by a [`RecordingContext`]
///
/// The layout size is set by the test; the backing size only changes through
/// [`Surface::set_backing_size`].
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    layout: SurfaceSize,
    backing: SurfaceSize,
    context: Option<RecordingContext>,
}

impl RecordingSurface {
    pub fn new(layout: SurfaceSize) -> Self {
        Self {
            layout,
            backing: SurfaceSize::EMPTY,
            context: Some(RecordingContext::new()),
        }
    }

    /// A surface that cannot provide a 2D context
    pub fn unavailable(layout: SurfaceSize) -> Self {
        Self {
            layout,
            backing: SurfaceSize::EMPTY,
            context: None,
        }
    }

    /// Simulate the element being laid out at a new size
    pub fn set_layout_size(&mut self, size: SurfaceSize) {
        self.layout = size;
    }

    /// Every command drawn so far, empty if there is no context
    pub fn commands(&self) -> &[DrawCommand] {
        self.context.as_ref().map(|c| c.commands()).unwrap_or(&[])
    }

    pub fn context(&self) -> Option<&RecordingContext> {
        self.context.as_ref()
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn layout_size(&self) -> SurfaceSize {
        self.layout
    }

    fn backing_size(&self) -> SurfaceSize {
        self.backing
    }

    fn set_backing_size(&mut self, size: SurfaceSize) {
        self.backing = size;
    }

    fn context_2d(&mut self) -> Option<&mut RecordingContext> {
        self.context.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarmfield_math::Rgb;

    #[test]
    fn test_records_in_order() {
        let mut ctx = RecordingContext::new();
        let paint = Paint::new(Rgb::WHITE, 0.5);
        ctx.clear_rect(0.0, 0.0, 10.0, 10.0);
        ctx.stroke_line(Vec2::ZERO, Vec2::X, paint, 0.5);
        ctx.fill_circle(Vec2::Y, 2.0, paint);

        let commands = ctx.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(commands[1], DrawCommand::Line { .. }));
        assert!(matches!(commands[2], DrawCommand::Circle { radius, .. } if radius == 2.0));
    }

    #[test]
    fn test_last_frame_starts_at_latest_clear() {
        let mut ctx = RecordingContext::new();
        let paint = Paint::new(Rgb::WHITE, 1.0);
        ctx.clear_rect(0.0, 0.0, 1.0, 1.0);
        ctx.fill_circle(Vec2::ZERO, 1.0, paint);
        ctx.clear_rect(0.0, 0.0, 1.0, 1.0);
        ctx.fill_circle(Vec2::X, 1.0, paint);

        assert_eq!(ctx.last_frame().len(), 2);
        assert_eq!(ctx.take_commands().len(), 4);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_unavailable_surface() {
        let mut surface = RecordingSurface::unavailable(SurfaceSize::new(10, 10));
        assert!(surface.context_2d().is_none());
        assert!(surface.commands().is_empty());
    }
}
