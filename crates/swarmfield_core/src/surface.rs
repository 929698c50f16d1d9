//! Drawing capabilities
//!
//! The simulation never talks to a concrete canvas. It draws through
//! [`DrawContext`] and learns its dimensions through [`Surface`], so the same
//! code paints into a CPU raster, a recording for tests, or anything else.

use swarmfield_math::{Rgb, Vec2};

/// Pixel dimensions of a drawing surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const EMPTY: Self = Self { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in square surface units
    #[inline]
    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if either dimension is zero
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `p` lies within `[0, width] x [0, height]` (edges included)
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width as f32 && p.y >= 0.0 && p.y <= self.height as f32
    }
}

/// Fill or stroke color together with the global alpha it is drawn at
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f32,
}

impl Paint {
    #[inline]
    pub const fn new(color: Rgb, alpha: f32) -> Self {
        Self { color, alpha }
    }
}

/// 2D raster drawing primitives
///
/// Mirrors the small subset of a canvas-style API the field needs.
pub trait DrawContext {
    /// Reset the rectangle to fully transparent
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a circle of `radius` around `center`
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);

    /// Stroke a straight line segment of `line_width`
    fn stroke_line(&mut self, from: Vec2, to: Vec2, paint: Paint, line_width: f32);
}

/// A drawing surface whose backing buffer can be fitted to its layout size
pub trait Surface {
    type Context: DrawContext;

    /// Displayed (layout) size, re-read on every resize
    fn layout_size(&self) -> SurfaceSize;

    /// Current size of the backing pixel buffer
    fn backing_size(&self) -> SurfaceSize;

    /// Reallocate the backing pixel buffer
    fn set_backing_size(&mut self, size: SurfaceSize);

    /// The 2D drawing context, or `None` if the host cannot provide one
    fn context_2d(&mut self) -> Option<&mut Self::Context>;
}
