//! CPU raster the particle field draws into
//!
//! Pixels are RGBA8 with premultiplied alpha, row-major, top-left origin.
//! Compositing is source-over with the paint's global alpha, and shapes get a
//! one pixel anti-aliased edge. Everything outside the raster is clipped.

use swarmfield_core::{DrawContext, Paint, Surface, SurfaceSize, Vec2};

const BYTES_PER_PIXEL: usize = 4;

/// Premultiplied RGBA8 pixel buffer
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    /// Reallocate to a new size; contents are cleared
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize * BYTES_PER_PIXEL, 0);
    }

    /// Premultiplied RGBA at `(x, y)`, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Raw bytes for texture upload (`width * 4` bytes per row)
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Source-over blend of `paint` at `coverage` into one pixel
    fn blend(&mut self, x: u32, y: u32, paint: Paint, coverage: f32) {
        let src_a = (paint.alpha * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let [r, g, b] = paint.color.to_f32();
        let inv = 1.0 - src_a;
        let i = self.index(x, y);
        let dst = &mut self.pixels[i..i + BYTES_PER_PIXEL];

        for (channel, src) in dst.iter_mut().zip([r * src_a, g * src_a, b * src_a, src_a]) {
            let out = src + (*channel as f32 / 255.0) * inv;
            *channel = (out * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Pixel range `[start, end)` covering `[lo, hi]` on an axis of `extent`
    fn span(lo: f32, hi: f32, extent: u32) -> Option<(u32, u32)> {
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        let start = lo.floor().max(0.0);
        let end = hi.ceil().min(extent as f32);
        if start >= end {
            return None;
        }
        Some((start as u32, end as u32))
    }
}

impl DrawContext for PixelCanvas {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some((x0, x1)) = Self::span(x, x + width, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(y, y + height, self.height) else {
            return;
        };
        for row in y0..y1 {
            let start = self.index(x0, row);
            let end = self.index(x1 - 1, row) + BYTES_PER_PIXEL;
            self.pixels[start..end].fill(0);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        if radius <= 0.0 {
            return;
        }
        let reach = radius + 1.0;
        let Some((x0, x1)) = Self::span(center.x - reach, center.x + reach, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(center.y - reach, center.y + reach, self.height) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = pixel_center.distance(center);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, paint, coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, paint: Paint, line_width: f32) {
        if line_width <= 0.0 {
            return;
        }
        // Hairlines are drawn one pixel wide with proportionally less coverage
        let half = (line_width / 2.0).max(0.5);
        let strength = line_width.min(1.0);
        let reach = half + 1.0;

        let Some((x0, x1)) = Self::span(from.x.min(to.x) - reach, from.x.max(to.x) + reach, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(from.y.min(to.y) - reach, from.y.max(to.y) + reach, self.height) else {
            return;
        };

        let segment = to - from;
        let length_sq = segment.length_squared();

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if length_sq > 0.0 {
                    ((p - from).dot(segment) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + segment * t);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0) * strength;
                if coverage > 0.0 {
                    self.blend(x, y, paint, coverage);
                }
            }
        }
    }
}

/// [`Surface`] over a [`PixelCanvas`]
///
/// The layout size is read through a callback, so the surface always reports
/// whatever its owner (e.g. a window) currently measures.
pub struct PixelSurface {
    canvas: PixelCanvas,
    layout: Box<dyn Fn() -> SurfaceSize>,
}

impl PixelSurface {
    pub fn new(layout: impl Fn() -> SurfaceSize + 'static) -> Self {
        Self {
            canvas: PixelCanvas::new(0, 0),
            layout: Box::new(layout),
        }
    }

    /// Surface with a fixed layout size
    pub fn fixed(size: SurfaceSize) -> Self {
        Self::new(move || size)
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }
}

impl std::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("canvas", &self.canvas.size())
            .field("layout", &(self.layout)())
            .finish()
    }
}

impl Surface for PixelSurface {
    type Context = PixelCanvas;

    fn layout_size(&self) -> SurfaceSize {
        (self.layout)()
    }

    fn backing_size(&self) -> SurfaceSize {
        self.canvas.size()
    }

    fn set_backing_size(&mut self, size: SurfaceSize) {
        self.canvas.resize(size.width, size.height);
    }

    fn context_2d(&mut self) -> Option<&mut PixelCanvas> {
        Some(&mut self.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use swarmfield_core::Rgb;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = PixelCanvas::new(4, 3);
        assert_eq!(canvas.as_bytes().len(), 4 * 3 * 4);
        assert!(canvas.as_bytes().iter().all(|b| *b == 0));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_circle_center_is_fully_covered() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, Paint::new(RED, 1.0));
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_global_alpha_is_premultiplied() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, Paint::new(RED, 0.5));
        let [r, g, b, a] = canvas.pixel(10, 10).unwrap();
        assert_eq!(r, a);
        assert_eq!((g, b), (0, 0));
        assert!((a as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_source_over_accumulates() {
        let mut canvas = PixelCanvas::new(20, 20);
        let paint = Paint::new(RED, 0.5);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, paint);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, paint);
        // 0.5 + 0.5 * (1 - 0.5) = 0.75
        let a = canvas.pixel(10, 10).unwrap()[3];
        assert!((a as i32 - 191).abs() <= 1);
    }

    #[test]
    fn test_clear_rect_resets_pixels() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 5.0, Paint::new(RED, 1.0));
        canvas.clear_rect(0.0, 0.0, 10.0, 10.0);
        assert!(canvas.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_partial_clear() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 10.0, Paint::new(RED, 1.0));
        canvas.clear_rect(0.0, 0.0, 5.0, 10.0);
        assert_eq!(canvas.pixel(4, 4).unwrap()[3], 0);
        assert_eq!(canvas.pixel(5, 4).unwrap()[3], 255);
    }

    #[test]
    fn test_hairline_is_faint() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.stroke_line(
            Vec2::new(0.0, 10.5),
            Vec2::new(20.0, 10.5),
            Paint::new(RED, 1.0),
            0.5,
        );
        let on_line = canvas.pixel(10, 10).unwrap()[3];
        assert!((on_line as i32 - 128).abs() <= 1);
        assert_eq!(canvas.pixel(10, 5).unwrap()[3], 0);
    }

    #[test]
    fn test_offscreen_geometry_is_clipped() {
        let mut canvas = PixelCanvas::new(8, 8);
        let paint = Paint::new(RED, 1.0);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 3.0, paint);
        canvas.fill_circle(Vec2::new(f32::NAN, 2.0), 3.0, paint);
        canvas.stroke_line(Vec2::new(-100.0, 3.5), Vec2::new(100.0, 3.5), paint, 1.0);
        canvas.clear_rect(-10.0, -10.0, 5.0, 5.0);
        canvas.clear_rect(4.0, 4.0, 1000.0, 1000.0);
        assert_eq!(canvas.pixel(0, 3).unwrap()[3], 255);
    }

    #[test]
    fn test_resize_clears_and_reallocates() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_circle(Vec2::new(2.0, 2.0), 2.0, Paint::new(RED, 1.0));
        canvas.resize(6, 2);
        assert_eq!(canvas.size(), SurfaceSize::new(6, 2));
        assert_eq!(canvas.as_bytes().len(), 6 * 2 * 4);
        assert!(canvas.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_surface_reads_layout_through_callback() {
        let width = Rc::new(Cell::new(300));
        let probe = width.clone();
        let mut surface = PixelSurface::new(move || SurfaceSize::new(probe.get(), 200));

        assert_eq!(surface.layout_size(), SurfaceSize::new(300, 200));
        assert_eq!(surface.backing_size(), SurfaceSize::EMPTY);

        width.set(640);
        let layout = surface.layout_size();
        surface.set_backing_size(layout);
        assert_eq!(surface.backing_size(), SurfaceSize::new(640, 200));
        assert!(surface.context_2d().is_some());
    }
}
