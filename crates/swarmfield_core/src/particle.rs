//! A single animated dot

use swarmfield_math::{Rgb, Vec2};

use crate::band::Band;
use crate::surface::{DrawContext, Paint, SurfaceSize};

/// A drifting particle in surface space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Surface units per animation frame
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub alpha: f32,
    /// Archetype the particle was sampled from
    pub band: Band,
}

impl Particle {
    /// Advance by one frame of velocity and wrap around the surface edges
    pub fn step(&mut self, bounds: SurfaceSize) {
        self.position += self.velocity;
        self.position.x = wrap_axis(self.position.x, bounds.width as f32);
        self.position.y = wrap_axis(self.position.y, bounds.height as f32);
    }

    /// Paint used for the particle fill
    #[inline]
    pub fn paint(&self) -> Paint {
        Paint::new(self.color, self.alpha)
    }

    /// Draw as a filled circle
    pub fn draw<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        ctx.fill_circle(self.position, self.radius, self.paint());
    }
}

/// Toroidal wraparound on one axis
///
/// A coordinate below 0 re-enters at `extent`, one above `extent` re-enters
/// at 0. Values on the closed interval are left alone.
#[inline]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            radius: 2.0,
            color: Rgb::WHITE,
            alpha: 0.5,
            band: Band::Regular,
        }
    }

    #[test]
    fn test_wrap_axis() {
        assert_eq!(wrap_axis(-0.5, 600.0), 600.0);
        assert_eq!(wrap_axis(601.5, 600.0), 0.0);
        assert_eq!(wrap_axis(0.0, 600.0), 0.0);
        assert_eq!(wrap_axis(600.0, 600.0), 600.0);
        assert_eq!(wrap_axis(300.0, 600.0), 300.0);
    }

    #[test]
    fn test_step_wraps_high_edge_to_zero() {
        // 599.5 + 2 = 601.5 leaves a 600-wide surface and re-enters at 0
        let mut p = particle_at(599.5, 200.0, 2.0, 0.0);
        p.step(SurfaceSize::new(600, 400));
        assert_eq!(p.position.x, 0.0);
        assert_eq!(p.position.y, 200.0);
    }

    #[test]
    fn test_step_wraps_low_edge_to_extent() {
        let mut p = particle_at(1.0, 0.5, -3.0, -1.0);
        p.step(SurfaceSize::new(600, 400));
        assert_eq!(p.position, Vec2::new(600.0, 400.0));
    }

    #[test]
    fn test_step_moves_by_velocity() {
        let mut p = particle_at(10.0, 20.0, 1.5, -0.5);
        p.step(SurfaceSize::new(600, 400));
        assert_eq!(p.position, Vec2::new(11.5, 19.5));
    }

    #[test]
    fn test_step_never_escapes_tiny_surface() {
        // Speed larger than the surface itself
        let mut p = particle_at(0.5, 0.5, 3.9, -3.9);
        let bounds = SurfaceSize::new(1, 1);
        for _ in 0..100 {
            p.step(bounds);
            assert!(bounds.contains(p.position));
        }
    }
}
