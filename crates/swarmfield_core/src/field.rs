//! Particle population and per-frame update
//!
//! A [`ParticleField`] owns one generation of particles. Each frame it
//! clears the surface, advances every particle, strokes a line between every
//! pair closer than the link distance, then fills the particles on top.

use rand::Rng;
use swarmfield_math::{Rgb, Vec2};

use crate::band::sample_particle;
use crate::palette::Palette;
use crate::particle::Particle;
use crate::surface::{DrawContext, Paint, SurfaceSize};

/// Tuning for density and connection lines
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    /// Surface area per particle (population = floor(W*H / area))
    pub area_per_particle: f32,
    /// Pairs closer than this are connected
    pub link_distance: f32,
    /// Line opacity at distance 0, fading linearly to 0 at `link_distance`
    pub link_max_alpha: f32,
    pub link_width: f32,
    pub palette: Palette,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            area_per_particle: 6000.0,
            link_distance: 150.0,
            link_max_alpha: 0.3,
            link_width: 0.5,
            palette: Palette::default(),
        }
    }
}

/// A connection line between two particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    /// Color of the first particle of the pair
    pub color: Rgb,
    pub alpha: f32,
}

/// What a single frame drew
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub particles: usize,
    pub links: usize,
}

/// Number of particles for a surface: `floor(W * H / area_per_particle)`
pub fn population_for(size: SurfaceSize, area_per_particle: f32) -> usize {
    if !(area_per_particle > 0.0) {
        return 0;
    }
    (size.area() as f64 / area_per_particle as f64).floor() as usize
}

/// Connection opacity for two particles `distance` apart
///
/// `Some((1 - d / threshold) * max_alpha)` when `d < threshold`, else `None`.
#[inline]
pub fn link_alpha(distance: f32, threshold: f32, max_alpha: f32) -> Option<f32> {
    if distance < threshold {
        Some((1.0 - distance / threshold) * max_alpha)
    } else {
        None
    }
}

/// The current particle generation and the surface it lives on
#[derive(Clone, Debug)]
pub struct ParticleField {
    params: FieldParams,
    size: SurfaceSize,
    particles: Vec<Particle>,
    generation: u64,
}

impl ParticleField {
    /// Create an empty field; call [`regenerate`](Self::regenerate) to populate it
    pub fn new(params: FieldParams) -> Self {
        Self {
            params,
            size: SurfaceSize::EMPTY,
            particles: Vec::new(),
            generation: 0,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Incremented every time the population is regenerated
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard every particle and sample a fresh population for `size`
    pub fn regenerate<R: Rng + ?Sized>(&mut self, size: SurfaceSize, rng: &mut R) {
        let count = population_for(size, self.params.area_per_particle);
        let palette = &self.params.palette;

        self.size = size;
        self.particles = (0..count)
            .map(|_| sample_particle(rng, size, palette))
            .collect();
        self.generation += 1;

        log::debug!(
            "Generated {} particles for {}x{} surface (generation {})",
            count,
            size.width,
            size.height,
            self.generation
        );
    }

    /// Advance every particle by one frame, wrapping at the edges
    pub fn step(&mut self) {
        let bounds = self.size;
        for particle in &mut self.particles {
            particle.step(bounds);
        }
    }

    /// Every unordered pair closer than the link distance
    ///
    /// O(n^2) over the current population.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let threshold = self.params.link_distance;
        let max_alpha = self.params.link_max_alpha;
        let particles = &self.particles;

        particles.iter().enumerate().flat_map(move |(i, a)| {
            particles[i + 1..].iter().filter_map(move |b| {
                let distance = a.position.distance(b.position);
                link_alpha(distance, threshold, max_alpha).map(|alpha| Link {
                    from: a.position,
                    to: b.position,
                    color: a.color,
                    alpha,
                })
            })
        })
    }

    /// Stroke all connection lines; returns how many were drawn
    pub fn draw_links<C: DrawContext + ?Sized>(&self, ctx: &mut C) -> usize {
        let width = self.params.link_width;
        let mut drawn = 0;
        for link in self.links() {
            ctx.stroke_line(link.from, link.to, Paint::new(link.color, link.alpha), width);
            drawn += 1;
        }
        drawn
    }

    /// Fill every particle
    pub fn draw_particles<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        for particle in &self.particles {
            particle.draw(ctx);
        }
    }

    /// One full frame: clear, update, connections, particles
    pub fn frame<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> FrameReport {
        ctx.clear_rect(0.0, 0.0, self.size.width as f32, self.size.height as f32);
        self.step();
        let links = self.draw_links(ctx);
        self.draw_particles(ctx);

        FrameReport {
            particles: self.particles.len(),
            links,
        }
    }
}
