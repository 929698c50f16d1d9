//! Particle archetypes
//!
//! Every new particle draws one uniform value in [0, 1) and falls into one of
//! four bands. Each band has its own speed, radius and opacity ranges. The
//! cut points and ranges are a fixed visual tuning table; keep them as they are.

use std::ops::Range;
use rand::Rng;

use crate::palette::Palette;
use crate::particle::Particle;
use crate::surface::SurfaceSize;
use swarmfield_math::Vec2;

/// One of the four particle archetypes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// Fast, small and bright ("shooting stars")
    Spark,
    /// Medium speed, size and brightness
    Medium,
    /// Slow, large and dim background floaters
    Floater,
    /// Everything else
    Regular,
}

/// Sampling ranges for one band
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandProfile {
    pub band: Band,
    /// Exclusive upper bound of the classification draw
    pub upper_bound: f32,
    /// Each velocity axis is `(u - 0.5) * speed_span`
    pub speed_span: f32,
    pub radius_min: f32,
    pub radius_span: f32,
    pub alpha_min: f32,
    pub alpha_span: f32,
}

/// Band table, ordered by `upper_bound`
pub const BAND_TABLE: [BandProfile; 4] = [
    BandProfile {
        band: Band::Spark,
        upper_bound: 0.15,
        speed_span: 8.0,
        radius_min: 0.5,
        radius_span: 1.5,
        alpha_min: 0.4,
        alpha_span: 0.1,
    },
    BandProfile {
        band: Band::Medium,
        upper_bound: 0.4,
        speed_span: 5.0,
        radius_min: 1.5,
        radius_span: 2.5,
        alpha_min: 0.35,
        alpha_span: 0.15,
    },
    BandProfile {
        band: Band::Floater,
        upper_bound: 0.7,
        speed_span: 1.5,
        radius_min: 3.0,
        radius_span: 4.0,
        alpha_min: 0.1,
        alpha_span: 0.15,
    },
    BandProfile {
        band: Band::Regular,
        upper_bound: 1.0,
        speed_span: 3.0,
        radius_min: 1.0,
        radius_span: 2.0,
        alpha_min: 0.3,
        alpha_span: 0.2,
    },
];

impl Band {
    /// Classify a uniform draw in [0, 1)
    pub fn classify(u: f32) -> Band {
        BAND_TABLE
            .iter()
            .find(|profile| u < profile.upper_bound)
            .map(|profile| profile.band)
            .unwrap_or(Band::Regular)
    }

    /// Tuning for this band
    pub fn profile(self) -> &'static BandProfile {
        match self {
            Band::Spark => &BAND_TABLE[0],
            Band::Medium => &BAND_TABLE[1],
            Band::Floater => &BAND_TABLE[2],
            Band::Regular => &BAND_TABLE[3],
        }
    }

    /// Probability mass of this band
    pub fn weight(self) -> f32 {
        let lower = match self {
            Band::Spark => 0.0,
            Band::Medium => BAND_TABLE[0].upper_bound,
            Band::Floater => BAND_TABLE[1].upper_bound,
            Band::Regular => BAND_TABLE[2].upper_bound,
        };
        self.profile().upper_bound - lower
    }
}

impl BandProfile {
    /// Half-open range each velocity component is drawn from
    pub fn speed_range(&self) -> Range<f32> {
        -self.speed_span / 2.0..self.speed_span / 2.0
    }

    pub fn radius_range(&self) -> Range<f32> {
        self.radius_min..self.radius_min + self.radius_span
    }

    pub fn alpha_range(&self) -> Range<f32> {
        self.alpha_min..self.alpha_min + self.alpha_span
    }

    /// Sample a particle of this band anywhere on the surface
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, size: SurfaceSize, palette: &Palette) -> Particle {
        let position = Vec2::new(
            rng.gen::<f32>() * size.width as f32,
            rng.gen::<f32>() * size.height as f32,
        );
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * self.speed_span,
            (rng.gen::<f32>() - 0.5) * self.speed_span,
        );
        let radius = rng.gen::<f32>() * self.radius_span + self.radius_min;
        let color = palette.pick(rng);
        let alpha = rng.gen::<f32>() * self.alpha_span + self.alpha_min;

        Particle {
            position,
            velocity,
            radius,
            color,
            alpha,
            band: self.band,
        }
    }
}

/// Draw a band, then a particle from it
pub fn sample_particle<R: Rng + ?Sized>(rng: &mut R, size: SurfaceSize, palette: &Palette) -> Particle {
    let band = Band::classify(rng.gen::<f32>());
    band.profile().sample(rng, size, palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(Band::classify(0.0), Band::Spark);
        assert_eq!(Band::classify(0.1499), Band::Spark);
        assert_eq!(Band::classify(0.15), Band::Medium);
        assert_eq!(Band::classify(0.3999), Band::Medium);
        assert_eq!(Band::classify(0.4), Band::Floater);
        assert_eq!(Band::classify(0.6999), Band::Floater);
        assert_eq!(Band::classify(0.7), Band::Regular);
        assert_eq!(Band::classify(0.9999), Band::Regular);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f32 = [Band::Spark, Band::Medium, Band::Floater, Band::Regular]
            .iter()
            .map(|b| b.weight())
            .sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!((Band::Medium.weight() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_declared_ranges() {
        let spark = Band::Spark.profile();
        assert_eq!(spark.speed_range(), -4.0..4.0);
        assert_eq!(spark.radius_range(), 0.5..2.0);
        assert!((spark.alpha_range().end - 0.5).abs() < 1e-6);

        let medium = Band::Medium.profile();
        assert_eq!(medium.speed_range(), -2.5..2.5);
        assert_eq!(medium.radius_range(), 1.5..4.0);
        assert!((medium.alpha_range().end - 0.5).abs() < 1e-6);

        let floater = Band::Floater.profile();
        assert_eq!(floater.speed_range(), -0.75..0.75);
        assert_eq!(floater.radius_range(), 3.0..7.0);
        assert!((floater.alpha_range().end - 0.25).abs() < 1e-6);

        let regular = Band::Regular.profile();
        assert_eq!(regular.speed_range(), -1.5..1.5);
        assert_eq!(regular.radius_range(), 1.0..3.0);
        assert!((regular.alpha_range().end - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_stays_in_band_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let palette = Palette::default();
        let size = SurfaceSize::new(800, 600);

        for _ in 0..5_000 {
            let p = sample_particle(&mut rng, size, &palette);
            let profile = p.band.profile();
            let speed = profile.speed_range();
            // Allow float slop on the open upper bounds
            assert!(p.velocity.x >= speed.start && p.velocity.x <= speed.end);
            assert!(p.velocity.y >= speed.start && p.velocity.y <= speed.end);
            assert!(p.radius >= profile.radius_min && p.radius <= profile.radius_range().end + 1e-5);
            assert!(p.alpha >= profile.alpha_min && p.alpha <= profile.alpha_range().end + 1e-5);
            assert!(size.contains(p.position));
            assert!(palette.colors().contains(&p.color));
        }
    }
}
