//! Particle color palette

use rand::Rng;
use swarmfield_math::Rgb;

/// Brand colors used by the marketing site's particle background
pub const DEFAULT_COLORS: [Rgb; 5] = [
    Rgb::new(0x22, 0xD3, 0xEE), // cyan
    Rgb::new(0xA8, 0x55, 0xF7), // purple
    Rgb::new(0xEC, 0x48, 0x99), // pink
    Rgb::new(0x22, 0xC5, 0x5E), // green
    Rgb::new(0xF5, 0x9E, 0x0B), // amber
];

/// A non-empty set of colors sampled uniformly, independent of band
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette; `None` if `colors` is empty
    pub fn new(colors: Vec<Rgb>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Pick a color uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        self.colors[rng.gen_range(0..self.colors.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_palette_has_five_colors() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.colors()[0], Rgb::from_hex("#22D3EE").unwrap());
        assert_eq!(palette.colors()[4], Rgb::from_hex("#F59E0B").unwrap());
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(Vec::new()).is_none());
    }

    #[test]
    fn test_pick_is_roughly_uniform() {
        let palette = Palette::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 5];
        let samples = 50_000;
        for _ in 0..samples {
            let c = palette.pick(&mut rng);
            let idx = palette.colors().iter().position(|p| *p == c).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            let fraction = count as f64 / samples as f64;
            assert!((fraction - 0.2).abs() < 0.02, "fraction {} too far from 0.2", fraction);
        }
    }
}
