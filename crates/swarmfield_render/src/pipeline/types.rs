//! GPU-compatible data types for the present pass
//!
//! Layouts match `present.wgsl` exactly.

use bytemuck::{Pod, Zeroable};
use swarmfield_math::Rgb;

/// Uniforms for compositing the canvas over the background
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PresentUniforms {
    /// Background color, sRGB-encoded, alpha ignored
    pub background: [f32; 4],
    /// Multiplier applied to the whole canvas
    pub opacity: f32,
    /// Nonzero when the surface format is sRGB and output must be linear
    pub encode_linear: u32,
    /// Size of the render target in physical pixels
    pub target_size: [f32; 2],
}

impl PresentUniforms {
    pub fn new(background: Rgb, opacity: f32, encode_linear: bool) -> Self {
        let [r, g, b] = background.to_f32();
        Self {
            background: [r, g, b, 1.0],
            opacity: opacity.clamp(0.0, 1.0),
            encode_linear: encode_linear as u32,
            target_size: [1.0, 1.0],
        }
    }

    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_size = [width.max(1) as f32, height.max(1) as f32];
        self
    }
}

impl Default for PresentUniforms {
    fn default() -> Self {
        Self::new(Rgb::BLACK, 1.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_present_uniforms_size() {
        // vec4 background + opacity + flag + vec2 target size = 8 words
        assert_eq!(size_of::<PresentUniforms>(), 32);
        assert_eq!(std::mem::align_of::<PresentUniforms>(), 4);
    }

    #[test]
    fn test_present_uniforms_new() {
        let u = PresentUniforms::new(Rgb::new(0x0A, 0x0F, 0x1C), 0.85, true);
        assert!((u.background[0] - 10.0 / 255.0).abs() < 1e-6);
        assert_eq!(u.background[3], 1.0);
        assert_eq!(u.opacity, 0.85);
        assert_eq!(u.encode_linear, 1);

        let sized = u.with_target_size(1920, 0);
        assert_eq!(sized.target_size, [1920.0, 1.0]);

        let clamped = PresentUniforms::new(Rgb::BLACK, 3.0, false);
        assert_eq!(clamped.opacity, 1.0);
        assert_eq!(clamped.encode_linear, 0);
    }
}
