//! 2D Mathematics Library
//!
//! Small value types shared by the Swarmfield simulation and renderer.
//!
//! - [`Vec2`] - 2D vector in surface space
//! - [`Rgb`] - 8-bit sRGB color, parseable from `#RRGGBB` hex strings

mod vec2;
mod color;

pub use vec2::Vec2;
pub use color::{Rgb, ColorParseError};
