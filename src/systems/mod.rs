//! Application systems
//!
//! Window, GPU presentation, field hosting and frame statistics, kept apart
//! from main.rs so each can be tested on its own.

mod field;
mod render;
mod stats;
mod window;

pub use field::{FieldSystem, WinitHost};
pub use render::{RenderError, RenderSystem};
pub use stats::{FrameStats, StatsSample};
pub use window::{WindowError, WindowSystem};
