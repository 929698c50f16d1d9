//! Rendering for the Swarmfield particle background
//!
//! The field is rasterized on the CPU and presented through wgpu.
//!
//! ## Key Components
//!
//! - [`canvas::PixelCanvas`] - Premultiplied RGBA8 raster implementing `DrawContext`
//! - [`canvas::PixelSurface`] - `Surface` over a canvas, sized from its owner's layout
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::PresentPipeline`] - Composites the canvas over the background

pub mod canvas;
pub mod context;
pub mod pipeline;

pub use canvas::{PixelCanvas, PixelSurface};
pub use context::{ContextError, RenderContext};
pub use pipeline::{PresentPipeline, PresentUniforms};
