//! Rendering pipeline components
//!
//! A single render pass that presents the CPU particle canvas.

pub mod types;
pub mod present_pipeline;

pub use types::PresentUniforms;
pub use present_pipeline::PresentPipeline;
