//! Core simulation for the Swarmfield ambient background
//!
//! This crate owns everything that does not depend on a real window or GPU:
//!
//! - [`Particle`] - A single drifting dot
//! - [`Band`] / [`BAND_TABLE`] - The four particle archetypes and their tuning
//! - [`Palette`] - Colors particles are drawn from
//! - [`ParticleField`] - Population, per-frame update and connection pass
//! - [`DrawContext`] / [`Surface`] - Injected drawing capabilities
//! - [`FrameScheduler`] / [`ResizeNotifier`] - Injected host capabilities
//! - [`ParticleFieldComponent`] - Mount / frame / resize / unmount lifecycle
//!
//! [`ManualHost`] and [`RecordingSurface`] are deterministic stand-ins for a
//! real host and canvas, used by tests and headless drivers.

mod surface;
mod palette;
mod band;
mod particle;
mod field;
mod host;
mod component;
pub mod recording;

pub use surface::{DrawContext, Paint, Surface, SurfaceSize};
pub use palette::Palette;
pub use band::{Band, BandProfile, BAND_TABLE};
pub use particle::{wrap_axis, Particle};
pub use field::{link_alpha, population_for, FieldParams, FrameReport, Link, ParticleField};
pub use host::{FrameRequest, FrameScheduler, Host, ListenerId, ManualHost, ResizeNotifier};
pub use component::ParticleFieldComponent;
pub use recording::{DrawCommand, RecordingContext, RecordingSurface};

// Re-export math types for convenience
pub use swarmfield_math::{Rgb, Vec2};
