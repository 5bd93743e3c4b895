//! Noise-driven particle trails spawned under the pointer.
//!
//! [`emitter::Emitter`] spawns [`particle::Particle`]s while the pointer is
//! held and paints them onto a [`canvas::Canvas`] that is never cleared
//! between frames, so the particles leave trails behind.

pub mod app;
pub mod canvas;
pub mod emitter;
pub mod noise;
pub mod particle;
pub mod sketch_config;
pub mod soundtrack;
mod ui;

pub use app::PointerParticlesApp;
pub use sketch_config::SketchConfig;
