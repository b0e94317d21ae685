//! Ambient effects for a single-page portfolio, compiled to WebAssembly.
//!
//! The simulation and state machines in this crate are plain Rust and run
//! anywhere; the `web` module (wasm32 only) mounts them on canvas and DOM
//! elements.

pub mod celebration;
pub mod color;
pub mod component;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod particle;
pub mod renderer;
pub mod reveal;
pub mod tech_icon;
pub mod typewriter;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use crate::celebration::{Celebration, CelebrationConfig, Cue, FireworksOptions};
pub use crate::color::Color;
pub use crate::component::{CelebrationComponent, FieldComponent, FieldProps, TypewriterComponent};
pub use crate::config::FxConfig;
pub use crate::error::{FxError, Result};
pub use crate::field::{
    AnchoredConfig, AnchoredField, AnchoredParticle, Connection, FieldConfig, ParticleField,
    Simulation,
};
pub use crate::particle::Particle;
pub use crate::renderer::{backing_size, render_anchored, render_field, Surface};
pub use crate::reveal::{scroll_progress, ProgressAnimation, RevealTrigger};
pub use crate::tech_icon::{icon_for, TechIcon};
pub use crate::typewriter::{Phase, Typewriter, TypewriterTiming};
