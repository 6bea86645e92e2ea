//! burstengine - deterministic particle core for the Text Explosion effect.
//!
//! Computes the scattered state of a decomposed text layer at any query
//! time from keyframed controls (`Emission Count`, `Velocity`, `Gravity`)
//! and closed-form projectile motion. Every evaluation is a pure function
//! of `(layer, parameters, time)`, so the host can scrub the timeline in
//! any order, across any number of threads, and always read back identical
//! results.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **params**: Host keyframe model and the fixed three-control set
//! - **glyph**: Decomposition of shaped outlines into fragments
//! - **sim**: Emission seeding and closed-form particle motion
//! - **effect**: The public evaluator and its per-layer caches
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use burstengine::{EffectParameters, ExplosionEvaluator};
//!
//! let evaluator = ExplosionEvaluator::new();
//! let states = evaluator.evaluate(&layer, &EffectParameters::default(), time);
//! ```
//!
//! The compositing host links the cdylib and drives `burst_evaluate`;
//! drawing and the parameter UI stay on the host side.

pub mod effect;
pub mod glyph;
pub mod params;
pub mod sim;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use effect::{ExplosionEvaluator, FontSpec, LayerId, TextLayer};
pub use glyph::{Decomposition, DecompositionError, GlyphFragment, GlyphOutline, Granularity};
pub use params::{Control, ControlTrack, EffectParameters, InterpolationType, Keyframe};
pub use sim::{ParticleSeed, ParticleState};
