//! Particle simulation core: emission seeding and closed-form motion.
//!
//! Everything here is a pure function over immutable inputs; there is no
//! stepped integration and no accumulated state, which is what makes
//! arbitrary-order time scrubbing safe.

mod emitter;
mod motion;
mod particle;

pub use emitter::seeds_for;
pub use motion::{gravity_vector, state_at, EMISSION_JITTER, EPSILON, MAX_SPIN};
pub use particle::{ParticleSeed, ParticleState};
