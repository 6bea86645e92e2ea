//! Keyframeable effect controls.
//!
//! The host's generic keyframe model (sorted time/value pairs with per-side
//! interpolation) plus the effect's fixed three-control parameter set.

mod controls;
mod keyframe;

pub use controls::{Control, ControlTrack, EffectParameters, ParameterError};
pub use keyframe::{first_time_at_least, sample, sample_segment, InterpolationType, Keyframe};
