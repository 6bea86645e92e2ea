use super::keyframe::{self, Keyframe};
use thiserror::Error;

/// The closed set of controls the effect exposes to the host.
///
/// Replaces the host's dynamic lookup-by-name with a fixed mapping that is
/// validated once at load time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    EmissionCount,
    Velocity,
    Gravity,
}

impl Control {
    pub const ALL: [Self; 3] = [Self::EmissionCount, Self::Velocity, Self::Gravity];

    /// The control's display name, as the host exposes it.
    pub const fn name(self) -> &'static str {
        match self {
            Self::EmissionCount => "Emission Count",
            Self::Velocity => "Velocity",
            Self::Gravity => "Gravity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|control| control.name() == name)
    }

    /// The static default used when a control has no keyframes.
    pub const fn default_value(self) -> f32 {
        match self {
            Self::EmissionCount => 25.0,
            Self::Velocity => 500.0,
            Self::Gravity => 1200.0,
        }
    }
}

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("keyframe {index} has a non-finite time or value")]
    NonFinite { index: usize },
    #[error("keyframe {index} is not strictly after the previous keyframe")]
    OutOfOrder { index: usize },
}

/// Keyframes for one control plus its static default.
///
/// Invariant: keyframes are finite and sorted by strictly increasing time.
/// The sanitizing constructor enforces this by dropping offending host
/// keyframes; `try_new` rejects them instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlTrack {
    default_value: f32,
    keyframes: Vec<Keyframe>,
}

impl ControlTrack {
    pub const fn constant(default_value: f32) -> Self {
        Self {
            default_value,
            keyframes: Vec::new(),
        }
    }

    /// Builds a track from host keyframes, dropping invalid ones with a
    /// warning. Never fails; a fully invalid input degrades to the static
    /// default.
    pub fn new(default_value: f32, keyframes: Vec<Keyframe>) -> Self {
        let mut accepted: Vec<Keyframe> = Vec::with_capacity(keyframes.len());
        for (index, kf) in keyframes.into_iter().enumerate() {
            if !kf.is_finite() {
                log::warn!("dropping keyframe {index}: non-finite time or value");
                continue;
            }
            if let Some(last) = accepted.last() {
                if kf.time <= last.time {
                    log::warn!("dropping keyframe {index}: out of order at t={}", kf.time);
                    continue;
                }
            }
            accepted.push(kf);
        }
        Self {
            default_value,
            keyframes: accepted,
        }
    }

    /// Strict variant for callers that want to surface invalid host data.
    pub fn try_new(default_value: f32, keyframes: Vec<Keyframe>) -> Result<Self, ParameterError> {
        for (index, kf) in keyframes.iter().enumerate() {
            if !kf.is_finite() {
                return Err(ParameterError::NonFinite { index });
            }
            if index > 0 && kf.time <= keyframes[index - 1].time {
                return Err(ParameterError::OutOfOrder { index });
            }
        }
        Ok(Self {
            default_value,
            keyframes,
        })
    }

    pub fn for_control(control: Control, keyframes: Vec<Keyframe>) -> Self {
        Self::new(control.default_value(), keyframes)
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Resolved control value at `time` (see [`keyframe::sample`]).
    pub fn value_at(&self, time: f32) -> f32 {
        keyframe::sample(&self.keyframes, time, self.default_value)
    }

    /// Earliest time `>= 0` at which the track reaches `threshold`.
    pub fn first_time_at_least(&self, threshold: f32) -> Option<f32> {
        keyframe::first_time_at_least(&self.keyframes, self.default_value, threshold)
    }
}

/// The effect's full parameter set: one track per control.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectParameters {
    pub emission_count: ControlTrack,
    pub velocity: ControlTrack,
    pub gravity: ControlTrack,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            emission_count: ControlTrack::constant(Control::EmissionCount.default_value()),
            velocity: ControlTrack::constant(Control::Velocity.default_value()),
            gravity: ControlTrack::constant(Control::Gravity.default_value()),
        }
    }
}

impl EffectParameters {
    pub fn track(&self, control: Control) -> &ControlTrack {
        match control {
            Control::EmissionCount => &self.emission_count,
            Control::Velocity => &self.velocity,
            Control::Gravity => &self.gravity,
        }
    }

    pub fn track_mut(&mut self, control: Control) -> &mut ControlTrack {
        match control {
            Control::EmissionCount => &mut self.emission_count,
            Control::Velocity => &mut self.velocity,
            Control::Gravity => &mut self.gravity,
        }
    }

    pub fn value_at(&self, control: Control, time: f32) -> f32 {
        self.track(control).value_at(time)
    }

    /// Emission count resolved at `time`: rounded to the nearest integer and
    /// clamped non-negative.
    pub fn emission_count_at(&self, time: f32) -> u32 {
        let value = self.emission_count.value_at(time);
        if !value.is_finite() || value <= 0.0 {
            return 0;
        }
        value.round() as u32
    }
}
