use glam::Vec2;

/// Deterministic per-fragment emission parameters.
///
/// Derived once per (parameters, fragment set, layer seed) and reused for
/// all time queries; never mutated. An emission time of `f32::INFINITY`
/// marks a fragment that stays part of the intact text.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleSeed {
    pub fragment_id: u32,
    pub emission_time: f32,
    pub initial_velocity: Vec2,
    pub initial_angular_velocity: f32,
}

impl ParticleSeed {
    pub const fn new(
        fragment_id: u32,
        emission_time: f32,
        initial_velocity: Vec2,
        initial_angular_velocity: f32,
    ) -> Self {
        Self {
            fragment_id,
            emission_time,
            initial_velocity,
            initial_angular_velocity,
        }
    }

    /// Seed for a fragment that never leaves the intact text.
    pub const fn never(fragment_id: u32) -> Self {
        Self::new(fragment_id, f32::INFINITY, Vec2::ZERO, 0.0)
    }

    pub fn is_emitted_by(&self, time: f32) -> bool {
        time >= self.emission_time
    }
}

/// The computed visual state of one fragment at one query time.
///
/// Never stored; always recomputed from immutable inputs. When `visible` is
/// false the host draws the intact glyph at `position` instead of the
/// scattered contour.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleState {
    pub fragment_id: u32,
    pub position: Vec2,
    pub rotation: f32,
    pub visible: bool,
}

impl ParticleState {
    /// State of a fragment that has not been emitted: pinned at its intact
    /// position.
    pub const fn intact(fragment_id: u32, position: Vec2) -> Self {
        Self {
            fragment_id,
            position,
            rotation: 0.0,
            visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_seed_is_never_emitted() {
        let seed = ParticleSeed::never(3);
        assert!(!seed.is_emitted_by(0.0));
        assert!(!seed.is_emitted_by(f32::MAX));
    }

    #[test]
    fn emission_boundary_is_inclusive() {
        let seed = ParticleSeed::new(0, 1.5, Vec2::ZERO, 0.0);
        assert!(!seed.is_emitted_by(1.4999));
        assert!(seed.is_emitted_by(1.5));
        assert!(seed.is_emitted_by(2.0));
    }

    #[test]
    fn intact_state_is_invisible_and_unrotated() {
        let state = ParticleState::intact(7, Vec2::new(2.0, 3.0));
        assert!(!state.visible);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.position, Vec2::new(2.0, 3.0));
    }
}
