use super::particle::{ParticleSeed, ParticleState};
use glam::Vec2;

/// Upper bound of the per-fragment emission jitter, in seconds. One frame at
/// the host's common 30 fps comp rate.
pub const EMISSION_JITTER: f32 = 1.0 / 30.0;

/// Largest unweighted spin magnitude, in radians per second.
pub const MAX_SPIN: f32 = 4.0 * std::f32::consts::PI;

pub const EPSILON: f32 = 1.192_093e-7;

/// Gravity as a vector in the host's downward-positive y convention.
pub fn gravity_vector(gravity: f32) -> Vec2 {
    Vec2::new(0.0, gravity)
}

/// Closed-form particle state at `query_time`.
///
/// Before the seed's emission time the fragment is part of the intact text.
/// At or after it, position and rotation follow projectile motion from the
/// captured emission parameters. `gravity` is the control value sampled at
/// the seed's emission time; it is not re-sampled after emission, so later
/// gravity keyframes only affect future bursts. Pure function of its
/// arguments: re-querying any time, in any order, is bit-identical.
pub fn state_at(
    seed: &ParticleSeed,
    local_origin: Vec2,
    gravity: f32,
    query_time: f32,
) -> ParticleState {
    if !seed.is_emitted_by(query_time) {
        return ParticleState::intact(seed.fragment_id, local_origin);
    }

    let dt = query_time - seed.emission_time;
    let position =
        local_origin + seed.initial_velocity * dt + gravity_vector(gravity) * (0.5 * dt * dt);

    ParticleState {
        fragment_id: seed.fragment_id,
        position,
        rotation: seed.initial_angular_velocity * dt,
        visible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    fn seed() -> ParticleSeed {
        ParticleSeed::new(0, 1.0, Vec2::new(3.0, -4.0), 2.0)
    }

    #[test]
    fn before_emission_is_pinned_at_the_origin() {
        let origin = Vec2::new(5.0, 6.0);
        for t in [-10.0, 0.0, 0.999] {
            let state = state_at(&seed(), origin, 1200.0, t);
            assert!(!state.visible);
            assert_eq!(state.position, origin);
            assert_eq!(state.rotation, 0.0);
        }
    }

    #[test]
    fn at_emission_the_particle_starts_at_the_origin() {
        let origin = Vec2::new(5.0, 6.0);
        let state = state_at(&seed(), origin, 1200.0, 1.0);
        assert!(state.visible);
        assert_relative_eq!(state.position.x, origin.x, epsilon = TOLERANCE);
        assert_relative_eq!(state.position.y, origin.y, epsilon = TOLERANCE);
        assert_relative_eq!(state.rotation, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn position_matches_the_closed_form_exactly() {
        let origin = Vec2::new(1.0, 2.0);
        let gravity = 1200.0;
        let s = seed();
        for offset in [0.0f32, 0.1, 0.5, 2.0, 10.0] {
            let query_time = s.emission_time + offset;
            let dt = query_time - s.emission_time;
            let state = state_at(&s, origin, gravity, query_time);
            let expected = origin
                + s.initial_velocity * dt
                + gravity_vector(gravity) * (0.5 * dt * dt);
            assert_eq!(state.position, expected);
            assert_eq!(state.rotation, s.initial_angular_velocity * dt);
        }
    }

    #[test]
    fn repeated_queries_are_bit_identical() {
        let origin = Vec2::new(1.0, 2.0);
        let a = state_at(&seed(), origin, 1200.0, 3.7);
        let b = state_at(&seed(), origin, 1200.0, 3.7);
        assert_eq!(a, b);
    }

    #[test]
    fn gravity_pulls_downward_positive_y() {
        let s = ParticleSeed::new(0, 0.0, Vec2::ZERO, 0.0);
        let state = state_at(&s, Vec2::ZERO, 1200.0, 1.0);
        assert_relative_eq!(state.position.y, 600.0, epsilon = TOLERANCE);
        assert_relative_eq!(state.position.x, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn never_emitted_seed_stays_intact_forever() {
        let s = ParticleSeed::never(9);
        let state = state_at(&s, Vec2::new(1.0, 1.0), 1200.0, 1e9);
        assert!(!state.visible);
        assert_eq!(state.position, Vec2::new(1.0, 1.0));
    }
}
