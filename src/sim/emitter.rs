use super::motion;
use super::particle::ParticleSeed;
use crate::glyph::Decomposition;
use crate::params::{Control, EffectParameters};
use glam::Vec2;
use std::f32::consts::TAU;

/// Mixing constant for per-fragment RNG streams (splitmix64 increment).
const FRAGMENT_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derives the deterministic emission seed for every fragment.
///
/// Fragments are ranked by ascending id. Rank `r` emits at the earliest
/// time the resolved emission count reaches `r + 1` (rounding means the
/// track value must reach `r + 0.5`); a track that never gets there leaves
/// the fragment intact forever. Finite emission times carry a seeded jitter
/// in `[0, EMISSION_JITTER)`. The initial velocity radiates outward from
/// the text centroid, scaled by the velocity control sampled at the
/// fragment's own emission time; spin is a seeded uniform scaled down by
/// fragment weight. Same inputs, same seeds, always.
pub fn seeds_for(
    decomposition: &Decomposition,
    params: &EffectParameters,
    layer_seed: u64,
) -> Vec<ParticleSeed> {
    let emission = params.track(Control::EmissionCount);
    let velocity = params.track(Control::Velocity);

    decomposition
        .fragments
        .iter()
        .enumerate()
        .map(|(rank, fragment)| {
            let threshold = rank as f32 + 0.5;
            let Some(burst_time) = emission.first_time_at_least(threshold) else {
                return ParticleSeed::never(fragment.id);
            };

            let mut rng = fragment_rng(layer_seed, fragment.id);
            let emission_time = burst_time + rng.f32() * motion::EMISSION_JITTER;
            let direction = outward_direction(fragment.local_origin, decomposition.centroid, &mut rng);
            let speed = velocity.value_at(emission_time);
            let spin = (rng.f32() * 2.0 - 1.0) * motion::MAX_SPIN / fragment.weight.sqrt().max(1.0);

            ParticleSeed::new(fragment.id, emission_time, direction * speed, spin)
        })
        .collect()
}

fn fragment_rng(layer_seed: u64, fragment_id: u32) -> fastrand::Rng {
    fastrand::Rng::with_seed(layer_seed ^ (u64::from(fragment_id) + 1).wrapping_mul(FRAGMENT_STREAM))
}

/// Unit vector from the text centroid through the fragment origin; seeded
/// random direction when the two coincide.
fn outward_direction(origin: Vec2, centroid: Vec2, rng: &mut fastrand::Rng) -> Vec2 {
    let offset = origin - centroid;
    if offset.length_squared() > motion::EPSILON {
        offset.normalize()
    } else {
        let angle = rng.f32() * TAU;
        Vec2::new(angle.cos(), angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{decompose, GlyphOutline, Granularity};
    use crate::params::{ControlTrack, Keyframe};
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    fn row_of_glyphs(count: usize) -> Decomposition {
        let glyphs: Vec<GlyphOutline> = (0..count)
            .map(|i| {
                GlyphOutline::new(
                    Vec2::new(i as f32 * 10.0, 0.0),
                    vec![vec![
                        Vec2::new(0.0, 0.0),
                        Vec2::new(1.0, 0.0),
                        Vec2::new(1.0, 1.0),
                        Vec2::new(0.0, 1.0),
                    ]],
                )
            })
            .collect();
        decompose(&glyphs, Granularity::PerGlyph).unwrap()
    }

    #[test]
    fn emission_count_selects_the_lowest_ranks() {
        let decomposition = row_of_glyphs(10);
        let mut params = EffectParameters::default();
        params.emission_count = ControlTrack::constant(4.0);

        let seeds = seeds_for(&decomposition, &params, 7);
        let finite: Vec<u32> = seeds
            .iter()
            .filter(|s| s.emission_time.is_finite())
            .map(|s| s.fragment_id)
            .collect();
        assert_eq!(finite, vec![0, 1, 2, 3]);
        for seed in &seeds[4..] {
            assert_eq!(seed.emission_time, f32::INFINITY);
        }
    }

    #[test]
    fn count_at_or_above_fragment_count_emits_everything() {
        let decomposition = row_of_glyphs(5);
        let params = EffectParameters::default();
        let seeds = seeds_for(&decomposition, &params, 7);
        assert!(seeds.iter().all(|s| s.emission_time.is_finite()));
    }

    #[test]
    fn zero_count_emits_nothing() {
        let decomposition = row_of_glyphs(5);
        let mut params = EffectParameters::default();
        params.emission_count = ControlTrack::constant(0.0);
        let seeds = seeds_for(&decomposition, &params, 7);
        assert!(seeds.iter().all(|s| s.emission_time == f32::INFINITY));
    }

    #[test]
    fn same_inputs_give_identical_seeds() {
        let decomposition = row_of_glyphs(8);
        let params = EffectParameters::default();
        let a = seeds_for(&decomposition, &params, 99);
        let b = seeds_for(&decomposition, &params, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn layer_seed_changes_the_jitter() {
        let decomposition = row_of_glyphs(8);
        let params = EffectParameters::default();
        let a = seeds_for(&decomposition, &params, 1);
        let b = seeds_for(&decomposition, &params, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn jitter_stays_within_its_bound() {
        let decomposition = row_of_glyphs(16);
        let params = EffectParameters::default();
        for seed in seeds_for(&decomposition, &params, 42) {
            assert!(seed.emission_time >= 0.0);
            assert!(seed.emission_time < motion::EMISSION_JITTER);
        }
    }

    #[test]
    fn ramped_count_staggers_emission_by_rank() {
        let decomposition = row_of_glyphs(10);
        let mut params = EffectParameters::default();
        params.emission_count = ControlTrack::new(
            25.0,
            vec![Keyframe::linear(0.0, 0.0), Keyframe::linear(0.5, 25.0)],
        );

        let seeds = seeds_for(&decomposition, &params, 7);
        // Rank r needs the track to reach r + 0.5, which the 0..25-over-0.5s
        // ramp does at (r + 0.5) / 50.
        for (rank, seed) in seeds.iter().enumerate() {
            let ramp_time = (rank as f32 + 0.5) / 50.0;
            assert!(seed.emission_time >= ramp_time - TOLERANCE);
            assert!(seed.emission_time < ramp_time + motion::EMISSION_JITTER + TOLERANCE);
        }
    }

    #[test]
    fn directions_radiate_outward_from_the_centroid() {
        let decomposition = row_of_glyphs(2);
        let params = EffectParameters::default();
        let seeds = seeds_for(&decomposition, &params, 7);

        // Two glyphs on a row: the left one flies left, the right one right.
        assert!(seeds[0].initial_velocity.x < 0.0);
        assert!(seeds[1].initial_velocity.x > 0.0);
        assert_relative_eq!(seeds[0].initial_velocity.length(), 500.0, epsilon = 1e-2);
    }

    #[test]
    fn velocity_is_sampled_at_the_fragments_emission_time() {
        let decomposition = row_of_glyphs(2);
        let mut params = EffectParameters::default();
        // Velocity ramps steeply; both fragments emit near t=0 so their
        // speed must come from the start of the ramp, not from later values.
        params.velocity = ControlTrack::new(
            500.0,
            vec![Keyframe::linear(0.0, 100.0), Keyframe::linear(1.0, 10_000.0)],
        );
        let seeds = seeds_for(&decomposition, &params, 7);
        for seed in seeds {
            let expected = params.velocity.value_at(seed.emission_time);
            assert_relative_eq!(seed.initial_velocity.length(), expected, epsilon = 1e-1);
        }
    }

    #[test]
    fn heavier_fragments_spin_slower() {
        let glyphs = vec![
            GlyphOutline::new(
                Vec2::new(0.0, 0.0),
                vec![vec![
                    Vec2::new(0.0, 0.0),
                    Vec2::new(1.0, 0.0),
                    Vec2::new(1.0, 1.0),
                    Vec2::new(0.0, 1.0),
                ]],
            ),
            GlyphOutline::new(
                Vec2::new(10.0, 0.0),
                vec![vec![
                    Vec2::new(0.0, 0.0),
                    Vec2::new(100.0, 0.0),
                    Vec2::new(100.0, 100.0),
                    Vec2::new(0.0, 100.0),
                ]],
            ),
        ];
        let decomposition = decompose(&glyphs, Granularity::PerGlyph).unwrap();
        let params = EffectParameters::default();
        let seeds = seeds_for(&decomposition, &params, 7);
        assert!(seeds[1].initial_angular_velocity.abs() <= motion::MAX_SPIN / 100.0);
        assert!(seeds[0].initial_angular_velocity.abs() <= motion::MAX_SPIN);
    }
}
