use super::cache::LayerCache;
use super::layer::{LayerId, TextLayer};
use crate::glyph::{decompose, Decomposition, DecompositionError, Granularity};
use crate::params::{Control, ControlTrack, EffectParameters};
use crate::sim::{self, ParticleSeed, ParticleState};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// The public entry point: answers "what is the full visual state of this
/// layer at time t".
///
/// Safe to call from many threads for many layers and frames at once; every
/// evaluation is a pure function of `(layer, parameters, time)` apart from
/// the two per-layer caches, which rebuild with read-copy-update swaps.
#[derive(Debug)]
pub struct ExplosionEvaluator {
    granularity: Granularity,
    decompositions: LayerCache<Result<Decomposition, DecompositionError>>,
    seeds: LayerCache<Vec<ParticleSeed>>,
}

impl Default for ExplosionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplosionEvaluator {
    pub fn new() -> Self {
        Self::with_granularity(Granularity::PerGlyph)
    }

    pub fn with_granularity(granularity: Granularity) -> Self {
        Self {
            granularity,
            decompositions: LayerCache::new(),
            seeds: LayerCache::new(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Full visual state of `layer` at `query_time`, one state per fragment
    /// ordered by fragment id.
    ///
    /// Never fails for valid layers: a layer with no visible glyphs returns
    /// an empty sequence, meaning "render the intact text". Repeated or
    /// out-of-order queries of the same time are bit-identical.
    pub fn evaluate(
        &self,
        layer: &TextLayer,
        params: &EffectParameters,
        query_time: f32,
    ) -> Vec<ParticleState> {
        let content_hash = layer.content_hash();
        let decomposition = self.decompositions.get_or_build(layer.id, content_hash, || {
            log::debug!(
                "decomposing layer {:?}: {} glyphs, {:?}",
                layer.id,
                layer.glyphs.len(),
                self.granularity
            );
            decompose(&layer.glyphs, self.granularity)
        });
        let decomposition = match &decomposition.value {
            Ok(decomposition) => decomposition,
            Err(err) => {
                log::debug!("layer {:?}: {err}; rendering intact text", layer.id);
                return Vec::new();
            }
        };

        let seed_hash = seed_input_hash(content_hash, layer.seed, params);
        let seeds = self.seeds.get_or_build(layer.id, seed_hash, || {
            log::debug!("reseeding layer {:?}", layer.id);
            sim::seeds_for(decomposition, params, layer.seed)
        });

        decomposition
            .fragments
            .iter()
            .zip(seeds.value.iter())
            .map(|(fragment, seed)| {
                // Capture-at-emission: gravity keyframes set after a
                // particle's emission never retroactively alter its flight.
                let gravity = params.value_at(Control::Gravity, seed.emission_time);
                sim::state_at(seed, fragment.local_origin, gravity, query_time)
            })
            .collect()
    }

    /// Drops both caches for a layer (e.g. the host deleted it).
    pub fn invalidate(&self, layer: LayerId) {
        self.decompositions.invalidate(layer);
        self.seeds.invalidate(layer);
    }
}

/// Hash of every input the particle seeds depend on: the layer content, the
/// layer's random seed, and the emission-count and velocity tracks. Gravity
/// is deliberately absent; it only enters at integration time.
fn seed_input_hash(content_hash: u64, layer_seed: u64, params: &EffectParameters) -> u64 {
    let mut hasher = DefaultHasher::new();
    content_hash.hash(&mut hasher);
    layer_seed.hash(&mut hasher);
    hash_track(&mut hasher, params.track(Control::EmissionCount));
    hash_track(&mut hasher, params.track(Control::Velocity));
    hasher.finish()
}

fn hash_track(hasher: &mut impl Hasher, track: &ControlTrack) {
    track.default_value().to_bits().hash(hasher);
    track.keyframes().len().hash(hasher);
    for kf in track.keyframes() {
        kf.time.to_bits().hash(hasher);
        kf.value.to_bits().hash(hasher);
        (kf.in_interpolation as u8).hash(hasher);
        (kf.out_interpolation as u8).hash(hasher);
        kf.in_tangent.to_bits().hash(hasher);
        kf.out_tangent.to_bits().hash(hasher);
        kf.in_weight.to_bits().hash(hasher);
        kf.out_weight.to_bits().hash(hasher);
    }
}
