//! The public explosion-state evaluator and its per-layer caches.

mod cache;
mod evaluate;
mod layer;

pub use evaluate::ExplosionEvaluator;
pub use layer::{FontSpec, LayerId, TextLayer};
