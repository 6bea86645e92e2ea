//! Decomposition of a text layer's shaped glyph outlines into independent
//! explosion fragments.

mod decompose;
mod fragment;

pub use decompose::{decompose, Decomposition, DecompositionError, GlyphOutline, Granularity};
pub use fragment::{contour_area, contour_mean, GlyphFragment, MIN_WEIGHT};
