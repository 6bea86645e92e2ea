use super::fragment::{contour_area, contour_mean, GlyphFragment};
use glam::Vec2;
use thiserror::Error;

/// A shaped glyph as supplied by the host: layer-local origin plus closed
/// outline contours with points relative to that origin.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphOutline {
    pub origin: Vec2,
    pub contours: Vec<Vec<Vec2>>,
}

impl GlyphOutline {
    pub fn new(origin: Vec2, contours: Vec<Vec<Vec2>>) -> Self {
        Self { origin, contours }
    }
}

/// How finely the text is split into explosion units.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Granularity {
    /// One fragment per glyph (the dominant contour carries the shape).
    PerGlyph,
    /// One fragment per outline contour.
    PerContour,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecompositionError {
    /// Empty or fully degenerate text; the caller renders the original text
    /// unchanged.
    #[error("text layer has no visible glyphs")]
    NoVisibleGlyphs,
}

/// The cached per-layer decomposition: fragments sorted by ascending id plus
/// the weighted centroid explosions radiate from.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub fragments: Vec<GlyphFragment>,
    pub centroid: Vec2,
}

/// Splits shaped glyph outlines into independent fragments.
///
/// Pure and deterministic: fragment ids are assigned in input order
/// (glyph-major for `PerContour`). Contours with fewer than three points are
/// skipped; if nothing usable remains the layer has no visible glyphs.
pub fn decompose(
    glyphs: &[GlyphOutline],
    granularity: Granularity,
) -> Result<Decomposition, DecompositionError> {
    let mut fragments = Vec::new();
    let mut next_id = 0u32;

    for glyph in glyphs {
        let usable: Vec<&[Vec2]> = glyph
            .contours
            .iter()
            .filter(|contour| contour.len() >= 3)
            .map(Vec::as_slice)
            .collect();
        if usable.is_empty() {
            continue;
        }

        match granularity {
            Granularity::PerGlyph => {
                let weight: f32 = usable.iter().map(|c| contour_area(c).abs()).sum();
                let dominant = usable
                    .iter()
                    .copied()
                    .max_by(|a, b| contour_area(a).abs().total_cmp(&contour_area(b).abs()));
                if let Some(contour) = dominant {
                    fragments.push(GlyphFragment::new(
                        next_id,
                        glyph.origin,
                        contour.to_vec(),
                        weight,
                    ));
                    next_id += 1;
                }
            }
            Granularity::PerContour => {
                for contour in usable {
                    fragments.push(GlyphFragment::new(
                        next_id,
                        glyph.origin + contour_mean(contour),
                        contour.to_vec(),
                        contour_area(contour).abs(),
                    ));
                    next_id += 1;
                }
            }
        }
    }

    if fragments.is_empty() {
        return Err(DecompositionError::NoVisibleGlyphs);
    }

    let centroid = weighted_centroid(&fragments);
    Ok(Decomposition {
        fragments,
        centroid,
    })
}

fn weighted_centroid(fragments: &[GlyphFragment]) -> Vec2 {
    let total: f32 = fragments.iter().map(|f| f.weight).sum();
    fragments
        .iter()
        .map(|f| f.local_origin * f.weight)
        .sum::<Vec2>()
        / total
}
