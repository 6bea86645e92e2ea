use glam::Vec2;

/// Weight floor so zero-area (degenerate but accepted) shapes still have
/// finite mass for spin scaling.
pub const MIN_WEIGHT: f32 = 1e-3;

/// One independently animatable piece of decomposed text.
///
/// Immutable once derived; `id` is stable for the lifetime of the layer's
/// decomposition and doubles as the burst rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphFragment {
    pub id: u32,
    pub local_origin: Vec2,
    pub contour: Vec<Vec2>,
    pub weight: f32,
}

impl GlyphFragment {
    pub fn new(id: u32, local_origin: Vec2, contour: Vec<Vec2>, weight: f32) -> Self {
        Self {
            id,
            local_origin,
            contour,
            weight: weight.max(MIN_WEIGHT),
        }
    }
}

/// Signed shoelace area of a closed contour.
pub fn contour_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        doubled += a.x * b.y - b.x * a.y;
    }
    0.5 * doubled
}

/// Arithmetic mean of the contour's vertices.
pub fn contour_mean(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}
