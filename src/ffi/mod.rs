//! Single-call FFI for burstengine.
//!
//! Functions:
//! - `burst_evaluate` - evaluates one layer's explosion state at one time
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-3`: Buffer overflow (resize and retry)
//! - `-5`: Inconsistent document arrays

use crate::glyph::{decompose, GlyphOutline, Granularity};
use crate::params::{Control, ControlTrack, EffectParameters, Keyframe};
use crate::sim;
use glam::Vec2;
use std::slice;

pub const OK: i32 = 0;
pub const ERR_NULL_POINTER: i32 = -1;
pub const ERR_BUFFER_OVERFLOW: i32 = -3;
pub const ERR_INVALID_DOCUMENT: i32 = -5;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BurstPoint {
    pub x: f32,
    pub y: f32,
}

/// All layer data needed for one evaluation, flattened into SoA arrays.
///
/// Contour points are glyph-major: `glyph_contour_counts[g]` contours per
/// glyph, `contour_lengths[c]` points per contour, points concatenated in
/// order into `points`.
#[repr(C)]
pub struct BurstDocument {
    pub layer_seed: u64,

    // Glyph outlines
    pub glyph_origins: *const BurstPoint,
    pub glyph_contour_counts: *const i32,
    pub glyph_count: usize,
    pub contour_lengths: *const i32,
    pub contour_count: usize,
    pub points: *const BurstPoint,
    pub point_count: usize,

    // Control keyframes (sanitized on ingest; invalid entries are dropped)
    pub emission_keyframes: *const Keyframe,
    pub emission_keyframe_count: usize,
    pub velocity_keyframes: *const Keyframe,
    pub velocity_keyframe_count: usize,
    pub gravity_keyframes: *const Keyframe,
    pub gravity_keyframe_count: usize,

    /// 0 = per glyph, anything else = per contour.
    pub granularity: u32,
}

/// One output row per fragment, ordered by fragment id.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BurstState {
    pub fragment_id: u32,
    pub position_x: f32,
    pub position_y: f32,
    pub rotation: f32,
    pub visible: u8,
}

unsafe fn array<'a, T>(ptr: *const T, len: usize) -> Option<&'a [T]> {
    if len == 0 {
        Some(&[])
    } else if ptr.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(ptr, len))
    }
}

/// Evaluates the explosion state of one layer at `query_time`.
///
/// Writes up to `capacity` states to `out_states` and the produced count to
/// `out_count`. A layer with no visible glyphs writes zero states and
/// succeeds (the host renders the intact text).
///
/// # Safety
/// All document pointers must be valid for the lengths they declare;
/// `out_states` must be valid for `capacity` writes.
#[no_mangle]
pub unsafe extern "C" fn burst_evaluate(
    doc: *const BurstDocument,
    query_time: f32,
    out_states: *mut BurstState,
    capacity: usize,
    out_count: *mut usize,
) -> i32 {
    if doc.is_null() || out_count.is_null() {
        return ERR_NULL_POINTER;
    }
    let doc = &*doc;

    let Some(glyph_origins) = array(doc.glyph_origins, doc.glyph_count) else {
        return ERR_NULL_POINTER;
    };
    let Some(glyph_contour_counts) = array(doc.glyph_contour_counts, doc.glyph_count) else {
        return ERR_NULL_POINTER;
    };
    let Some(contour_lengths) = array(doc.contour_lengths, doc.contour_count) else {
        return ERR_NULL_POINTER;
    };
    let Some(points) = array(doc.points, doc.point_count) else {
        return ERR_NULL_POINTER;
    };

    let declared_contours: i64 = glyph_contour_counts.iter().map(|&n| i64::from(n)).sum();
    let declared_points: i64 = contour_lengths.iter().map(|&n| i64::from(n)).sum();
    if glyph_contour_counts.iter().any(|&n| n < 0)
        || contour_lengths.iter().any(|&n| n < 0)
        || declared_contours != doc.contour_count as i64
        || declared_points != doc.point_count as i64
    {
        return ERR_INVALID_DOCUMENT;
    }

    let mut glyphs = Vec::with_capacity(doc.glyph_count);
    let mut contour_cursor = 0usize;
    let mut point_cursor = 0usize;
    for (origin, &contour_count) in glyph_origins.iter().zip(glyph_contour_counts) {
        let mut contours = Vec::with_capacity(contour_count as usize);
        for &length in &contour_lengths[contour_cursor..contour_cursor + contour_count as usize] {
            let contour = points[point_cursor..point_cursor + length as usize]
                .iter()
                .map(|p| Vec2::new(p.x, p.y))
                .collect();
            contours.push(contour);
            point_cursor += length as usize;
        }
        contour_cursor += contour_count as usize;
        glyphs.push(GlyphOutline::new(Vec2::new(origin.x, origin.y), contours));
    }

    let Some(emission) = array(doc.emission_keyframes, doc.emission_keyframe_count) else {
        return ERR_NULL_POINTER;
    };
    let Some(velocity) = array(doc.velocity_keyframes, doc.velocity_keyframe_count) else {
        return ERR_NULL_POINTER;
    };
    let Some(gravity) = array(doc.gravity_keyframes, doc.gravity_keyframe_count) else {
        return ERR_NULL_POINTER;
    };
    let params = EffectParameters {
        emission_count: ControlTrack::for_control(Control::EmissionCount, emission.to_vec()),
        velocity: ControlTrack::for_control(Control::Velocity, velocity.to_vec()),
        gravity: ControlTrack::for_control(Control::Gravity, gravity.to_vec()),
    };

    let granularity = if doc.granularity == 0 {
        Granularity::PerGlyph
    } else {
        Granularity::PerContour
    };

    let Ok(decomposition) = decompose(&glyphs, granularity) else {
        // No visible glyphs: the host renders the intact text unchanged.
        *out_count = 0;
        return OK;
    };

    if decomposition.fragments.len() > capacity {
        *out_count = decomposition.fragments.len();
        return ERR_BUFFER_OVERFLOW;
    }
    if out_states.is_null() {
        return ERR_NULL_POINTER;
    }

    let seeds = sim::seeds_for(&decomposition, &params, doc.layer_seed);
    for (i, (fragment, seed)) in decomposition.fragments.iter().zip(&seeds).enumerate() {
        let gravity_at_emission = params.value_at(Control::Gravity, seed.emission_time);
        let state = sim::state_at(seed, fragment.local_origin, gravity_at_emission, query_time);
        *out_states.add(i) = BurstState {
            fragment_id: state.fragment_id,
            position_x: state.position.x,
            position_y: state.position.y,
            rotation: state.rotation,
            visible: u8::from(state.visible),
        };
    }
    *out_count = decomposition.fragments.len();

    OK
}
