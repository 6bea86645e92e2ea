#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InterpolationType {
    Constant,
    Linear,
    Bezier,
}

/// A single host keyframe on a scalar control.
///
/// Matches the host's generic temporal keyframe model: per-side
/// interpolation, tangents (value units per second), and ease weights
/// (fraction of the segment duration). C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub in_interpolation: InterpolationType,
    pub out_interpolation: InterpolationType,
    pub in_tangent: f32,
    pub out_tangent: f32,
    pub in_weight: f32,
    pub out_weight: f32,
}

impl Keyframe {
    pub const DEFAULT_EASE_WEIGHT: f32 = 1.0 / 3.0;

    pub const fn with_interpolation(time: f32, value: f32, interpolation: InterpolationType) -> Self {
        Self {
            time,
            value,
            in_interpolation: interpolation,
            out_interpolation: interpolation,
            in_tangent: 0.0,
            out_tangent: 0.0,
            in_weight: Self::DEFAULT_EASE_WEIGHT,
            out_weight: Self::DEFAULT_EASE_WEIGHT,
        }
    }

    /// Host default: eased bezier with flat tangents.
    pub const fn simple(time: f32, value: f32) -> Self {
        Self::with_interpolation(time, value, InterpolationType::Bezier)
    }

    pub const fn linear(time: f32, value: f32) -> Self {
        Self::with_interpolation(time, value, InterpolationType::Linear)
    }

    /// Hold keyframe: the value stays constant until the next keyframe.
    pub const fn hold(time: f32, value: f32) -> Self {
        Self::with_interpolation(time, value, InterpolationType::Constant)
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.value.is_finite()
            && self.in_tangent.is_finite()
            && self.out_tangent.is_finite()
            && self.in_weight.is_finite()
            && self.out_weight.is_finite()
    }
}

/// Samples a sorted keyframe sequence at `t`.
///
/// Empty sequence returns `default_value`. Outside the keyframed range the
/// value clamps to the first/last keyframe. Sampling exactly at a keyframe
/// time returns that keyframe's stored value, never an interpolated
/// approximation.
pub fn sample(keyframes: &[Keyframe], t: f32, default_value: f32) -> f32 {
    if keyframes.is_empty() {
        return default_value;
    }
    if t <= keyframes[0].time {
        return keyframes[0].value;
    }

    let i = keyframes
        .partition_point(|kf| kf.time <= t)
        .saturating_sub(1);
    if i >= keyframes.len() - 1 {
        return keyframes[keyframes.len() - 1].value;
    }

    sample_segment(&keyframes[i], &keyframes[i + 1], t)
}

/// Samples the segment between two adjacent keyframes at `t` in
/// `[start.time, end.time)`.
pub fn sample_segment(start: &Keyframe, end: &Keyframe, t: f32) -> f32 {
    if matches!(start.out_interpolation, InterpolationType::Constant) {
        return start.value;
    }

    match segment_interpolation(start, end) {
        InterpolationType::Bezier => sample_bezier(start, end, t),
        _ => {
            let segment_t = (t - start.time) / (end.time - start.time);
            start.value + (end.value - start.value) * segment_t
        }
    }
}

/// A segment interpolates with the broader of its two facing modes.
fn segment_interpolation(start: &Keyframe, end: &Keyframe) -> InterpolationType {
    if matches!(start.out_interpolation, InterpolationType::Bezier)
        || matches!(end.in_interpolation, InterpolationType::Bezier)
    {
        InterpolationType::Bezier
    } else {
        InterpolationType::Linear
    }
}

fn cubic(p: [f32; 4], u: f32) -> f32 {
    let v = 1.0 - u;
    v * v * v * p[0] + 3.0 * v * v * u * p[1] + 3.0 * v * u * u * p[2] + u * u * u * p[3]
}

fn cubic_derivative(p: [f32; 4], u: f32) -> f32 {
    let v = 1.0 - u;
    3.0 * v * v * (p[1] - p[0]) + 6.0 * v * u * (p[2] - p[1]) + 3.0 * u * u * (p[3] - p[2])
}

/// 2D temporal bezier: solve the curve parameter for the target time with
/// Newton iteration, then evaluate the value axis at that parameter.
fn sample_bezier(start: &Keyframe, end: &Keyframe, target_time: f32) -> f32 {
    let dt = end.time - start.time;

    let times = [
        start.time,
        start.time + dt * start.out_weight,
        end.time - dt * end.in_weight,
        end.time,
    ];
    let values = [
        start.value,
        start.value + start.out_tangent * dt * start.out_weight,
        end.value - end.in_tangent * dt * end.in_weight,
        end.value,
    ];

    let mut u = (target_time - start.time) / dt;
    for _ in 0..8 {
        let time_diff = cubic(times, u) - target_time;
        if time_diff.abs() < 1e-6 {
            break;
        }
        let slope = cubic_derivative(times, u);
        if slope.abs() < 1e-9 {
            break;
        }
        u = (u - time_diff / slope).clamp(0.0, 1.0);
    }

    cubic(values, u)
}

/// Earliest time `t >= 0` at which the sampled value reaches `threshold`,
/// or `None` if it never does. Used to schedule burst ranks against the
/// emission-count track.
pub fn first_time_at_least(keyframes: &[Keyframe], default_value: f32, threshold: f32) -> Option<f32> {
    if sample(keyframes, 0.0, default_value) >= threshold {
        return Some(0.0);
    }

    for pair in keyframes.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        if end.time <= 0.0 {
            continue;
        }
        if end.value >= threshold {
            return Some(segment_crossing(start, end, threshold));
        }
    }

    None
}

/// Crossing time within one segment whose end value is at/above the
/// threshold and whose entry value (already checked by the caller) is below.
fn segment_crossing(start: &Keyframe, end: &Keyframe, threshold: f32) -> f32 {
    let lo = start.time.max(0.0);

    if matches!(start.out_interpolation, InterpolationType::Constant) {
        // Hold segments jump to the end value exactly at the end keyframe.
        return end.time;
    }

    match segment_interpolation(start, end) {
        InterpolationType::Bezier => {
            let mut lo = lo;
            let mut hi = end.time;
            for _ in 0..32 {
                let mid = 0.5 * (lo + hi);
                if sample_segment(start, end, mid) >= threshold {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
            hi
        }
        _ => {
            let span = end.value - start.value;
            let t = start.time + (threshold - start.value) / span * (end.time - start.time);
            t.max(lo)
        }
    }
}
